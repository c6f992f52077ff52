//! Common test utilities

use axum::{middleware, Router};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use expense_tracker::api::{self, middleware::hash_token, AppState};
use expense_tracker::domain::CategoryPolicy;

/// Connect to the test database.
///
/// Tests don't truncate shared tables: every test works through its own
/// freshly seeded user, so ownership scoping keeps them isolated from each
/// other (and exercises the property we care most about).
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB")
}

/// Assemble the app the way main.rs does: public routes at the root,
/// session-protected routes under /api/v1.
pub fn test_app(pool: PgPool) -> Router {
    let state = AppState::new(pool, CategoryPolicy::closed_default());

    let protected = api::create_router().layer(middleware::from_fn_with_state(
        state.clone(),
        api::middleware::auth_middleware,
    ));

    Router::new()
        .merge(api::public_router())
        .nest("/api/v1", protected)
        .with_state(state)
}

/// A seeded user with a live session token.
pub struct TestUser {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

/// Insert a user and a session row directly, the way the identity provider
/// would. No profile row: profiles appear via registration or ensure.
pub async fn seed_user(pool: &PgPool) -> TestUser {
    let user_id = Uuid::new_v4();
    let username = format!("user_{}", user_id.simple());
    let email = format!("{}@example.com", username);
    let token = format!("token_{}", Uuid::new_v4().simple());

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, TRUE, NOW(), NOW())
        "#,
    )
    .bind(user_id)
    .bind(&username)
    .bind(&email)
    .execute(pool)
    .await
    .expect("Failed to seed user");

    seed_session(pool, user_id, &token, false).await;

    TestUser {
        user_id,
        username,
        token,
    }
}

/// Insert a session row for an existing user. `expired` backdates it.
pub async fn seed_session(pool: &PgPool, user_id: Uuid, token: &str, expired: bool) {
    let interval = if expired { "-1 hour" } else { "1 hour" };

    sqlx::query(
        r#"
        INSERT INTO sessions (token_hash, user_id, expires_at, created_at)
        VALUES ($1, $2, NOW() + $3::interval, NOW())
        "#,
    )
    .bind(hash_token(token))
    .bind(user_id)
    .bind(interval)
    .execute(pool)
    .await
    .expect("Failed to seed session");
}
