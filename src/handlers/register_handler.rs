//! User Registration Handler
//!
//! Creates a user together with their default profile in one transaction,
//! so "exactly one profile per user" holds from the first moment the user
//! exists. Credential handling and activation email belong to the
//! surrounding identity provider, not to this handler.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Currency, DomainError};
use crate::error::AppError;

use super::{RegisterUserCommand, RegisterUserResult};

/// Handler for user registration
pub struct RegisterUserHandler {
    pool: PgPool,
}

impl RegisterUserHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the register user command
    pub async fn execute(
        &self,
        command: RegisterUserCommand,
    ) -> Result<RegisterUserResult, AppError> {
        let mut tx = self.pool.begin().await?;

        // Check if user already exists
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = $1 OR username = $2 OR email = $3")
                .bind(command.user_id)
                .bind(&command.username)
                .bind(&command.email)
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_some() {
            return Err(AppError::Validation(DomainError::DuplicateIdentity));
        }

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            "#,
        )
        .bind(command.user_id)
        .bind(&command.username)
        .bind(&command.email)
        .bind(command.is_active)
        .execute(&mut *tx)
        .await?;

        // Default profile, same transaction: the user never exists without one
        let profile_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, bio, phone, currency, created_at, updated_at)
            VALUES ($1, $2, '', '', $3, NOW(), NOW())
            "#,
        )
        .bind(profile_id)
        .bind(command.user_id)
        .bind(Currency::default().symbol())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(user_id = %command.user_id, "User registered with default profile");

        Ok(RegisterUserResult {
            user_id: command.user_id,
            profile_id,
            username: command.username,
        })
    }
}
