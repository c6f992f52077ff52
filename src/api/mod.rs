//! API module
//!
//! HTTP API endpoints and middleware.

use sqlx::PgPool;

use crate::domain::CategoryPolicy;

pub mod middleware;
pub mod routes;

pub use routes::{create_router, public_router};

/// Shared state handed to every endpoint: the connection pool plus the
/// category validation policy picked at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub category_policy: CategoryPolicy,
}

impl AppState {
    pub fn new(pool: PgPool, category_policy: CategoryPolicy) -> Self {
        Self {
            pool,
            category_policy,
        }
    }
}
