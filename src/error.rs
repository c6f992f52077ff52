//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    /// A user-supplied field failed validation
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Expense id absent or owned by another user. The two cases are
    /// deliberately indistinguishable so callers cannot probe for other
    /// users' record ids.
    #[error("Expense not found")]
    ExpenseNotFound,

    /// No valid session, expired session, or inactive user. Kept generic
    /// for the same reason.
    #[error("Unauthorized")]
    Unauthorized,

    // Server errors (5xx)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, field, details) = match &self {
            // 400 Bad Request - report the failing field back to the caller
            AppError::Validation(domain_err) => (
                StatusCode::BAD_REQUEST,
                "validation_failed",
                Some(domain_err.field()),
                Some(domain_err.to_string()),
            ),

            // 404 Not Found - no detail on purpose
            AppError::ExpenseNotFound => (StatusCode::NOT_FOUND, "expense_not_found", None, None),

            // 401 Unauthorized - no detail on purpose
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None, None),

            // 500 Internal Server Error - log the cause, withhold it from the body
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None, None)
            }
            AppError::Csv(e) => {
                tracing::error!("CSV export error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "export_error", None, None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, None)
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None, None)
            }
        };

        let error = match status {
            // Don't echo internal error text to clients
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            field,
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmountError;
    use rust_decimal::Decimal;

    #[test]
    fn test_validation_error_names_the_field() {
        let err = AppError::Validation(DomainError::Amount(AmountError::Negative(
            Decimal::new(-1, 2),
        )));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_is_generic() {
        let err = AppError::ExpenseNotFound;
        assert_eq!(err.to_string(), "Expense not found");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
