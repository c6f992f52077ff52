//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure. Every variant
//! knows which input field failed, so the API layer can report it back to
//! the caller.

use thiserror::Error;

use super::amount::AmountError;
use super::category::MAX_CATEGORY_LEN;
use super::expense::MAX_DESCRIPTION_LEN;
use super::MAX_PHONE_LEN;

/// Validation failures for user-supplied fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Description is empty or whitespace
    #[error("Description must not be empty")]
    EmptyDescription,

    /// Description exceeds the length cap
    #[error("Description exceeds {MAX_DESCRIPTION_LEN} characters (got {0})")]
    DescriptionTooLong(usize),

    /// Amount is negative, malformed, too precise, or too large
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Category is empty or whitespace
    #[error("Category must not be empty")]
    EmptyCategory,

    /// Category not in the closed list
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Free-form category exceeds the length cap
    #[error("Category exceeds {MAX_CATEGORY_LEN} characters (got {0})")]
    CategoryTooLong(usize),

    /// Date is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Month filter is not a valid `YYYY-MM` value
    #[error("Invalid month filter: {0}")]
    InvalidMonth(String),

    /// Currency symbol outside the supported set
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Phone exceeds the length cap
    #[error("Phone exceeds {MAX_PHONE_LEN} characters (got {0})")]
    PhoneTooLong(usize),

    /// Username or email already taken
    #[error("Username or email is already in use")]
    DuplicateIdentity,
}

impl DomainError {
    /// The input field this error should be reported against.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyDescription | Self::DescriptionTooLong(_) => "description",
            Self::Amount(_) => "amount",
            Self::EmptyCategory | Self::UnknownCategory(_) | Self::CategoryTooLong(_) => {
                "category"
            }
            Self::InvalidDate(_) => "date",
            Self::InvalidMonth(_) => "month",
            Self::UnknownCurrency(_) => "currency",
            Self::PhoneTooLong(_) => "phone",
            Self::DuplicateIdentity => "username",
        }
    }
}
