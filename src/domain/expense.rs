//! Validated expense input
//!
//! `NewExpense` is the one place raw form/JSON fields turn into checked
//! domain values. Single create, edit, and batch create all funnel through
//! it so the rules cannot drift apart.

use chrono::NaiveDate;

use super::amount::Amount;
use super::category::CategoryPolicy;
use super::error::DomainError;

/// Maximum description length
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// A fully validated expense, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Amount,
    pub category: String,
    pub date: NaiveDate,
}

impl NewExpense {
    /// Validate raw field values into a `NewExpense`.
    ///
    /// # Errors
    /// Returns the first failing field's `DomainError`; fields are checked
    /// in form order (description, amount, category, date).
    pub fn parse(
        description: &str,
        amount: &str,
        category: &str,
        date: &str,
        policy: &CategoryPolicy,
    ) -> Result<Self, DomainError> {
        let description = validate_description(description)?;
        let amount: Amount = amount.parse()?;
        let category = policy.validate(category)?;
        let date = parse_date(date)?;

        Ok(Self {
            description,
            amount,
            category,
            date,
        })
    }
}

/// Validate a description: non-empty after trimming, bounded length.
pub fn validate_description(raw: &str) -> Result<String, DomainError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(DomainError::EmptyDescription);
    }
    let len = value.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(DomainError::DescriptionTooLong(len));
    }
    Ok(value.to_string())
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(raw.to_string()))
}
