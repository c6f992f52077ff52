//! Amount type
//!
//! Domain primitive for expense amounts with validation at construction
//! time, so invalid values cannot exist in the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum allowed amount: 8 total digits, 2 of them fractional.
const MAX_AMOUNT: &str = "999999.99";

/// Maximum decimal places (cents precision)
const MAX_SCALE: u32 = 2;

/// Amount represents a validated expense amount.
///
/// # Invariants
/// - Value is never negative (zero is allowed)
/// - Maximum 2 decimal places
/// - Maximum value is 999999.99
///
/// # Example
/// ```
/// use expense_tracker::domain::Amount;
///
/// let amount: Amount = "12.50".parse().unwrap();
/// assert_eq!(amount.to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Amount has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Amount exceeds maximum allowed value ({MAX_AMOUNT})")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::Negative` if value < 0
    /// - `AmountError::TooManyDecimals` if more than 2 decimal places
    /// - `AmountError::Overflow` if value > 999999.99
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO {
            return Err(AmountError::Negative(value));
        }

        if value.scale() > MAX_SCALE {
            return Err(AmountError::TooManyDecimals(value.scale()));
        }

        let max = Decimal::from_str(MAX_AMOUNT).expect("Invalid MAX_AMOUNT constant");
        if value > max {
            return Err(AmountError::Overflow);
        }

        // Normalize to cents precision so 12.5 and 12.50 are the same value
        // in storage and output.
        let mut value = value;
        value.rescale(MAX_SCALE);
        Ok(Self(value))
    }

    /// Zero amount (valid: an expense may cost nothing).
    pub fn zero() -> Self {
        Self(Decimal::new(0, MAX_SCALE))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal =
            Decimal::from_str(s.trim()).map_err(|e| AmountError::ParseError(e.to_string()))?;
        Amount::new(decimal)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::from_str(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        format!("{:.2}", amount.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(Decimal::new(1250, 2));
        assert!(amount.is_ok());
        assert_eq!(amount.unwrap().value(), Decimal::new(1250, 2));
    }

    #[test]
    fn test_amount_zero_accepted() {
        let amount = Amount::new(Decimal::ZERO);
        assert!(amount.is_ok());
    }

    #[test]
    fn test_amount_negative_cent_rejected() {
        // -0.01 is below the floor
        let amount = Amount::new(Decimal::new(-1, 2));
        assert!(matches!(amount, Err(AmountError::Negative(_))));
    }

    #[test]
    fn test_amount_too_many_decimals() {
        // 0.123 has 3 decimal places
        let amount = Amount::new(Decimal::new(123, 3));
        assert!(matches!(amount, Err(AmountError::TooManyDecimals(3))));
    }

    #[test]
    fn test_amount_overflow() {
        let value = Decimal::from_str("1000000.00").unwrap();
        let amount = Amount::new(value);
        assert!(matches!(amount, Err(AmountError::Overflow)));
    }

    #[test]
    fn test_amount_max_value_ok() {
        let value = Decimal::from_str("999999.99").unwrap();
        assert!(Amount::new(value).is_ok());
    }

    #[test]
    fn test_amount_from_str() {
        let amount: Amount = "12.50".parse().unwrap();
        assert_eq!(amount.value(), Decimal::new(1250, 2));
    }

    #[test]
    fn test_amount_from_str_garbage() {
        let amount: Result<Amount, _> = "12,50 EUR".parse();
        assert!(matches!(amount, Err(AmountError::ParseError(_))));
    }

    #[test]
    fn test_amount_display_rescales() {
        let amount: Amount = "12.5".parse().unwrap();
        assert_eq!(amount.to_string(), "12.50");
        assert_eq!(String::from(amount), "12.50");
    }

    #[test]
    fn test_amount_round_trips_through_string() {
        let amount: Amount = "12.50".parse().unwrap();
        let s = String::from(amount);
        let back: Amount = s.parse().unwrap();
        assert_eq!(amount, back);
    }
}
