//! Currency symbols
//!
//! The closed set of currencies a user can pick as display preference.
//! The symbol is what gets stored and what appears in CSV headers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// Supported currency symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Fcfa,
    Gbp,
    Yen,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Currency; 5] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Fcfa,
        Currency::Gbp,
        Currency::Yen,
    ];

    /// The symbol as stored and displayed.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Fcfa => "FCFA",
            Currency::Gbp => "£",
            Currency::Yen => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.symbol() == s)
            .ok_or_else(|| DomainError::UnknownCurrency(s.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.symbol().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_symbols_round_trip() {
        for currency in Currency::ALL {
            let parsed: Currency = currency.symbol().parse().unwrap();
            assert_eq!(parsed, currency);
        }
    }

    #[test]
    fn test_currency_default_is_euro() {
        assert_eq!(Currency::default(), Currency::Eur);
        assert_eq!(Currency::default().symbol(), "€");
    }

    #[test]
    fn test_currency_unknown_rejected() {
        let result: Result<Currency, _> = "CHF".parse();
        assert!(matches!(result, Err(DomainError::UnknownCurrency(_))));
    }
}
