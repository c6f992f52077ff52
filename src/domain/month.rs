//! Month filter
//!
//! Optional `YYYY-MM` filter used by listing, aggregation and export.
//! Parsed once at the boundary and carried as proper date bounds so the
//! queries stay index-friendly instead of string-matching dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// A calendar month, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthFilter {
    year: i32,
    month: u32,
}

impl MonthFilter {
    /// First day of the month (inclusive bound).
    pub fn start(&self) -> NaiveDate {
        // Safe by construction: month is validated in FromStr.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("MonthFilter holds a valid year-month")
    }

    /// First day of the following month (exclusive bound).
    pub fn end(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).expect("MonthFilter holds a valid year-month")
    }

    /// True when the given date falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start() && date < self.end()
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidMonth(s.to_string());

        let (year_str, month_str) = s.split_once('-').ok_or_else(invalid)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

impl TryFrom<String> for MonthFilter {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthFilter> for String {
    fn from(month: MonthFilter) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_parse_and_bounds() {
        let month: MonthFilter = "2024-01".parse().unwrap();
        assert_eq!(month.start(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(month.end(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_month_december_rolls_over_year() {
        let month: MonthFilter = "2024-12".parse().unwrap();
        assert_eq!(month.end(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_month_contains_boundaries() {
        let month: MonthFilter = "2024-01".parse().unwrap();
        assert!(month.contains(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
        assert!(month.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    }

    #[test]
    fn test_month_rejects_malformed_input() {
        for bad in ["2024", "2024-13", "2024-00", "24-01", "2024-1", "2024-01-15", "abcd-ef"] {
            let result: Result<MonthFilter, _> = bad.parse();
            assert!(
                matches!(result, Err(DomainError::InvalidMonth(_))),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_month_display_round_trip() {
        let month: MonthFilter = "2024-02".parse().unwrap();
        assert_eq!(month.to_string(), "2024-02");
    }
}
