//! Ledger module
//!
//! A user's ledger is the set of expenses they own. This module holds the
//! read side: the `Expense` record, ownership-scoped listing, and
//! per-category aggregation.

mod query;

pub use query::{CategoryTotal, LedgerService};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A persisted expense record.
///
/// Amounts are `Decimal` (NUMERIC in storage); sums and round-trips are
/// exact, never binary floating point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row tuple shape shared by every query that returns full expense records.
pub(crate) type ExpenseRow = (
    Uuid,
    String,
    Decimal,
    String,
    NaiveDate,
    DateTime<Utc>,
    DateTime<Utc>,
);

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        let (id, description, amount, category, date, created_at, updated_at) = row;
        Self {
            id,
            description,
            amount,
            category,
            date,
            created_at,
            updated_at,
        }
    }
}
