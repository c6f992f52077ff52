//! Ledger query service
//!
//! Ownership-scoped reads over the expenses table. Every query filters by
//! the requesting user's id; there is no way to read another user's rows
//! through this service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::MonthFilter;

use super::{Expense, ExpenseRow};

/// Sum of amounts for one category within the filtered set.
///
/// Categories with no matching expenses simply don't appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Query service for a user's ledger
#[derive(Debug, Clone)]
pub struct LedgerService {
    pool: PgPool,
}

impl LedgerService {
    /// Create a new LedgerService
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the user's expenses, newest date first, optionally restricted
    /// to one calendar month. Ties on date keep insertion order (newest
    /// created first).
    pub async fn list_expenses(
        &self,
        user_id: Uuid,
        month: Option<MonthFilter>,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let rows: Vec<ExpenseRow> = if let Some(month) = month {
            sqlx::query_as(
                r#"
                SELECT id, description, amount, category, date, created_at, updated_at
                FROM expenses
                WHERE user_id = $1 AND date >= $2 AND date < $3
                ORDER BY date DESC, created_at DESC
                "#,
            )
            .bind(user_id)
            .bind(month.start())
            .bind(month.end())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                r#"
                SELECT id, description, amount, category, date, created_at, updated_at
                FROM expenses
                WHERE user_id = $1
                ORDER BY date DESC, created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    /// Per-category totals over the same filtered set as `list_expenses`.
    /// Summation happens in Postgres over NUMERIC, so it is exact.
    pub async fn aggregate_by_category(
        &self,
        user_id: Uuid,
        month: Option<MonthFilter>,
    ) -> Result<Vec<CategoryTotal>, sqlx::Error> {
        let rows: Vec<(String, Decimal)> = if let Some(month) = month {
            sqlx::query_as(
                r#"
                SELECT category, SUM(amount)
                FROM expenses
                WHERE user_id = $1 AND date >= $2 AND date < $3
                GROUP BY category
                ORDER BY category
                "#,
            )
            .bind(user_id)
            .bind(month.start())
            .bind(month.end())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                r#"
                SELECT category, SUM(amount)
                FROM expenses
                WHERE user_id = $1
                GROUP BY category
                ORDER BY category
                "#,
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows
            .into_iter()
            .map(|(category, total)| CategoryTotal { category, total })
            .collect())
    }
}
