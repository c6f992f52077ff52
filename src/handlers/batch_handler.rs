//! Batch Expense Handler
//!
//! Records several expenses from parallel field sequences. Rows with an
//! empty or missing field are skipped silently; rows that fail validation
//! are skipped too and later rows still run. There is deliberately no
//! transaction across rows: a failure at row N leaves rows 1..N-1 created.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{CategoryPolicy, NewExpense};
use crate::error::AppError;

use super::{BatchCreateCommand, BatchCreateResult};

/// Handler for batch expense creation
pub struct BatchCreateHandler {
    pool: PgPool,
    policy: CategoryPolicy,
}

impl BatchCreateHandler {
    pub fn new(pool: PgPool, policy: CategoryPolicy) -> Self {
        Self { pool, policy }
    }

    /// Execute the batch create command, returning created/skipped counts.
    pub async fn execute(
        &self,
        user_id: Uuid,
        command: BatchCreateCommand,
    ) -> Result<BatchCreateResult, AppError> {
        let mut created = 0;
        let mut skipped = 0;

        for i in 0..command.row_count() {
            let fields = (
                non_empty(command.descriptions.get(i)),
                non_empty(command.amounts.get(i)),
                non_empty(command.categories.get(i)),
                non_empty(command.dates.get(i)),
            );

            let (Some(description), Some(amount), Some(category), Some(date)) = fields else {
                tracing::debug!(row = i, "Skipping batch row with missing fields");
                skipped += 1;
                continue;
            };

            let validated =
                match NewExpense::parse(description, amount, category, date, &self.policy) {
                    Ok(validated) => validated,
                    Err(e) => {
                        tracing::debug!(row = i, error = %e, "Skipping invalid batch row");
                        skipped += 1;
                        continue;
                    }
                };

            // Each row is its own statement; no rollback of earlier rows on
            // a later failure.
            sqlx::query(
                r#"
                INSERT INTO expenses (id, user_id, description, amount, category, date, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&validated.description)
            .bind(validated.amount.value())
            .bind(&validated.category)
            .bind(validated.date)
            .execute(&self.pool)
            .await?;

            created += 1;
        }

        tracing::info!(user_id = %user_id, created, skipped, "Batch create finished");

        Ok(BatchCreateResult { created, skipped })
    }
}

/// Treat absent and blank values the same way.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}
