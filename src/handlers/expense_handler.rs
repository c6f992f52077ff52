//! Expense Mutation Handler
//!
//! Create, edit and delete of single expenses. Edit and delete look rows up
//! with one query filtered by id AND owner: a record that exists but belongs
//! to someone else is indistinguishable from one that doesn't exist, and
//! there is no second check to leak timing.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{expense, Amount, CategoryPolicy, DomainError, NewExpense};
use crate::error::AppError;
use crate::ledger::{Expense, ExpenseRow};

use super::{CreateExpenseCommand, UpdateExpenseCommand};

/// Handler for single-expense mutations
pub struct ExpenseHandler {
    pool: PgPool,
    policy: CategoryPolicy,
}

impl ExpenseHandler {
    pub fn new(pool: PgPool, policy: CategoryPolicy) -> Self {
        Self { pool, policy }
    }

    /// Record a new expense owned by `user_id`.
    pub async fn create(
        &self,
        user_id: Uuid,
        command: CreateExpenseCommand,
    ) -> Result<Expense, AppError> {
        let validated = NewExpense::parse(
            &command.description,
            &command.amount,
            &command.category,
            &command.date,
            &self.policy,
        )?;

        let row: ExpenseRow = sqlx::query_as(
            r#"
            INSERT INTO expenses (id, user_id, description, amount, category, date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING id, description, amount, category, date, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&validated.description)
        .bind(validated.amount.value())
        .bind(&validated.category)
        .bind(validated.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(Expense::from(row))
    }

    /// Edit an expense owned by `user_id`; only provided fields change.
    pub async fn update(
        &self,
        user_id: Uuid,
        expense_id: Uuid,
        command: UpdateExpenseCommand,
    ) -> Result<Expense, AppError> {
        // Single filtered lookup: id AND owner together
        let current: Option<ExpenseRow> = sqlx::query_as(
            r#"
            SELECT id, description, amount, category, date, created_at, updated_at
            FROM expenses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(expense_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let current = Expense::from(current.ok_or(AppError::ExpenseNotFound)?);

        // Validate each provided field, keep the rest
        let description = match &command.description {
            Some(raw) => expense::validate_description(raw)?,
            None => current.description,
        };
        let amount = match &command.amount {
            Some(raw) => raw.parse::<Amount>().map_err(DomainError::from)?.value(),
            None => current.amount,
        };
        let category = match &command.category {
            Some(raw) => self.policy.validate(raw)?,
            None => current.category,
        };
        let date = match &command.date {
            Some(raw) => expense::parse_date(raw)?,
            None => current.date,
        };

        let row: Option<ExpenseRow> = sqlx::query_as(
            r#"
            UPDATE expenses
            SET description = $3, amount = $4, category = $5, date = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, description, amount, category, date, created_at, updated_at
            "#,
        )
        .bind(expense_id)
        .bind(user_id)
        .bind(&description)
        .bind(amount)
        .bind(&category)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        // The row can vanish between the two statements (concurrent delete)
        let row = row.ok_or(AppError::ExpenseNotFound)?;

        Ok(Expense::from(row))
    }

    /// Delete an expense owned by `user_id`. Immediate and unconditional
    /// once found.
    pub async fn delete(&self, user_id: Uuid, expense_id: Uuid) -> Result<(), AppError> {
        let rows_affected = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(expense_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::ExpenseNotFound);
        }

        Ok(())
    }
}
