//! Ledger Integration Tests
//!
//! Exercise the handlers and query service directly against the database,
//! below the HTTP layer.

use rust_decimal_macros::dec;
use uuid::Uuid;

use expense_tracker::domain::CategoryPolicy;
use expense_tracker::handlers::{
    BatchCreateCommand, BatchCreateHandler, CreateExpenseCommand, ExpenseHandler, ProfileHandler,
    UpdateExpenseCommand,
};
use expense_tracker::ledger::LedgerService;
use expense_tracker::AppError;

mod common;
use common::{seed_user, setup_test_db};

fn create_command(description: &str, amount: &str, category: &str, date: &str) -> CreateExpenseCommand {
    CreateExpenseCommand {
        description: description.to_string(),
        amount: amount.to_string(),
        category: category.to_string(),
        date: date.to_string(),
    }
}

#[tokio::test]
async fn test_aggregation_sums_exactly_per_category() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool).await;
    let handler = ExpenseHandler::new(pool.clone(), CategoryPolicy::closed_default());

    for (description, amount, category) in [
        ("Groceries", "10.00", "Alimentation"),
        ("Market", "5.50", "Alimentation"),
        ("Bus", "3.00", "Transport"),
    ] {
        handler
            .create(user.user_id, create_command(description, amount, category, "2024-01-15"))
            .await
            .unwrap();
    }

    let ledger = LedgerService::new(pool);
    let totals = ledger
        .aggregate_by_category(user.user_id, None)
        .await
        .unwrap();

    assert_eq!(totals.len(), 2, "no zero-valued entries for other categories");
    assert_eq!(totals[0].category, "Alimentation");
    assert_eq!(totals[0].total, dec!(15.50));
    assert_eq!(totals[1].category, "Transport");
    assert_eq!(totals[1].total, dec!(3.00));
}

#[tokio::test]
async fn test_month_filter_is_a_half_open_range() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool).await;
    let handler = ExpenseHandler::new(pool.clone(), CategoryPolicy::closed_default());

    handler
        .create(user.user_id, create_command("January", "1.00", "Loisirs", "2024-01-31"))
        .await
        .unwrap();
    handler
        .create(user.user_id, create_command("February", "2.00", "Loisirs", "2024-02-01"))
        .await
        .unwrap();

    let ledger = LedgerService::new(pool);
    let january = ledger
        .list_expenses(user.user_id, Some("2024-01".parse().unwrap()))
        .await
        .unwrap();

    assert_eq!(january.len(), 1);
    assert_eq!(january[0].description, "January");
}

#[tokio::test]
async fn test_update_and_delete_merge_ownership_with_existence() {
    let pool = setup_test_db().await;
    let alice = seed_user(&pool).await;
    let bob = seed_user(&pool).await;
    let handler = ExpenseHandler::new(pool.clone(), CategoryPolicy::closed_default());

    let expense = handler
        .create(alice.user_id, create_command("Lunch", "12.00", "Alimentation", "2024-01-01"))
        .await
        .unwrap();

    // A non-owned id behaves exactly like a non-existent one
    let result = handler
        .update(
            bob.user_id,
            expense.id,
            UpdateExpenseCommand {
                amount: Some("1.00".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::ExpenseNotFound)));

    let result = handler.delete(bob.user_id, expense.id).await;
    assert!(matches!(result, Err(AppError::ExpenseNotFound)));

    let result = handler.delete(alice.user_id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::ExpenseNotFound)));

    // The owner still can
    handler.delete(alice.user_id, expense.id).await.unwrap();
}

#[tokio::test]
async fn test_free_category_policy_accepts_custom_values() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool).await;
    let handler = ExpenseHandler::new(pool.clone(), CategoryPolicy::Free);

    let expense = handler
        .create(user.user_id, create_command("Streaming", "9.99", "Abonnements", "2024-01-01"))
        .await
        .unwrap();
    assert_eq!(expense.category, "Abonnements");
}

#[tokio::test]
async fn test_batch_does_not_roll_back_earlier_rows() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool).await;
    let handler = BatchCreateHandler::new(pool.clone(), CategoryPolicy::closed_default());

    let result = handler
        .execute(
            user.user_id,
            BatchCreateCommand {
                descriptions: vec!["Bus".into(), "Taxi".into(), "Metro".into()],
                amounts: vec!["3.00".into(), "-5.00".into(), "1.90".into()],
                categories: vec!["Transport".into(); 3],
                dates: vec![
                    "2024-01-01".into(),
                    "2024-01-02".into(),
                    "2024-01-03".into(),
                ],
            },
        )
        .await
        .unwrap();

    assert_eq!(result.created, 2);
    assert_eq!(result.skipped, 1);

    let ledger = LedgerService::new(pool);
    let expenses = ledger.list_expenses(user.user_id, None).await.unwrap();
    let descriptions: Vec<&str> = expenses.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Metro", "Bus"]);
}

#[tokio::test]
async fn test_ensure_profile_returns_the_same_row() {
    let pool = setup_test_db().await;
    let user = seed_user(&pool).await;
    let handler = ProfileHandler::new(pool);

    let first = handler.ensure(user.user_id).await.unwrap();
    let second = handler.ensure(user.user_id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first, second);
}
