//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::export::{export_filename, CsvExporter};
use crate::handlers::{
    BatchCreateCommand, BatchCreateHandler, CreateExpenseCommand, ExpenseHandler, Profile,
    ProfileHandler, RegisterUserCommand, RegisterUserHandler, UpdateExpenseCommand,
    UpdateProfileCommand,
};
use crate::domain::MonthFilter;
use crate::ledger::{CategoryTotal, Expense, LedgerService};

use super::middleware::AuthenticatedUser;
use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct RegisterUserResponse {
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    pub description: String,
    /// Decimal; serializes as a string like "12.50"
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            description: expense.description,
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListExpensesResponse {
    pub expenses: Vec<ExpenseResponse>,
    pub totals_by_category: Vec<CategoryTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthFilter>,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    /// Amount as string for precise decimal handling
    pub amount: String,
    pub category: String,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateExpenseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BatchCreateRequest {
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub amounts: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub dates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchCreateResponse {
    pub created: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub phone: String,
    /// Currency symbol (one of € $ FCFA £ ¥)
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            bio: profile.bio,
            phone: profile.phone,
            currency: profile.currency.symbol().to_string(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

// =========================================================================
// API Routers
// =========================================================================

/// Routes that require an authenticated session
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses", post(create_expense))
        .route("/expenses/batch", post(batch_create_expenses))
        .route("/expenses/export", get(export_expenses_csv))
        .route("/expenses/:expense_id", patch(update_expense))
        .route("/expenses/:expense_id", delete(delete_expense))
        .route("/profile", get(get_profile))
        .route("/profile", patch(update_profile))
}

/// Routes outside the session boundary: registration is called by the
/// surrounding identity provider after its own credential handling.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/users", post(register_user))
}

/// Optional `?month=YYYY-MM` query value, validated at the boundary.
fn parse_month(raw: &Option<String>) -> Result<Option<MonthFilter>, AppError> {
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Ok(Some(raw.parse::<MonthFilter>()?)),
        None => Ok(None),
    }
}

// =========================================================================
// POST /users
// =========================================================================

/// Register a new user (and their default profile, atomically)
async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>), AppError> {
    let handler = RegisterUserHandler::new(state.pool);

    let command = RegisterUserCommand::new(request.user_id, request.username, request.email);
    let command = if request.is_active == Some(false) {
        command.inactive()
    } else {
        command
    };

    let result = handler.execute(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterUserResponse {
            user_id: result.user_id,
            profile_id: result.profile_id,
            username: result.username,
        }),
    ))
}

// =========================================================================
// GET /expenses
// =========================================================================

/// List the caller's expenses with per-category totals, optionally
/// filtered to one month
async fn list_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ListExpensesResponse>, AppError> {
    let month = parse_month(&query.month)?;
    let ledger = LedgerService::new(state.pool);

    let expenses = ledger.list_expenses(user.user_id, month).await?;
    let totals_by_category = ledger.aggregate_by_category(user.user_id, month).await?;

    Ok(Json(ListExpensesResponse {
        expenses: expenses.into_iter().map(ExpenseResponse::from).collect(),
        totals_by_category,
        month,
    }))
}

// =========================================================================
// POST /expenses
// =========================================================================

/// Record a new expense
async fn create_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), AppError> {
    let handler = ExpenseHandler::new(state.pool, state.category_policy);

    let command = CreateExpenseCommand {
        description: request.description,
        amount: request.amount,
        category: request.category,
        date: request.date,
    };

    let expense = handler.create(user.user_id, command).await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

// =========================================================================
// POST /expenses/batch
// =========================================================================

/// Record several expenses from parallel field lists; invalid or
/// incomplete rows are skipped, the rest are created
async fn batch_create_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<BatchCreateRequest>,
) -> Result<(StatusCode, Json<BatchCreateResponse>), AppError> {
    let handler = BatchCreateHandler::new(state.pool, state.category_policy);

    let command = BatchCreateCommand {
        descriptions: request.descriptions,
        amounts: request.amounts,
        categories: request.categories,
        dates: request.dates,
    };

    let result = handler.execute(user.user_id, command).await?;

    Ok((
        StatusCode::CREATED,
        Json(BatchCreateResponse {
            created: result.created,
            skipped: result.skipped,
        }),
    ))
}

// =========================================================================
// PATCH /expenses/:expense_id
// =========================================================================

/// Edit an expense owned by the caller
async fn update_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(expense_id): Path<Uuid>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let handler = ExpenseHandler::new(state.pool, state.category_policy);

    let command = UpdateExpenseCommand {
        description: request.description,
        amount: request.amount,
        category: request.category,
        date: request.date,
    };

    let expense = handler.update(user.user_id, expense_id, command).await?;

    Ok(Json(ExpenseResponse::from(expense)))
}

// =========================================================================
// DELETE /expenses/:expense_id
// =========================================================================

/// Delete an expense owned by the caller
async fn delete_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let handler = ExpenseHandler::new(state.pool, state.category_policy);

    handler.delete(user.user_id, expense_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// GET /expenses/export
// =========================================================================

/// Download the caller's (optionally month-filtered) expenses as CSV
async fn export_expenses_csv(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MonthQuery>,
) -> Result<Response, AppError> {
    let month = parse_month(&query.month)?;

    // Currency symbol in the header comes from the caller's profile
    let profile = ProfileHandler::new(state.pool.clone()).ensure(user.user_id).await?;

    let ledger = LedgerService::new(state.pool);
    let body = CsvExporter::new(&ledger)
        .export(user.user_id, month, profile.currency)
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", export_filename(month));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

// =========================================================================
// GET /profile
// =========================================================================

/// Current profile, created with defaults on first read
async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let handler = ProfileHandler::new(state.pool);

    let profile = handler.ensure(user.user_id).await?;

    Ok(Json(ProfileResponse::from(profile)))
}

// =========================================================================
// PATCH /profile
// =========================================================================

/// Edit bio, phone and/or preferred currency
async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let handler = ProfileHandler::new(state.pool);

    let command = UpdateProfileCommand {
        bio: request.bio,
        phone: request.phone,
        currency: request.currency,
    };

    let profile = handler.update(user.user_id, command).await?;

    Ok(Json(ProfileResponse::from(profile)))
}
