//! Command definitions
//!
//! Commands represent intentions to change the system state. Field values
//! arrive as raw strings and are validated by the handlers; amounts stay
//! strings until validation so no precision is lost on the way in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// RegisterUserCommand
// =========================================================================

/// Command to register a new user (with their default profile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserCommand {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    /// Activation is owned by the surrounding signup flow; it tells us the
    /// initial state here.
    pub is_active: bool,
}

impl RegisterUserCommand {
    pub fn new(user_id: Uuid, username: String, email: String) -> Self {
        Self {
            user_id,
            username,
            email,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Result of a successful registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResult {
    pub user_id: Uuid,
    pub profile_id: Uuid,
    pub username: String,
}

// =========================================================================
// CreateExpenseCommand
// =========================================================================

/// Command to record a single expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseCommand {
    pub description: String,
    /// Amount as string for precise decimal handling
    pub amount: String,
    pub category: String,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
}

// =========================================================================
// UpdateExpenseCommand
// =========================================================================

/// Command to edit an expense; only provided fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExpenseCommand {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

// =========================================================================
// BatchCreateCommand
// =========================================================================

/// Command to record several expenses in one call. The four sequences are
/// parallel: index i across all of them describes one row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchCreateCommand {
    pub descriptions: Vec<String>,
    pub amounts: Vec<String>,
    pub categories: Vec<String>,
    pub dates: Vec<String>,
}

impl BatchCreateCommand {
    /// Number of rows to consider (the longest sequence; short sequences
    /// yield missing fields, which skip the row).
    pub fn row_count(&self) -> usize {
        self.descriptions
            .len()
            .max(self.amounts.len())
            .max(self.categories.len())
            .max(self.dates.len())
    }
}

/// Outcome of a batch create: counts only, no per-row reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCreateResult {
    pub created: usize,
    pub skipped: usize,
}

// =========================================================================
// UpdateProfileCommand
// =========================================================================

/// Command to edit the caller's profile; only provided fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileCommand {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Currency symbol, one of the supported set
    #[serde(default)]
    pub currency: Option<String>,
}
