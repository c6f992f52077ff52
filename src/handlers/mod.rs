//! Command Handlers module
//!
//! Mutation handlers that orchestrate validation and persistence. Each
//! handler holds a pool and exposes ownership-scoped operations; queries
//! live in the ledger module.

mod batch_handler;
mod commands;
mod expense_handler;
mod profile_handler;
mod register_handler;

pub use batch_handler::BatchCreateHandler;
pub use commands::*;
pub use expense_handler::ExpenseHandler;
pub use profile_handler::{Profile, ProfileHandler};
pub use register_handler::RegisterUserHandler;
