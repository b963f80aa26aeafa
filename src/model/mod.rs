//! Entity model for the expense ledger
//!
//! Defines the `Expense` value shape, the id-less draft used for mutations,
//! and validation of raw form input into a draft.

pub mod expense;
pub mod form;

// Re-export commonly used types
pub use expense::{Expense, ExpenseDraft};
pub use form::{FormField, FormPayload, ValidationError};
