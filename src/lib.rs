//! Expense Sync - optimistic mutation engine for a remote-backed expense ledger
//!
//! Keeps an ordered in-memory expense cache optimistically ahead of a remote
//! store, and reconciles the two when a remote call resolves: confirmed on
//! success, rolled back to the exact pre-mutation state on failure.

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod remote;

pub use cache::ExpenseCache;
pub use config::Config;
pub use coordinator::{MutationCoordinator, Outcome, SubmissionState, SubmissionStatus};
pub use error::{Result, StoreError};
pub use model::{Expense, ExpenseDraft, FormPayload};
pub use remote::{HttpRemoteStore, RemoteStore};
