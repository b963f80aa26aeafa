//! Remote Store Contract
//!
//! The coordinator depends only on these four async operations and their
//! success/failure taxonomy, not on wire details. None of them retry
//! internally; a failure is surfaced exactly once.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Expense, ExpenseDraft};

// == Remote Store Trait ==
/// Asynchronous persistence operations against the remote expense store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Persists a new expense and returns its remote-assigned id.
    async fn create(&self, draft: &ExpenseDraft) -> Result<String>;

    /// Overwrites the expense with the given id.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) if
    /// the id no longer exists remotely.
    async fn update(&self, id: &str, draft: &ExpenseDraft) -> Result<()>;

    /// Deletes the expense with the given id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Fetches the full remote ledger, for session-start cache population.
    async fn fetch_all(&self) -> Result<Vec<Expense>>;
}
