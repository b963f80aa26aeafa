//! Mutation Coordinator
//!
//! Applies user-initiated create/update/delete mutations optimistically to
//! the local cache, issues the remote call, and reconciles the outcome.
//! On remote failure the cache is restored exactly to its pre-mutation
//! state before the attempt is marked failed: the undo snapshot comes from
//! the cache primitives themselves (`replace` and `remove` return prior
//! values), so no separate read is needed.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::ExpenseCache;
use crate::coordinator::{SubmissionState, SubmissionStatus};
use crate::error::Result;
use crate::model::{Expense, ExpenseDraft};
use crate::remote::RemoteStore;

// == User-Facing Messages ==
/// All create/update failure kinds normalize to this message.
const SAVE_FAILED: &str = "Couldn't save data - try again later";
/// All delete failure kinds normalize to this message.
const DELETE_FAILED: &str = "Couldn't delete expense - try again later";

// == Outcome ==
/// What the caller should do after an operation resolves.
///
/// The coordinator never navigates; it only signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation is confirmed (or cancel was accepted); leave the screen
    Leave,
    /// The attempt failed or was rejected; stay and render current state
    Stay,
}

// == Mutation Coordinator ==
/// Drives optimistic mutations against an injected cache handle and a
/// remote store.
///
/// The cache is owned by the surrounding session; the coordinator is its
/// only writer. The lock exists for shared ownership across the remote-call
/// suspension point, not for concurrent writers.
pub struct MutationCoordinator<S: RemoteStore> {
    cache: Arc<RwLock<ExpenseCache>>,
    remote: S,
    state: SubmissionState,
}

impl<S: RemoteStore> MutationCoordinator<S> {
    // == Constructor ==
    /// Creates a coordinator over the given cache handle and remote store.
    pub fn new(cache: Arc<RwLock<ExpenseCache>>, remote: S) -> Self {
        Self {
            cache,
            remote,
            state: SubmissionState::new(),
        }
    }

    /// Current submission status, for UI gating.
    pub fn status(&self) -> &SubmissionStatus {
        self.state.status()
    }

    /// User-facing failure message, present only while failed.
    pub fn message(&self) -> Option<&str> {
        self.state.message()
    }

    // == Load ==
    /// Populates the cache from the remote ledger at session start.
    ///
    /// Runs outside the submission state machine; errors propagate to the
    /// caller instead of entering the failed state.
    pub async fn load(&self) -> Result<()> {
        let expenses = self.remote.fetch_all().await?;
        info!(count = expenses.len(), "loaded remote ledger");
        self.cache.write().await.replace_all(expenses);
        Ok(())
    }

    // == Submit ==
    /// Creates a new expense (`editing == None`) or updates an existing one
    /// (`editing == Some(id)`) from an already-validated draft.
    ///
    /// Returns [`Outcome::Leave`] on confirmed success. A call while another
    /// attempt is submitting is rejected synchronously with no cache or
    /// status change.
    pub async fn submit(&mut self, draft: ExpenseDraft, editing: Option<&str>) -> Outcome {
        if !self.state.try_begin() {
            return Outcome::Stay;
        }

        match editing {
            Some(id) => self.run_update(id, draft).await,
            None => self.run_create(draft).await,
        }
    }

    /// Create: the cache's id-uniqueness invariant needs a real id, so the
    /// optimistic insertion is deferred until the remote assigns one. A
    /// failure therefore needs no rollback: nothing local ever changed.
    async fn run_create(&mut self, draft: ExpenseDraft) -> Outcome {
        match self.remote.create(&draft).await {
            Ok(id) => {
                self.cache.write().await.insert(Expense::new(id.as_str(), draft));
                info!(%id, "expense created");
                self.state.complete();
                Outcome::Leave
            }
            Err(err) => {
                warn!(error = %err, "remote create failed");
                self.state.fail(SAVE_FAILED);
                Outcome::Stay
            }
        }
    }

    /// Update: replace optimistically, keeping the returned prior value as
    /// the undo snapshot, then confirm with the remote. On failure the
    /// snapshot is re-applied before the attempt is marked failed.
    async fn run_update(&mut self, id: &str, draft: ExpenseDraft) -> Outcome {
        let snapshot = match self.cache.write().await.replace(id, draft.clone()) {
            Some(prior) => prior,
            None => {
                // Stale screen: the id is gone from the cache, so there is
                // no optimistic target and no remote call is issued.
                warn!(%id, "update target missing from local cache");
                self.state.fail(SAVE_FAILED);
                return Outcome::Stay;
            }
        };

        match self.remote.update(id, &draft).await {
            Ok(()) => {
                info!(%id, "expense updated");
                self.state.complete();
                Outcome::Leave
            }
            Err(err) => {
                warn!(%id, error = %err, "remote update failed, rolling back");
                self.cache.write().await.replace(id, snapshot.draft());
                self.state.fail(SAVE_FAILED);
                Outcome::Stay
            }
        }
    }

    // == Delete ==
    /// Removes an expense optimistically, keeping the prior value and its
    /// position, then confirms with the remote. On failure the entry is
    /// re-inserted where it was before the attempt is marked failed.
    pub async fn delete(&mut self, id: &str) -> Outcome {
        if !self.state.try_begin() {
            return Outcome::Stay;
        }

        let (index, prior) = match self.cache.write().await.remove(id) {
            Some(removed) => removed,
            None => {
                warn!(%id, "delete target missing from local cache");
                self.state.fail(DELETE_FAILED);
                return Outcome::Stay;
            }
        };

        match self.remote.delete(id).await {
            Ok(()) => {
                info!(%id, "expense deleted");
                self.state.complete();
                Outcome::Leave
            }
            Err(err) => {
                warn!(%id, error = %err, "remote delete failed, restoring entry");
                self.cache.write().await.insert_at(index, prior);
                self.state.fail(DELETE_FAILED);
                Outcome::Stay
            }
        }
    }

    // == Cancel ==
    /// Discards the pending form with no remote or cache interaction.
    ///
    /// Accepted only while idle; while submitting or failed the caller stays
    /// on the screen.
    pub fn cancel(&self) -> Outcome {
        if self.state.status() == &SubmissionStatus::Idle {
            Outcome::Leave
        } else {
            Outcome::Stay
        }
    }
}
