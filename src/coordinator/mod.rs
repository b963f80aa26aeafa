//! Mutation Coordinator Module
//!
//! The core of the crate: optimistic local mutations, the per-attempt
//! submission state machine, and the rollback contract that restores the
//! cache exactly when a remote call fails.

mod mutation;
mod state;

// Re-export public types
pub use mutation::{MutationCoordinator, Outcome};
pub use state::{SubmissionState, SubmissionStatus};
