//! Error types for remote store operations
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Closed taxonomy of remote store failures.
///
/// Every remote operation resolves to one of these kinds; the coordinator
/// catches all of them at its boundary and none propagate past it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout), transient
    #[error("network failure: {0}")]
    Network(String),

    /// The remote rejected the operation (e.g. constraint violation)
    #[error("server rejected the request: {0}")]
    Server(String),

    /// Update/delete target no longer exists remotely
    #[error("expense not found on the server: {0}")]
    NotFound(String),
}

// == Result Type Alias ==
/// Convenience Result type for remote store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
