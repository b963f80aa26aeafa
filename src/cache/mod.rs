//! Local Cache Module
//!
//! Ordered in-memory expense collection, the single source of truth for
//! rendering. Mutated only by the coordinator, through primitives that return
//! prior values so rollback snapshots come for free.

mod store;


// Re-export public types
pub use store::ExpenseCache;
