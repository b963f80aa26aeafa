//! Expense entity types
//!
//! An [`Expense`] always carries a remote-assigned id; the local cache never
//! holds an id-less entry. [`ExpenseDraft`] is the payload-without-id used for
//! creates, updates, and rollback patches.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// == Expense ==
/// A confirmed expense record, as held in the local cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Remote-assigned identifier, unique within the cache
    pub id: String,
    /// Non-empty human-readable description
    pub description: String,
    /// Positive amount in currency units
    pub amount: f64,
    /// Calendar date of the expense, no time-of-day component
    pub date: NaiveDate,
}

impl Expense {
    /// Attaches a remote-assigned id to a draft, producing a cache-ready expense.
    pub fn new(id: impl Into<String>, draft: ExpenseDraft) -> Self {
        Self {
            id: id.into(),
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
        }
    }

    /// Projects the mutable fields of this expense into a draft.
    ///
    /// Used to re-apply an undo snapshot through the cache's `replace`
    /// primitive during rollback.
    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            description: self.description.clone(),
            amount: self.amount,
            date: self.date,
        }
    }
}

// == Expense Draft ==
/// An expense payload without an id.
///
/// Exists only transiently: as the validated form output handed to the
/// coordinator, and as the patch applied through the cache primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}
