//! Cache Store Module
//!
//! Ordered, newest-first in-memory expense collection with unique ids.
//! Insertion order is display order, so positions are part of the data:
//! `remove` reports where the entry sat and `insert_at` can put it back.

use crate::model::{Expense, ExpenseDraft};

// == Expense Cache ==
/// Ordered in-memory expense store.
///
/// Owned by the application session and handed to the coordinator as an
/// injected handle; the cache itself never talks to the remote store.
#[derive(Debug, Default)]
pub struct ExpenseCache {
    /// Expenses in display order, newest first
    entries: Vec<Expense>,
}

impl ExpenseCache {
    // == Constructor ==
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    // == Insert ==
    /// Inserts an expense at the front (newest-first display order).
    ///
    /// If an entry with the same id already exists it is overwritten in
    /// place, preserving id uniqueness.
    pub fn insert(&mut self, expense: Expense) {
        if let Some(index) = self.position(&expense.id) {
            self.entries[index] = expense;
        } else {
            self.entries.insert(0, expense);
        }
    }

    // == Insert At ==
    /// Re-inserts an expense at a specific position.
    ///
    /// Used to restore a removed entry to its prior place during rollback.
    /// The index is clamped to the current length.
    pub fn insert_at(&mut self, index: usize, expense: Expense) {
        let index = index.min(self.entries.len());
        self.entries.insert(index, expense);
    }

    // == Replace ==
    /// Patches the mutable fields of the entry with the given id, in place.
    ///
    /// Returns the prior value (the undo snapshot), or `None` if the id is
    /// not present. The entry keeps its position and its id.
    pub fn replace(&mut self, id: &str, draft: ExpenseDraft) -> Option<Expense> {
        let index = self.position(id)?;
        let prior = self.entries[index].clone();

        let entry = &mut self.entries[index];
        entry.description = draft.description;
        entry.amount = draft.amount;
        entry.date = draft.date;

        Some(prior)
    }

    // == Remove ==
    /// Removes the entry with the given id.
    ///
    /// Returns the prior value together with the position it occupied, or
    /// `None` if the id is not present.
    pub fn remove(&mut self, id: &str) -> Option<(usize, Expense)> {
        let index = self.position(id)?;
        Some((index, self.entries.remove(index)))
    }

    // == Find ==
    /// Returns the entry with the given id, if present.
    pub fn find(&self, id: &str) -> Option<&Expense> {
        self.entries.iter().find(|e| e.id == id)
    }

    // == Replace All ==
    /// Replaces the whole collection, e.g. from a session-start remote fetch.
    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.entries = expenses;
    }

    // == Iter ==
    /// Iterates over the entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.entries.iter()
    }

    // == Total ==
    /// Sum of all expense amounts, for the summary header.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry with the given id in display order.
    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
