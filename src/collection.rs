// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! In-memory repository collection, most recently added first

use crate::types::Repository;
use std::collections::VecDeque;

/// Ordered set of saved repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    records: VecDeque<Repository>,
}

impl Collection {
    /// Create a new empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records already in most-recent-first order
    #[must_use]
    pub fn from_records(records: Vec<Repository>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Prepend a record.
    ///
    /// No de-duplication: saving the same URL twice yields two records.
    pub fn add(&mut self, record: Repository) {
        self.records.push_front(record);
    }

    /// Remove the record with `id`. Returns the removed record, `None` if absent.
    pub fn remove(&mut self, id: &str) -> Option<Repository> {
        let index = self.records.iter().position(|r| r.id == id)?;
        self.records.remove(index)
    }

    /// Records matching `predicate`, in collection order
    pub fn filter<P>(&self, predicate: P) -> Vec<Repository>
    where
        P: Fn(&Repository) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Records whose name, owner or AI summary contains `query`, ignoring case
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Repository> {
        let needle = query.to_lowercase();
        self.filter(|r| matches_query(r, &needle))
    }

    /// Get a record by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Repository> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Most recently added record
    #[must_use]
    pub fn newest(&self) -> Option<&Repository> {
        self.records.front()
    }

    /// Iterate in collection order
    pub fn iter(&self) -> impl Iterator<Item = &Repository> {
        self.records.iter()
    }

    /// Copy of the records in collection order
    #[must_use]
    pub fn to_vec(&self) -> Vec<Repository> {
        self.records.iter().cloned().collect()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Standard search predicate. `needle` must already be lowercase.
#[must_use]
pub fn matches_query(record: &Repository, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.owner.to_lowercase().contains(needle)
        || record.ai_summary.to_lowercase().contains(needle)
}
