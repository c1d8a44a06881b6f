// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Application state and its transitions
//!
//! State changes are expressed as events applied to an owned state value,
//! producing the next state. Nothing mutates the state from the side.

use crate::collection::Collection;
use crate::types::{Repository, Theme};

/// Which screen is active.
///
/// Kept for interactive front ends embedding the library; the one-shot CLI
/// neither persists nor reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// The saved-repository list
    #[default]
    Vault,
    /// The recommendation screen
    Pick,
}

/// Everything the vault session keeps in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Saved repositories
    pub collection: Collection,
    /// Current search text
    pub search: String,
    /// Active view
    pub view: View,
    /// Theme preference
    pub theme: Theme,
}

/// A single state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// A new record was created; it goes to the front
    RecordAdded(Repository),
    /// The user deleted the record with this id
    RecordRemoved(String),
    /// Search text changed
    SearchChanged(String),
    /// Active view changed
    ViewChanged(View),
    /// Theme preference changed
    ThemeChanged(Theme),
}

impl StateEvent {
    /// Whether applying this event changes the persisted collection
    #[must_use]
    pub fn touches_collection(&self) -> bool {
        matches!(self, Self::RecordAdded(_) | Self::RecordRemoved(_))
    }
}

impl AppState {
    /// Initial state from loaded records and theme
    #[must_use]
    pub fn new(records: Vec<Repository>, theme: Theme) -> Self {
        Self {
            collection: Collection::from_records(records),
            theme,
            ..Self::default()
        }
    }

    /// Apply `event`, returning the next state
    #[must_use]
    pub fn apply(mut self, event: StateEvent) -> Self {
        match event {
            StateEvent::RecordAdded(record) => {
                self.collection.add(record);
                self.view = View::Vault;
            }
            StateEvent::RecordRemoved(id) => {
                self.collection.remove(&id);
            }
            StateEvent::SearchChanged(text) => self.search = text,
            StateEvent::ViewChanged(view) => self.view = view,
            StateEvent::ThemeChanged(theme) => self.theme = theme,
        }
        self
    }

    /// Records matching the current search text
    #[must_use]
    pub fn visible(&self) -> Vec<Repository> {
        self.collection.search(&self.search)
    }
}
