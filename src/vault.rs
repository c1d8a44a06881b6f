// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Vault session: in-memory state backed by the persistent store
//!
//! The collection is loaded once when the session opens and written back
//! in full after every change to it (last write wins).

use crate::collection::Collection;
use crate::error::VaultResult;
use crate::state::{AppState, StateEvent, View};
use crate::store::{Storage, VaultStore};
use crate::types::{Repository, Theme};
use tracing::{debug, info};

/// An open vault
#[derive(Debug)]
pub struct Vault<S: Storage> {
    state: AppState,
    store: VaultStore<S>,
}

impl<S: Storage> Vault<S> {
    /// Open a vault, loading records and theme from `storage`
    pub fn open(storage: S) -> Self {
        let store = VaultStore::new(storage);
        let records = store.load();
        let theme = store.load_theme();
        debug!("Opened vault with {} records, theme {}", records.len(), theme);
        Self {
            state: AppState::new(records, theme),
            store,
        }
    }

    /// Current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Saved repositories
    pub fn collection(&self) -> &Collection {
        &self.state.collection
    }

    /// The backing store
    pub fn store(&self) -> &VaultStore<S> {
        &self.store
    }

    /// Apply an event and persist whatever it changed.
    ///
    /// The next state only replaces the current one once it is saved; a
    /// failed write leaves the session exactly as it was.
    pub fn dispatch(&mut self, event: StateEvent) -> VaultResult<()> {
        let touches_collection = event.touches_collection();
        let theme_event = match &event {
            StateEvent::ThemeChanged(theme) => Some(*theme),
            _ => None,
        };

        let next = self.state.clone().apply(event);

        if touches_collection {
            self.store.save(&next.collection.to_vec())?;
        }
        if let Some(theme) = theme_event {
            self.store.save_theme(theme)?;
        }
        self.state = next;
        Ok(())
    }

    /// Save a new record at the front of the collection
    pub fn add(&mut self, record: Repository) -> VaultResult<()> {
        info!("Adding {} ({})", record.full_name(), record.id);
        self.dispatch(StateEvent::RecordAdded(record))
    }

    /// Delete a record. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> VaultResult<bool> {
        if self.state.collection.get(id).is_none() {
            debug!("Remove of unknown id {} ignored", id);
            return Ok(false);
        }
        info!("Removing {}", id);
        self.dispatch(StateEvent::RecordRemoved(id.to_string()))?;
        Ok(true)
    }

    /// Set the search text
    pub fn set_search(&mut self, text: impl Into<String>) -> VaultResult<()> {
        self.dispatch(StateEvent::SearchChanged(text.into()))
    }

    /// Switch the active view
    pub fn set_view(&mut self, view: View) -> VaultResult<()> {
        self.dispatch(StateEvent::ViewChanged(view))
    }

    /// Set and persist the theme preference
    pub fn set_theme(&mut self, theme: Theme) -> VaultResult<()> {
        self.dispatch(StateEvent::ThemeChanged(theme))
    }

    /// Flip the theme and return the new value
    pub fn toggle_theme(&mut self) -> VaultResult<Theme> {
        let next = self.state.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Records matching the current search text
    pub fn visible(&self) -> Vec<Repository> {
        self.state.visible()
    }
}
