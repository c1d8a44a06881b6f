// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Persistent store for the record collection and theme preference
//!
//! State lives in a key-value [`Storage`] backend. The collection and the
//! theme are two independent keys; loading the collection never fails, it
//! degrades to an empty vault when the stored data is missing or corrupt.

use crate::error::{VaultError, VaultResult};
use crate::types::{Repository, Theme};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key for the record collection
pub const RECORDS_KEY: &str = "repovault.records.v1";

/// Storage key for the theme preference
pub const THEME_KEY: &str = "repovault.theme";

/// Minimal key-value backend
pub trait Storage {
    /// Read the value under `key`, `None` when absent
    fn get(&self, key: &str) -> VaultResult<Option<String>>;

    /// Replace the value under `key`
    fn set(&mut self, key: &str, value: &str) -> VaultResult<()>;
}

// =============================================================================
// File backend
// =============================================================================

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> VaultResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(VaultError::StoreRead {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> VaultResult<()> {
        let write_err = |source| VaultError::StoreWrite {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write-then-rename so readers never observe a half-written file
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

// =============================================================================
// In-memory backend
// =============================================================================

/// Volatile storage, used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> VaultResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> VaultResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Vault store
// =============================================================================

/// Typed access to the vault's persisted state
#[derive(Debug, Clone)]
pub struct VaultStore<S: Storage> {
    storage: S,
}

impl<S: Storage> VaultStore<S> {
    /// Wrap a storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the collection, most recent first.
    ///
    /// Missing, unreadable or corrupt data yields an empty collection.
    pub fn load(&self) -> Vec<Repository> {
        match self.try_load() {
            Ok(records) => records,
            Err(err) => {
                warn!("{}; starting with an empty vault", err);
                Vec::new()
            }
        }
    }

    /// Load the collection, reporting why it could not be read
    pub fn try_load(&self) -> VaultResult<Vec<Repository>> {
        let Some(raw) = self.storage.get(RECORDS_KEY)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|e| VaultError::StoreLoadCorrupt {
            key: RECORDS_KEY.to_string(),
            reason: e.to_string(),
        })
    }

    /// Persist the full collection, replacing whatever was stored
    pub fn save(&mut self, records: &[Repository]) -> VaultResult<()> {
        let json = serde_json::to_string_pretty(records).map_err(|source| VaultError::Serialize {
            key: RECORDS_KEY.to_string(),
            source,
        })?;
        self.storage.set(RECORDS_KEY, &json)?;
        debug!("Saved {} records", records.len());
        Ok(())
    }

    /// Load the theme preference, `dark` when absent or unrecognised
    pub fn load_theme(&self) -> Theme {
        let raw = match self.storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Theme::default(),
            Err(err) => {
                warn!("{}; using default theme", err);
                return Theme::default();
            }
        };
        serde_json::from_str::<Theme>(&raw)
            .ok()
            .or_else(|| Theme::parse(&raw))
            .unwrap_or_default()
    }

    /// Persist the theme preference
    pub fn save_theme(&mut self, theme: Theme) -> VaultResult<()> {
        let json = serde_json::to_string(&theme).map_err(|source| VaultError::Serialize {
            key: THEME_KEY.to_string(),
            source,
        })?;
        self.storage.set(THEME_KEY, &json)
    }
}
