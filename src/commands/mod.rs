// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod add;
pub mod completions;
pub mod config;
pub mod list;
pub mod pick;
pub mod remove;
pub mod show;
pub mod theme;

use crate::config::Config;
use crate::store::FileStorage;
use crate::vault::Vault;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration, CLI overrides applied
    pub config: Config,
    /// Emit JSON instead of text
    pub json: bool,
    /// Use terminal colors
    pub color: bool,
}

impl Context {
    /// Bundle command settings
    #[must_use]
    pub fn new(config: Config, json: bool, color: bool) -> Self {
        Self { config, json, color }
    }

    /// Open the vault in the configured data directory
    #[must_use]
    pub fn open_vault(&self) -> Vault<FileStorage> {
        Vault::open(FileStorage::new(&self.config.data_dir))
    }
}
