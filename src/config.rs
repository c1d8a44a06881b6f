// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Layers, lowest to highest: built-in defaults, a TOML file, then
//! `REPOVAULT_*` environment variables. CLI flags are applied by the binary.

use crate::ai::gemini::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "REPOVAULT";

/// Fallback environment variables for the API key, checked in order
pub const API_KEY_FALLBACKS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for persistent data (records, theme)
    pub data_dir: PathBuf,
    /// Gemini API key
    pub api_key: Option<String>,
    /// Gemini model name
    pub model: String,
    /// Gemini API root
    pub api_base: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Optional timeout for AI requests, in seconds
    pub request_timeout_secs: Option<u64>,
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "hyperpolymath", "repovault")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: project_dirs()
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".repovault")),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Gemini client settings derived from this configuration
    #[must_use]
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Render as TOML with the API key masked
    pub fn to_display_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        shown.api_key = shown.api_key.as_deref().map(mask_secret);
        toml::to_string_pretty(&shown).context("Failed to render configuration")
    }
}

/// Default config file location
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from `path` (required if given) or the default
/// location (optional), then the environment.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = config::Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        None => {
            if let Some(default_path) = default_config_path() {
                builder = builder.add_source(config::File::from(default_path).required(false));
            }
        }
    }

    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

    let mut cfg: Config = builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    if cfg.api_key.is_none() {
        cfg.api_key = API_KEY_FALLBACKS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()));
    }

    Ok(cfg)
}

/// Keep the last four characters of a secret
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{tail}")
}
