// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error taxonomy for vault operations
//!
//! Every variant is recoverable. Nothing here is retried automatically;
//! retries are always user-initiated.

use thiserror::Error;

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;

/// Message shown when the add-entry analysis call fails
pub const ANALYSIS_RETRY_MESSAGE: &str = "Could not analyze that repository. Please try again.";

/// Message shown when a recommendation call fails
pub const RECOMMENDATION_ALERT: &str = "AI is thinking hard, try again!";

/// Errors surfaced by the vault core
#[derive(Debug, Error)]
pub enum VaultError {
    /// The URL does not point at a supported hosting service
    #[error("{message}")]
    InvalidUrl {
        /// The rejected input, trimmed
        url: String,
        /// Inline field-level message
        message: String,
    },

    /// The analysis call failed (transport, status or malformed response)
    #[error("Repository analysis failed: {reason}")]
    AnalysisFailed {
        /// Underlying cause, for logs only
        reason: String,
    },

    /// The recommendation call failed (transport, status or malformed response)
    #[error("Recommendation failed: {reason}")]
    RecommendationFailed {
        /// Underlying cause, for logs only
        reason: String,
    },

    /// Persisted collection data could not be parsed
    #[error("Stored collection under '{key}' is corrupt: {reason}")]
    StoreLoadCorrupt {
        /// Storage key that held the bad data
        key: String,
        /// Parse failure
        reason: String,
    },

    /// Reading a storage entry failed at the I/O level
    #[error("Failed to read '{key}': {source}")]
    StoreRead {
        /// Storage key
        key: String,
        /// I/O cause
        #[source]
        source: std::io::Error,
    },

    /// Writing a storage entry failed
    #[error("Failed to write '{key}': {source}")]
    StoreWrite {
        /// Storage key
        key: String,
        /// I/O cause
        #[source]
        source: std::io::Error,
    },

    /// Serializing state for storage failed
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        /// Storage key
        key: String,
        /// Serializer cause
        #[source]
        source: serde_json::Error,
    },
}

impl VaultError {
    /// Message suitable for showing to the user.
    ///
    /// AI failures collapse to a generic retry prompt; raw causes stay in logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidUrl { message, .. } => message.clone(),
            Self::AnalysisFailed { .. } => ANALYSIS_RETRY_MESSAGE.to_string(),
            Self::RecommendationFailed { .. } => RECOMMENDATION_ALERT.to_string(),
            other => other.to_string(),
        }
    }
}
