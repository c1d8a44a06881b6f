// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Repovault library - a bookmark vault for code repositories
//!
//! This crate provides the core functionality for saving repositories,
//! enriching them with AI-generated summaries, searching the collection,
//! and asking an AI model to pick one entry for a free-text "vibe".

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ai;
pub mod collection;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod state;
pub mod store;
pub mod vault;
pub mod workflow;

/// Core data types for the persisted vault and the AI boundary
pub mod types {
    use serde::{Deserialize, Deserializer, Serialize};
    use std::fmt;

    // =========================================================================
    // Forge Definitions
    // =========================================================================

    /// Hosting services whose links can be saved to the vault
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Forge {
        /// GitHub
        GitHub,
        /// GitLab
        GitLab,
        /// Codeberg
        Codeberg,
        /// Bitbucket
        Bitbucket,
    }

    impl Forge {
        /// Every supported forge, in the order hosts are checked
        pub const ALL: [Forge; 4] = [Self::GitHub, Self::GitLab, Self::Codeberg, Self::Bitbucket];

        /// Host marker that must appear in a URL for this forge
        #[must_use]
        pub fn host(&self) -> &'static str {
            match self {
                Self::GitHub => "github.com",
                Self::GitLab => "gitlab.com",
                Self::Codeberg => "codeberg.org",
                Self::Bitbucket => "bitbucket.org",
            }
        }

        /// Detect the forge from a repository URL.
        ///
        /// The host appearing earliest in the URL wins, so a path that
        /// mentions another forge does not change the answer. This is a
        /// structural check only; nothing is fetched.
        #[must_use]
        pub fn from_url(url: &str) -> Option<Self> {
            Self::ALL
                .into_iter()
                .filter_map(|forge| url.find(forge.host()).map(|pos| (pos, forge)))
                .min_by_key(|(pos, _)| *pos)
                .map(|(_, forge)| forge)
        }
    }

    // =========================================================================
    // Difficulty
    // =========================================================================

    /// Coarse estimate of the effort needed to get started with a repository
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "String")]
    pub enum Difficulty {
        /// Approachable for newcomers
        Beginner,
        /// Requires some background
        Intermediate,
        /// Deep expertise expected
        Advanced,
    }

    impl Difficulty {
        /// The three labels, as sent to and expected from the model
        pub const LABELS: [&'static str; 3] = ["Beginner", "Intermediate", "Advanced"];

        /// Coerce arbitrary model or stored text into one of the three levels.
        ///
        /// Exact labels match case-insensitively. Anything else is classified
        /// by keyword and defaults to `Intermediate`.
        #[must_use]
        pub fn coerce(text: &str) -> Self {
            let lower = text.trim().to_lowercase();
            match lower.as_str() {
                "beginner" => return Self::Beginner,
                "intermediate" => return Self::Intermediate,
                "advanced" => return Self::Advanced,
                _ => {}
            }
            if ["begin", "easy", "novice"].iter().any(|k| lower.contains(k)) {
                Self::Beginner
            } else if ["advanc", "hard", "expert"].iter().any(|k| lower.contains(k)) {
                Self::Advanced
            } else {
                Self::Intermediate
            }
        }

        /// Display label
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Beginner => Self::LABELS[0],
                Self::Intermediate => Self::LABELS[1],
                Self::Advanced => Self::LABELS[2],
            }
        }
    }

    impl From<String> for Difficulty {
        fn from(text: String) -> Self {
            Self::coerce(&text)
        }
    }

    impl fmt::Display for Difficulty {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label())
        }
    }

    // =========================================================================
    // Repository Record
    // =========================================================================

    /// A saved repository with its AI-derived metadata.
    ///
    /// Records are write-once: they are created by the add-entry workflow
    /// and only ever removed, never edited in place.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Repository {
        /// Opaque unique identifier, fixed at creation
        pub id: String,
        /// Source link
        pub url: String,
        /// Repository name (second path segment)
        pub name: String,
        /// Owner or namespace (first path segment)
        pub owner: String,
        /// User note, or the AI summary when no note was given
        pub description: String,
        /// Model-estimated star count; approximate
        #[serde(deserialize_with = "non_negative_count")]
        pub stars: u64,
        /// Never populated, always zero
        #[serde(default)]
        pub forks: u64,
        /// Primary language as reported by the model
        pub language: String,
        /// Ordered topic tags
        #[serde(default)]
        pub topics: Vec<String>,
        /// AI-generated summary
        pub ai_summary: String,
        /// Ordered short use-case phrases
        #[serde(default)]
        pub use_cases: Vec<String>,
        /// Onboarding difficulty
        pub difficulty: Difficulty,
        /// Creation time in epoch milliseconds
        pub added_at: i64,
        /// Optional preview image
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub image_url: Option<String>,
    }

    impl Repository {
        /// `owner/name` slug
        #[must_use]
        pub fn full_name(&self) -> String {
            format!("{}/{}", self.owner, self.name)
        }

        /// Forge the record's URL points at, if still recognisable
        #[must_use]
        pub fn forge(&self) -> Option<Forge> {
            Forge::from_url(&self.url)
        }
    }

    // =========================================================================
    // AI Boundary
    // =========================================================================

    /// Structured analysis returned by the model for one repository URL
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Analysis {
        /// Professional summary
        pub summary: String,
        /// Common use cases
        pub use_cases: Vec<String>,
        /// Estimated difficulty, coerced into the three levels
        pub difficulty: Difficulty,
        /// Primary implementation language
        pub primary_language: String,
        /// Topic tags
        pub topics: Vec<String>,
        /// Star estimate from the model's own knowledge
        #[serde(deserialize_with = "non_negative_count")]
        pub estimated_stars: u64,
    }

    /// Model's pick for a vibe query; the id may not exist in the vault
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Recommendation {
        /// Identifier of the chosen record
        pub repo_id: String,
        /// Short justification
        pub reason: String,
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Display theme preference
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Theme {
        /// Light theme
        Light,
        /// Dark theme (default)
        #[default]
        Dark,
    }

    impl Theme {
        /// Parse `light` or `dark`, case-insensitively
        #[must_use]
        pub fn parse(text: &str) -> Option<Self> {
            match text.trim().to_lowercase().as_str() {
                "light" => Some(Self::Light),
                "dark" => Some(Self::Dark),
                _ => None,
            }
        }

        /// The other theme
        #[must_use]
        pub fn toggled(self) -> Self {
            match self {
                Self::Light => Self::Dark,
                Self::Dark => Self::Light,
            }
        }
    }

    impl fmt::Display for Theme {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Light => f.write_str("light"),
                Self::Dark => f.write_str("dark"),
            }
        }
    }

    /// Accept any JSON number. Whole non-negative values are kept exactly;
    /// fractions are rounded and negatives clamp to 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn non_negative_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        if let Some(count) = number.as_u64() {
            return Ok(count);
        }
        match number.as_f64() {
            Some(value) if value.is_finite() && value > 0.0 => Ok(value.round() as u64),
            _ => Ok(0),
        }
    }

}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{VaultError, VaultResult};
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
