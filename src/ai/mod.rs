// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! AI clients for repository analysis and recommendations
//!
//! The workflows only see the [`RepoAnalyzer`] and [`Recommender`] traits.
//! [`gemini::GeminiClient`] implements both against the Gemini REST API;
//! tests substitute their own implementations.

pub mod gemini;

use crate::error::VaultResult;
use crate::types::{Analysis, Difficulty, Recommendation, Repository};
use async_trait::async_trait;
use serde::Serialize;

/// Produces a structured analysis for a repository URL
#[async_trait]
pub trait RepoAnalyzer: Send + Sync {
    /// Analyze `url`, taking the user's free-text `notes` into account.
    ///
    /// Any failure is reported as `VaultError::AnalysisFailed`; there is no
    /// retry and no partial result.
    async fn analyze(&self, url: &str, notes: &str) -> VaultResult<Analysis>;
}

/// Picks one saved record for a free-text vibe
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Choose one of `records` for `vibe`.
    ///
    /// The returned id is whatever the model said and may not exist in
    /// `records`. Failures are reported as `VaultError::RecommendationFailed`.
    async fn recommend(&self, records: &[Repository], vibe: &str) -> VaultResult<Recommendation>;
}

/// Reduced view of a record sent to the model as recommendation context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoContext<'a> {
    /// Record id the model must echo back
    pub id: &'a str,
    /// Repository name
    pub name: &'a str,
    /// AI summary
    pub summary: &'a str,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Use-case phrases
    pub use_cases: &'a [String],
}

impl<'a> From<&'a Repository> for RepoContext<'a> {
    fn from(record: &'a Repository) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            summary: &record.ai_summary,
            difficulty: record.difficulty,
            use_cases: &record.use_cases,
        }
    }
}

/// Project every record for the recommendation request
#[must_use]
pub fn project(records: &[Repository]) -> Vec<RepoContext<'_>> {
    records.iter().map(RepoContext::from).collect()
}
