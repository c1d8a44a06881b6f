// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Add-entry workflow: validate a link, analyze it, save the new record
//!
//! ```text
//! Idle -> Validating -> Analyzing -> Committing -> Idle
//!            |              |
//!            v              v
//!          Idle          Failed
//! ```
//!
//! A validation failure returns to `Idle` with a field error. An analysis
//! failure lands in `Failed`. In both cases the form keeps its values.

use super::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::ai::RepoAnalyzer;
use crate::error::{VaultError, VaultResult};
use crate::store::Storage;
use crate::types::{Analysis, Forge, Repository};
use crate::vault::Vault;
use tracing::{debug, info};

/// Inline message for links that are not on a supported forge
pub const INVALID_URL_MESSAGE: &str =
    "Please provide a valid repository link (github.com, gitlab.com, codeberg.org or bitbucket.org)";

/// A structurally valid repository link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRepoUrl {
    /// Trimmed input
    pub url: String,
    /// Hosting service
    pub forge: Forge,
    /// First path segment, empty if missing
    pub owner: String,
    /// Second path segment, empty if missing
    pub name: String,
}

/// Validate a repository link and derive owner and name from its path.
///
/// Only the host marker is checked. Missing path segments become empty
/// strings rather than errors.
pub fn parse_repo_url(input: &str) -> VaultResult<ParsedRepoUrl> {
    let url = input.trim();
    let forge = Forge::from_url(url).ok_or_else(|| VaultError::InvalidUrl {
        url: url.to_string(),
        message: INVALID_URL_MESSAGE.to_string(),
    })?;

    // Everything after "<host>/" (or "<host>:" for scp-style remotes)
    let host = forge.host();
    let after_host = url
        .find(host)
        .map_or("", |pos| &url[pos + host.len()..]);
    let path = after_host
        .strip_prefix('/')
        .or_else(|| after_host.strip_prefix(':'))
        .unwrap_or("");

    let mut segments = path.split('/');
    let owner = segments.next().unwrap_or_default().to_string();
    let name = segments.next().unwrap_or_default().to_string();

    Ok(ParsedRepoUrl {
        url: url.to_string(),
        forge,
        owner,
        name,
    })
}

// =============================================================================
// Form state
// =============================================================================

/// Where the add-entry workflow currently is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddPhase {
    /// Waiting for input
    #[default]
    Idle,
    /// Checking the link
    Validating,
    /// Waiting on the analysis call
    Analyzing,
    /// Saving the new record
    Committing,
    /// The analysis (or save) failed; user may resubmit
    Failed {
        /// Generic retry prompt
        message: String,
    },
}

/// The add-entry form and its workflow state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    /// Repository link as typed
    pub url: String,
    /// Optional free-text notes
    pub notes: String,
    /// Whether the form is showing
    pub open: bool,
    /// Workflow phase
    pub phase: AddPhase,
    /// Inline error on the URL field
    pub field_error: Option<String>,
}

impl EntryForm {
    /// An open form with the given values
    pub fn new(url: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            notes: notes.into(),
            open: true,
            ..Self::default()
        }
    }

    /// Whether a submission is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, AddPhase::Validating | AddPhase::Analyzing | AddPhase::Committing)
    }

    fn transition(&mut self, phase: AddPhase) {
        debug!("Add entry: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn clear_and_close(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Workflow
// =============================================================================

/// Runs the add-entry steps against an analyzer, id source and clock
pub struct AddEntryWorkflow<'a> {
    analyzer: &'a dyn RepoAnalyzer,
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock,
}

impl<'a> AddEntryWorkflow<'a> {
    /// Workflow with random ids and the system clock
    pub fn new(analyzer: &'a dyn RepoAnalyzer) -> Self {
        Self {
            analyzer,
            ids: &UuidGenerator,
            clock: &SystemClock,
        }
    }

    /// Replace the id source
    #[must_use]
    pub fn with_ids(mut self, ids: &'a dyn IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Submit `form`, saving the analyzed record into `vault`.
    ///
    /// On success the form is cleared and closed and the saved record is
    /// returned. On failure the form stays open with its values and the
    /// error is returned; an invalid link never reaches the analyzer.
    pub async fn submit<S: Storage>(
        &self,
        vault: &mut Vault<S>,
        form: &mut EntryForm,
    ) -> VaultResult<Repository> {
        form.field_error = None;
        form.transition(AddPhase::Validating);

        let parsed = match parse_repo_url(&form.url) {
            Ok(parsed) => parsed,
            Err(err) => {
                form.field_error = Some(err.user_message());
                form.transition(AddPhase::Idle);
                return Err(err);
            }
        };

        form.transition(AddPhase::Analyzing);
        let analysis = match self.analyzer.analyze(&parsed.url, &form.notes).await {
            Ok(analysis) => analysis,
            Err(err) => {
                form.transition(AddPhase::Failed {
                    message: err.user_message(),
                });
                return Err(err);
            }
        };

        form.transition(AddPhase::Committing);
        let newest = vault.collection().newest().map(|r| r.added_at);
        let record = self.build_record(parsed, &form.notes, analysis, newest);

        if let Err(err) = vault.add(record.clone()) {
            form.transition(AddPhase::Failed {
                message: err.user_message(),
            });
            return Err(err);
        }

        info!("Saved {} as {}", record.url, record.id);
        form.clear_and_close();
        Ok(record)
    }

    /// Fold an analysis into a new record.
    ///
    /// `addedAt` never goes below `newest_added_at`, so the collection's
    /// timestamps stay non-decreasing even if the clock steps back.
    #[must_use]
    pub fn build_record(
        &self,
        parsed: ParsedRepoUrl,
        notes: &str,
        analysis: Analysis,
        newest_added_at: Option<i64>,
    ) -> Repository {
        let notes = notes.trim();
        let description = if notes.is_empty() {
            analysis.summary.clone()
        } else {
            notes.to_string()
        };
        let now = self.clock.now_millis();

        Repository {
            id: self.ids.next_id(),
            url: parsed.url,
            name: parsed.name,
            owner: parsed.owner,
            description,
            stars: analysis.estimated_stars,
            forks: 0,
            language: analysis.primary_language,
            topics: analysis.topics,
            ai_summary: analysis.summary,
            use_cases: analysis.use_cases,
            difficulty: analysis.difficulty,
            added_at: newest_added_at.map_or(now, |newest| now.max(newest)),
            image_url: None,
        }
    }
}
