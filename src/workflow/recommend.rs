// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Recommendation workflow: ask the model for one saved record matching a vibe

use crate::ai::Recommender;
use crate::error::RECOMMENDATION_ALERT;
use crate::store::Storage;
use crate::types::Repository;
use crate::vault::Vault;
use tracing::{debug, info, warn};

/// A resolved recommendation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    /// The chosen record, as currently saved
    pub record: Repository,
    /// The model's justification
    pub reason: String,
}

/// How a recommendation request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    /// Blank vibe; nothing was done
    Skipped,
    /// No saved records to choose from; the model was not asked
    EmptyVault,
    /// The model chose a saved record
    Matched(Pick),
    /// The model answered with an id that is not in the vault
    NoMatch,
    /// The request failed; the panel shows a generic alert
    Failed,
}

/// Recommendation screen state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickPanel {
    /// Free-text request
    pub vibe: String,
    /// Whether a request is in flight
    pub pending: bool,
    /// Last successful pick
    pub recommendation: Option<Pick>,
    /// User-facing alert from the last failure
    pub alert: Option<String>,
}

impl PickPanel {
    /// Panel holding `vibe`
    pub fn new(vibe: impl Into<String>) -> Self {
        Self {
            vibe: vibe.into(),
            ..Self::default()
        }
    }
}

/// Runs recommendation requests through a [`Recommender`]
pub struct RecommendWorkflow<'a> {
    recommender: &'a dyn Recommender,
}

impl<'a> RecommendWorkflow<'a> {
    /// Workflow backed by `recommender`
    pub fn new(recommender: &'a dyn Recommender) -> Self {
        Self { recommender }
    }

    /// Ask for a pick for `panel.vibe` among the vault's records.
    ///
    /// `pending` is set while the request runs and cleared on every path.
    pub async fn run<S: Storage>(&self, vault: &Vault<S>, panel: &mut PickPanel) -> PickOutcome {
        let vibe = panel.vibe.trim().to_string();
        if vibe.is_empty() {
            return PickOutcome::Skipped;
        }
        if vault.collection().is_empty() {
            debug!("Vault is empty; not asking for a pick");
            return PickOutcome::EmptyVault;
        }

        panel.pending = true;
        panel.recommendation = None;
        panel.alert = None;

        let records = vault.collection().to_vec();
        let outcome = match self.recommender.recommend(&records, &vibe).await {
            Ok(answer) => match vault.collection().get(&answer.repo_id) {
                Some(record) => {
                    info!("Picked {} for {:?}", record.full_name(), vibe);
                    let pick = Pick {
                        record: record.clone(),
                        reason: answer.reason,
                    };
                    panel.recommendation = Some(pick.clone());
                    PickOutcome::Matched(pick)
                }
                None => {
                    debug!("Model picked unknown id {}", answer.repo_id);
                    PickOutcome::NoMatch
                }
            },
            Err(err) => {
                warn!("{}", err);
                panel.alert = Some(RECOMMENDATION_ALERT.to_string());
                PickOutcome::Failed
            }
        };

        panel.pending = false;
        outcome
    }
}
