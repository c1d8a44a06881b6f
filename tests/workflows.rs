// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Add-entry and recommendation workflows against scripted AI clients

use async_trait::async_trait;
use repovault::ai::{RepoAnalyzer, Recommender};
use repovault::error::{VaultError, VaultResult, ANALYSIS_RETRY_MESSAGE, RECOMMENDATION_ALERT};
use repovault::store::{MemoryStorage, Storage};
use repovault::types::{Analysis, Difficulty, Recommendation, Repository};
use repovault::vault::Vault;
use repovault::workflow::{
    AddEntryWorkflow, AddPhase, EntryForm, FixedClock, PickOutcome, PickPanel, RecommendWorkflow,
    SequentialIds,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// =============================================================================
// Scripted clients
// =============================================================================

/// Analyzer that returns a canned result (or fails) and records its calls
struct ScriptedAnalyzer {
    fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedAnalyzer {
    fn ok() -> Self {
        Self { fail: false, calls: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
        Self { fail: true, calls: Mutex::new(Vec::new()) }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RepoAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, url: &str, notes: &str) -> VaultResult<Analysis> {
        self.calls.lock().unwrap().push((url.to_string(), notes.to_string()));
        if self.fail {
            return Err(VaultError::AnalysisFailed { reason: "connection reset".into() });
        }
        Ok(Analysis {
            summary: "A declarative UI library".into(),
            use_cases: vec!["Single-page apps".into(), "Component libraries".into()],
            difficulty: Difficulty::Intermediate,
            primary_language: "JavaScript".into(),
            topics: vec!["ui".into(), "frontend".into()],
            estimated_stars: 228_000,
        })
    }
}

/// Recommender answering with a fixed id (or failing)
struct ScriptedRecommender {
    answer: Option<&'static str>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ScriptedRecommender {
    fn answering(id: &'static str) -> Self {
        Self { answer: Some(id), calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
        Self { answer: None, calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl Recommender for ScriptedRecommender {
    async fn recommend(&self, records: &[Repository], vibe: &str) -> VaultResult<Recommendation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(format!("{}:{}", records.len(), vibe));
        match self.answer {
            Some(id) => Ok(Recommendation { repo_id: id.into(), reason: "Perfect for a rainy day".into() }),
            None => Err(VaultError::RecommendationFailed { reason: "503".into() }),
        }
    }
}

/// Storage with nothing in it that rejects every write
#[derive(Debug)]
struct FullDisk;

impl Storage for FullDisk {
    fn get(&self, _key: &str) -> VaultResult<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> VaultResult<()> {
        Err(VaultError::StoreWrite {
            key: key.to_string(),
            source: std::io::Error::other("disk full"),
        })
    }
}

fn seeded_vault() -> Vault<MemoryStorage> {
    let mut vault = Vault::open(MemoryStorage::new());
    for (id, name) in [("a", "cli-kit"), ("b", "web-app")] {
        vault
            .add(Repository {
                id: id.into(),
                url: format!("https://github.com/acme/{name}"),
                name: name.into(),
                owner: "acme".into(),
                description: String::new(),
                stars: 10,
                forks: 0,
                language: "Rust".into(),
                topics: vec![],
                ai_summary: format!("{name} summary"),
                use_cases: vec![],
                difficulty: Difficulty::Beginner,
                added_at: 2_000,
                image_url: None,
            })
            .unwrap();
    }
    vault
}

// =============================================================================
// Add-entry workflow
// =============================================================================

#[tokio::test]
async fn test_add_entry_success_commits_and_clears_form() {
    let analyzer = ScriptedAnalyzer::ok();
    let ids = SequentialIds::new("rec");
    let clock = FixedClock(1_700_000_000_000);
    let workflow = AddEntryWorkflow::new(&analyzer).with_ids(&ids).with_clock(&clock);

    let mut vault = Vault::open(MemoryStorage::new());
    let mut form = EntryForm::new(" https://github.com/facebook/react ", "");

    let record = workflow.submit(&mut vault, &mut form).await.unwrap();

    assert_eq!(record.id, "rec-1");
    assert_eq!(record.owner, "facebook");
    assert_eq!(record.name, "react");
    assert_eq!(record.url, "https://github.com/facebook/react");
    assert_eq!(record.description, "A declarative UI library");
    assert_eq!(record.stars, 228_000);
    assert_eq!(record.forks, 0);
    assert_eq!(record.language, "JavaScript");
    assert_eq!(record.added_at, 1_700_000_000_000);

    assert_eq!(vault.collection().to_vec(), vec![record.clone()]);
    assert_eq!(vault.store().load(), vec![record]);

    assert_eq!(form, EntryForm::default());
    assert!(!form.open);

    let calls = analyzer.calls.lock().unwrap();
    assert_eq!(calls[0], ("https://github.com/facebook/react".to_string(), String::new()));
}

#[tokio::test]
async fn test_add_entry_rejects_bad_url_before_analysis() {
    let analyzer = ScriptedAnalyzer::ok();
    let workflow = AddEntryWorkflow::new(&analyzer);
    let mut vault = Vault::open(MemoryStorage::new());
    let mut form = EntryForm::new("https://example.com/facebook/react", "keep me");

    let err = workflow.submit(&mut vault, &mut form).await.unwrap_err();

    assert!(matches!(err, VaultError::InvalidUrl { .. }));
    assert_eq!(analyzer.call_count(), 0);
    assert!(vault.collection().is_empty());

    assert_eq!(form.phase, AddPhase::Idle);
    assert!(form.open);
    assert!(form.field_error.is_some());
    assert_eq!(form.url, "https://example.com/facebook/react");
    assert_eq!(form.notes, "keep me");
}

#[tokio::test]
async fn test_add_entry_analysis_failure_keeps_form() {
    let analyzer = ScriptedAnalyzer::failing();
    let workflow = AddEntryWorkflow::new(&analyzer);
    let mut vault = seeded_vault();
    let mut form = EntryForm::new("https://github.com/tokio-rs/tokio", "async stuff");

    let err = workflow.submit(&mut vault, &mut form).await.unwrap_err();

    assert!(matches!(err, VaultError::AnalysisFailed { .. }));
    assert_eq!(analyzer.call_count(), 1);
    assert_eq!(vault.collection().len(), 2);
    assert_eq!(
        form.phase,
        AddPhase::Failed { message: ANALYSIS_RETRY_MESSAGE.to_string() }
    );
    assert!(form.open);
    assert_eq!(form.url, "https://github.com/tokio-rs/tokio");
    assert_eq!(form.notes, "async stuff");
    assert!(form.field_error.is_none());
}

#[tokio::test]
async fn test_add_entry_prepends_with_notes_and_monotonic_time() {
    let analyzer = ScriptedAnalyzer::ok();
    let ids = SequentialIds::new("n");
    // Clock behind the newest record's timestamp
    let clock = FixedClock(1_000);
    let workflow = AddEntryWorkflow::new(&analyzer).with_ids(&ids).with_clock(&clock);
    let mut vault = seeded_vault();

    let mut form = EntryForm::new("https://github.com/facebook/react", "for the side project");
    let record = workflow.submit(&mut vault, &mut form).await.unwrap();

    assert_eq!(record.description, "for the side project");
    assert_eq!(record.ai_summary, "A declarative UI library");
    assert_eq!(record.added_at, 2_000);
    assert_eq!(vault.collection().newest().unwrap().id, "n-1");
    assert_eq!(analyzer.calls.lock().unwrap()[0].1, "for the side project");
}

#[tokio::test]
async fn test_same_url_twice_creates_two_records() {
    let analyzer = ScriptedAnalyzer::ok();
    let workflow = AddEntryWorkflow::new(&analyzer);
    let mut vault = Vault::open(MemoryStorage::new());

    for _ in 0..2 {
        let mut form = EntryForm::new("https://github.com/facebook/react", "");
        workflow.submit(&mut vault, &mut form).await.unwrap();
    }

    let records = vault.collection().to_vec();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].id, records[1].id);
}

#[tokio::test]
async fn test_failed_save_keeps_collection_unchanged_across_retries() {
    let analyzer = ScriptedAnalyzer::ok();
    let workflow = AddEntryWorkflow::new(&analyzer);
    let mut vault = Vault::open(FullDisk);
    let mut form = EntryForm::new("https://github.com/a/b", "");

    for _ in 0..2 {
        let err = workflow.submit(&mut vault, &mut form).await.unwrap_err();
        assert!(matches!(err, VaultError::StoreWrite { .. }));
        assert!(matches!(form.phase, AddPhase::Failed { .. }));
        assert!(form.open);
        assert_eq!(form.url, "https://github.com/a/b");
    }

    assert_eq!(analyzer.call_count(), 2);
    assert!(vault.collection().is_empty());
}

// =============================================================================
// Recommendation workflow
// =============================================================================

#[tokio::test]
async fn test_pick_resolves_known_id() {
    let recommender = ScriptedRecommender::answering("a");
    let workflow = RecommendWorkflow::new(&recommender);
    let vault = seeded_vault();
    let mut panel = PickPanel::new("  something for the terminal ");

    let outcome = workflow.run(&vault, &mut panel).await;

    let pick = match outcome {
        PickOutcome::Matched(pick) => pick,
        other => panic!("expected a match, got {other:?}"),
    };
    assert_eq!(pick.record.name, "cli-kit");
    assert_eq!(pick.reason, "Perfect for a rainy day");
    assert_eq!(panel.recommendation, Some(pick));
    assert!(!panel.pending);
    assert!(panel.alert.is_none());
    assert_eq!(recommender.seen.lock().unwrap()[0], "2:something for the terminal");
}

#[tokio::test]
async fn test_pick_unknown_id_is_silent_no_match() {
    let recommender = ScriptedRecommender::answering("does-not-exist");
    let workflow = RecommendWorkflow::new(&recommender);
    let vault = seeded_vault();
    let mut panel = PickPanel::new("anything");

    assert_eq!(workflow.run(&vault, &mut panel).await, PickOutcome::NoMatch);
    assert!(panel.recommendation.is_none());
    assert!(panel.alert.is_none());
    assert!(!panel.pending);
}

#[tokio::test]
async fn test_pick_failure_sets_generic_alert() {
    let recommender = ScriptedRecommender::failing();
    let workflow = RecommendWorkflow::new(&recommender);
    let vault = seeded_vault();
    let mut panel = PickPanel::new("anything");

    assert_eq!(workflow.run(&vault, &mut panel).await, PickOutcome::Failed);
    assert_eq!(panel.alert.as_deref(), Some(RECOMMENDATION_ALERT));
    assert!(panel.recommendation.is_none());
    assert!(!panel.pending);
}

#[tokio::test]
async fn test_pick_blank_vibe_and_empty_vault_skip_the_client() {
    let recommender = ScriptedRecommender::answering("a");
    let workflow = RecommendWorkflow::new(&recommender);

    let vault = seeded_vault();
    let mut panel = PickPanel::new("   ");
    assert_eq!(workflow.run(&vault, &mut panel).await, PickOutcome::Skipped);

    let empty = Vault::open(MemoryStorage::new());
    let mut panel = PickPanel::new("fun");
    assert_eq!(workflow.run(&empty, &mut panel).await, PickOutcome::EmptyVault);

    assert_eq!(recommender.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_new_pick_clears_previous_result() {
    let vault = seeded_vault();
    let mut panel = PickPanel::new("terminal");

    let hit = ScriptedRecommender::answering("b");
    RecommendWorkflow::new(&hit).run(&vault, &mut panel).await;
    assert!(panel.recommendation.is_some());

    let miss = ScriptedRecommender::answering("zzz");
    RecommendWorkflow::new(&miss).run(&vault, &mut panel).await;
    assert!(panel.recommendation.is_none());
}
