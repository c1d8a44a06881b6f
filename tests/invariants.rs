// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Invariant tests for the vault collection and store
//!
//! These tests verify critical invariants:
//! 1. Ordering - new records always land at the front
//! 2. Idempotence - removing twice equals removing once
//! 3. Purity - filtering never changes the collection
//! 4. Persistence fidelity - save then load returns the same records

use proptest::prelude::*;
use repovault::collection::{matches_query, Collection};
use repovault::store::{FileStorage, MemoryStorage, VaultStore, RECORDS_KEY};
use repovault::types::{Difficulty, Repository, Theme};
use repovault::vault::Vault;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

fn make_record(id: &str, owner: &str, name: &str, summary: &str) -> Repository {
    Repository {
        id: id.into(),
        url: format!("https://github.com/{owner}/{name}"),
        name: name.into(),
        owner: owner.into(),
        description: summary.into(),
        stars: 100,
        forks: 0,
        language: "Rust".into(),
        topics: vec!["test".into()],
        ai_summary: summary.into(),
        use_cases: vec!["testing".into()],
        difficulty: Difficulty::Beginner,
        added_at: 1_700_000_000_000,
        image_url: None,
    }
}

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Beginner),
        Just(Difficulty::Intermediate),
        Just(Difficulty::Advanced),
    ]
}

prop_compose! {
    fn record_strategy()(
        id in "[a-f0-9]{8}",
        owner in "[a-z][a-z0-9-]{0,10}",
        name in "[a-zA-Z][a-zA-Z0-9_.-]{0,15}",
        summary in "[ -~]{0,40}",
        stars in any::<u64>(),
        topics in prop::collection::vec("[a-z]{1,8}", 0..4),
        use_cases in prop::collection::vec("[ -~]{1,20}", 0..3),
        difficulty in difficulty_strategy(),
        added_at in 0i64..4_000_000_000_000,
        image_url in prop::option::of("https://img\\.example/[a-z]{1,6}\\.png"),
    ) -> Repository {
        Repository {
            id,
            url: format!("https://github.com/{owner}/{name}"),
            name,
            owner,
            description: summary.clone(),
            stars,
            forks: 0,
            language: "Rust".into(),
            topics,
            ai_summary: summary,
            use_cases,
            difficulty,
            added_at,
            image_url,
        }
    }
}

fn ids(records: &[Repository]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_added_record_is_first_match_for_its_name() {
    let mut collection = Collection::new();
    collection.add(make_record("1", "rust-lang", "cargo", "Package manager"));
    collection.add(make_record("2", "tokio-rs", "tokio", "Async runtime"));
    collection.add(make_record("3", "facebook", "react", "UI library"));

    let hits = collection.search("react");
    assert_eq!(hits[0].id, "3");
}

proptest! {
    #[test]
    fn prop_add_then_search_by_name_finds_it_first(
        existing in prop::collection::vec(record_strategy(), 0..8),
        mut new_record in record_strategy(),
    ) {
        new_record.id = "fresh-id".into();
        let mut collection = Collection::from_records(existing);
        collection.add(new_record.clone());

        let hits = collection.search(&new_record.name);
        prop_assert!(!hits.is_empty());
        prop_assert_eq!(&hits[0], &new_record);
    }

    #[test]
    fn prop_remove_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..10),
        pick in any::<prop::sample::Index>(),
    ) {
        let target = if records.is_empty() {
            "missing".to_string()
        } else {
            records[pick.index(records.len())].id.clone()
        };

        let mut once = Collection::from_records(records.clone());
        once.remove(&target);

        let mut twice = Collection::from_records(records);
        twice.remove(&target);
        twice.remove(&target);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_filter_does_not_mutate(
        records in prop::collection::vec(record_strategy(), 0..10),
        first in "[a-z]{0,3}",
        second in "[A-Z]{0,3}",
    ) {
        let collection = Collection::from_records(records.clone());

        let _ = collection.search(&first);
        let _ = collection.filter(|r| r.stars > 1000);
        let _ = collection.search(&second);

        prop_assert_eq!(collection.to_vec(), records);
    }

    #[test]
    fn prop_search_output_preserves_order(
        records in prop::collection::vec(record_strategy(), 0..12),
        query in "[a-z]{0,2}",
    ) {
        let collection = Collection::from_records(records.clone());
        let hits = collection.search(&query);

        let needle = query.to_lowercase();
        let expected: Vec<_> = records
            .into_iter()
            .filter(|r| matches_query(r, &needle))
            .collect();
        prop_assert_eq!(hits, expected);
    }

    #[test]
    fn prop_save_load_round_trip(records in prop::collection::vec(record_strategy(), 0..10)) {
        let mut store = VaultStore::new(MemoryStorage::new());
        store.save(&records).unwrap();
        prop_assert_eq!(store.load(), records);
    }
}

// =============================================================================
// Search scenarios
// =============================================================================

#[test]
fn test_search_is_case_insensitive() {
    let mut collection = Collection::new();
    collection.add(make_record("a", "acme", "rust-cli-kit", "Argument parsing"));
    collection.add(make_record("b", "acme", "web-app", "Frontend starter"));

    assert_eq!(ids(&collection.search("cli")), ["a"]);
    assert_eq!(ids(&collection.search("CLI")), ["a"]);
}

#[test]
fn test_search_matches_owner_and_summary() {
    let mut collection = Collection::new();
    collection.add(make_record("a", "BurntSushi", "ripgrep", "Recursive line search"));
    collection.add(make_record("b", "sharkdp", "fd", "Simple fast find"));

    assert_eq!(ids(&collection.search("burntsushi")), ["a"]);
    assert_eq!(ids(&collection.search("FAST FIND")), ["b"]);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_first_add_persists_one_entry() {
    let dir = TempDir::new().unwrap();
    let mut vault = Vault::open(FileStorage::new(dir.path()));
    assert!(vault.collection().is_empty());

    let react = make_record("r1", "facebook", "react", "UI library");
    vault.add(react.clone()).unwrap();

    assert_eq!(vault.collection().to_vec(), vec![react.clone()]);
    let reopened = VaultStore::new(FileStorage::new(dir.path()));
    assert_eq!(reopened.load(), vec![react]);
}

#[test]
fn test_corrupt_file_recovers_to_empty_vault() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    std::fs::write(storage.path_for(RECORDS_KEY), "[{\"id\": 42,").unwrap();

    let vault = Vault::open(storage);
    assert!(vault.collection().is_empty());
}

#[test]
fn test_stored_difficulty_is_coerced() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    let mut record = serde_json::to_value(make_record("x", "o", "n", "s")).unwrap();
    record["difficulty"] = "Pretty Hard".into();
    record["stars"] = serde_json::json!(1234.4);
    std::fs::write(
        storage.path_for(RECORDS_KEY),
        serde_json::to_string(&vec![record]).unwrap(),
    )
    .unwrap();

    let loaded = VaultStore::new(storage).load();
    assert_eq!(loaded[0].difficulty, Difficulty::Advanced);
    assert_eq!(loaded[0].stars, 1234);
}

#[test]
fn test_theme_absent_defaults_to_dark() {
    let dir = TempDir::new().unwrap();
    let store = VaultStore::new(FileStorage::new(dir.path()));
    assert_eq!(store.load_theme(), Theme::Dark);
}

#[test]
fn test_theme_and_records_are_independent_keys() {
    let mut vault = Vault::open(MemoryStorage::new());
    vault.add(make_record("1", "o", "n", "s")).unwrap();
    vault.set_theme(Theme::Light).unwrap();

    let store = vault.store();
    assert_eq!(store.load().len(), 1);
    assert_eq!(store.load_theme(), Theme::Light);
}
