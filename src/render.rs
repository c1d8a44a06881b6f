// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Plain-text rendering of records for the terminal

use crate::types::{Difficulty, Repository};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Shown when the vault has no records at all
pub const EMPTY_VAULT_MESSAGE: &str =
    "Vault empty. Save repositories with 'repovault add <url>' and let Gemini organize them.";

/// Shown when a search excludes every record
pub const NO_MATCHES_MESSAGE: &str = "No matching results";

/// Compact star count: `999`, `1.5k`, `228.0k`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_stars(stars: u64) -> String {
    if stars > 999 {
        format!("{:.1}k", stars as f64 / 1000.0)
    } else {
        stars.to_string()
    }
}

/// "N Discoveries" header line
#[must_use]
pub fn discoveries(count: usize) -> String {
    format!("{count} Discoveries")
}

fn added_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn difficulty_badge(difficulty: Difficulty, color: bool) -> String {
    let label = difficulty.label();
    if !color {
        return label.to_string();
    }
    match difficulty {
        Difficulty::Beginner => label.green().to_string(),
        Difficulty::Intermediate => label.yellow().to_string(),
        Difficulty::Advanced => label.red().to_string(),
    }
}

/// Multi-line card for one record
#[must_use]
pub fn card(record: &Repository, color: bool) -> String {
    let mut out = String::new();
    let title = record.full_name();
    let title = if color { title.bold().to_string() } else { title };

    let _ = writeln!(out, "{title}  [{}]", record.id);
    let _ = writeln!(
        out,
        "  {} | ★ {} | {} | added {}",
        if record.language.is_empty() { "?" } else { record.language.as_str() },
        format_stars(record.stars),
        difficulty_badge(record.difficulty, color),
        added_date(record.added_at)
    );
    if record.description != record.ai_summary && !record.description.is_empty() {
        let _ = writeln!(out, "  Note: {}", record.description);
    }
    let _ = writeln!(out, "  {}", record.ai_summary);
    if !record.use_cases.is_empty() {
        let _ = writeln!(out, "  Use cases: {}", record.use_cases.join("; "));
    }
    if !record.topics.is_empty() {
        let tags: Vec<_> = record.topics.iter().map(|t| format!("#{t}")).collect();
        let _ = writeln!(out, "  {}", tags.join(" "));
    }
    let url = if color { record.url.dimmed().to_string() } else { record.url.clone() };
    let _ = writeln!(out, "  {url}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(0), "0");
        assert_eq!(format_stars(999), "999");
        assert_eq!(format_stars(1000), "1.0k");
        assert_eq!(format_stars(1500), "1.5k");
        assert_eq!(format_stars(228_000), "228.0k");
    }

    #[test]
    fn test_card_without_color() {
        let record = Repository {
            id: "r1".into(),
            url: "https://github.com/facebook/react".into(),
            name: "react".into(),
            owner: "facebook".into(),
            description: "for work".into(),
            stars: 228_000,
            forks: 0,
            language: "JavaScript".into(),
            topics: vec!["ui".into(), "frontend".into()],
            ai_summary: "A UI library".into(),
            use_cases: vec!["SPAs".into()],
            difficulty: Difficulty::Intermediate,
            added_at: 1_700_000_000_000,
            image_url: None,
        };

        let text = card(&record, false);
        assert!(text.starts_with("facebook/react  [r1]"));
        assert!(text.contains("★ 228.0k"));
        assert!(text.contains("Intermediate"));
        assert!(text.contains("added 2023-11-14"));
        assert!(text.contains("Note: for work"));
        assert!(text.contains("#ui #frontend"));
        assert!(!text.contains('\u{1b}'));
    }
}
