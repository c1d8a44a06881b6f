// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Pick command - ask Gemini for the best saved repository for a vibe

use super::Context;
use crate::ai::gemini::GeminiClient;
use crate::error::RECOMMENDATION_ALERT;
use crate::render::{card, EMPTY_VAULT_MESSAGE};
use crate::workflow::{PickOutcome, PickPanel, RecommendWorkflow};
use anyhow::{Context as _, Result};
use serde_json::json;

/// Run the pick command
pub async fn run(ctx: &Context, vibe: &[String]) -> Result<()> {
    let vault = ctx.open_vault();

    let client = GeminiClient::new(ctx.config.gemini()).context("Failed to initialise the Gemini client")?;
    let workflow = RecommendWorkflow::new(&client);
    let mut panel = PickPanel::new(vibe.join(" "));

    match workflow.run(&vault, &mut panel).await {
        PickOutcome::Skipped => {
            if ctx.json {
                println!("{}", json!({ "status": "skipped" }));
            } else {
                println!("Tell me what you are in the mood for, e.g. 'a Rust library for CLI tools'.");
            }
        }
        PickOutcome::EmptyVault => {
            if ctx.json {
                println!("{}", json!({ "status": "empty" }));
            } else {
                println!("{EMPTY_VAULT_MESSAGE}");
            }
        }
        PickOutcome::Matched(pick) => {
            if ctx.json {
                let out = json!({ "status": "matched", "reason": pick.reason, "record": pick.record });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("AI Suggestion");
                println!("\"{}\"", pick.reason);
                println!();
                print!("{}", card(&pick.record, ctx.color));
            }
        }
        PickOutcome::NoMatch => {
            if ctx.json {
                println!("{}", json!({ "status": "no_match" }));
            } else {
                println!("No recommendation this time. Try describing it differently.");
            }
        }
        PickOutcome::Failed => {
            let alert = panel.alert.unwrap_or_else(|| RECOMMENDATION_ALERT.to_string());
            anyhow::bail!(alert);
        }
    }

    Ok(())
}
