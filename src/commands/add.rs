// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Add command - analyze a repository link and save it to the vault

use super::Context;
use crate::ai::gemini::GeminiClient;
use crate::render::card;
use crate::workflow::{AddEntryWorkflow, AddPhase, EntryForm};
use anyhow::{Context as _, Result};
use tracing::info;

/// Run the add command
pub async fn run(ctx: &Context, url: &str, notes: Option<String>) -> Result<()> {
    let mut vault = ctx.open_vault();
    let client = GeminiClient::new(ctx.config.gemini()).context("Failed to initialise the Gemini client")?;
    let workflow = AddEntryWorkflow::new(&client);

    let mut form = EntryForm::new(url, notes.unwrap_or_default());
    info!("Consulting Gemini about {}", form.url.trim());

    match workflow.submit(&mut vault, &mut form).await {
        Ok(record) => {
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Saved to vault ({} total):", vault.collection().len());
                println!();
                print!("{}", card(&record, ctx.color));
            }
            Ok(())
        }
        Err(err) => {
            let message = match (&form.field_error, &form.phase) {
                (Some(field_error), _) => field_error.clone(),
                (None, AddPhase::Failed { message }) => message.clone(),
                _ => err.user_message(),
            };
            anyhow::bail!(message)
        }
    }
}
