// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! List command - show saved repositories, optionally filtered

use super::Context;
use crate::render::{card, discoveries, EMPTY_VAULT_MESSAGE, NO_MATCHES_MESSAGE};
use anyhow::Result;

/// Run the list command
pub fn run(ctx: &Context, search: Option<String>) -> Result<()> {
    let mut vault = ctx.open_vault();
    if let Some(query) = search {
        vault.set_search(query)?;
    }
    let visible = vault.visible();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{}", discoveries(vault.collection().len()));

    if vault.collection().is_empty() {
        println!("{EMPTY_VAULT_MESSAGE}");
    } else if visible.is_empty() {
        println!("{NO_MATCHES_MESSAGE}");
    } else {
        for record in &visible {
            println!();
            print!("{}", card(record, ctx.color));
        }
    }

    Ok(())
}
