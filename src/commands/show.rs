// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Show command - print a single record

use super::Context;
use crate::render::card;
use anyhow::Result;

/// Run the show command
pub fn run(ctx: &Context, id: &str) -> Result<()> {
    let vault = ctx.open_vault();
    let record = vault
        .collection()
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("No record with id {}", id))?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print!("{}", card(record, ctx.color));
    }
    Ok(())
}
