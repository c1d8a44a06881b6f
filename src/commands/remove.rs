// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Remove command - permanently delete a record

use super::Context;
use anyhow::{Context as _, Result};
use std::io::{self, BufRead, Write};

/// Run the remove command
pub fn run(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let mut vault = ctx.open_vault();

    let Some(record) = vault.collection().get(id) else {
        println!("No record with id {id}");
        return Ok(());
    };

    if !yes && !confirm(&format!("Discard this project? ({}) [y/N] ", record.full_name()))? {
        println!("Kept {id}");
        return Ok(());
    }

    if vault.remove(id)? {
        println!("Removed {id}");
    }
    Ok(())
}

/// Ask a yes/no question on the terminal
fn confirm(prompt: &str) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
