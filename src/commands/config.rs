// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - print the effective configuration

use super::Context;
use anyhow::Result;

/// Run the config command
pub fn run(ctx: &Context) -> Result<()> {
    if ctx.json {
        let mut shown = ctx.config.clone();
        shown.api_key = shown.api_key.as_deref().map(crate::config::mask_secret);
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", ctx.config.to_display_toml()?);
    }
    Ok(())
}
