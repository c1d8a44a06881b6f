// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Theme command - show or change the display theme preference

use super::Context;
use crate::types::Theme;
use anyhow::Result;

/// Run the theme command
pub fn run(ctx: &Context, value: Option<String>) -> Result<()> {
    let mut vault = ctx.open_vault();

    let theme = match value.as_deref() {
        None => vault.state().theme,
        Some("toggle") => vault.toggle_theme()?,
        Some(other) => {
            let theme = Theme::parse(other)
                .ok_or_else(|| anyhow::anyhow!("Unknown theme: {}. Valid: light, dark, toggle", other))?;
            vault.set_theme(theme)?;
            theme
        }
    };

    println!("{theme}");
    Ok(())
}
