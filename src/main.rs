// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Repovault CLI - bookmark vault for code repositories

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use repovault::commands::{self, Context};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "repovault")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error logs)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "REPOVAULT_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Data directory override
    #[arg(long, env = "REPOVAULT_DATA_DIR", global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository link with Gemini and save it
    Add {
        /// Repository URL (github.com, gitlab.com, codeberg.org, bitbucket.org)
        url: String,

        /// Personal notes; used as the description when given
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List saved repositories, most recent first
    #[command(visible_alias = "ls")]
    List {
        /// Case-insensitive search over name, owner and summary
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one saved repository
    Show {
        /// Record id
        id: String,
    },

    /// Permanently delete a saved repository
    #[command(visible_aliases = ["rm", "delete"])]
    Remove {
        /// Record id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Ask Gemini to pick one saved repository for your mood
    Pick {
        /// What you feel like exploring
        vibe: Vec<String>,
    },

    /// Show or change the theme preference (light, dark, toggle)
    Theme {
        /// New value; omit to print the current one
        value: Option<String>,
    },

    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = repovault::config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    // Initialize logging; RUST_LOG wins over flags and config
    let level = match cli.verbose {
        0 if cli.quiet => "error".to_string(),
        0 => config.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context::new(config, cli.json, !cli.no_color);

    // Execute command
    match cli.command {
        Commands::Add { url, notes } => commands::add::run(&ctx, &url, notes).await,
        Commands::List { search } => commands::list::run(&ctx, search),
        Commands::Show { id } => commands::show::run(&ctx, &id),
        Commands::Remove { id, yes } => commands::remove::run(&ctx, &id, yes),
        Commands::Pick { vibe } => commands::pick::run(&ctx, &vibe).await,
        Commands::Theme { value } => commands::theme::run(&ctx, value),
        Commands::Config => commands::config::run(&ctx),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
