//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::models::ApiMode;

/// Flags win over the environment and the config file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ghwrapped")]
#[command(version)]
#[command(about = "Your year on GitHub, wrapped in the terminal", long_about = None)]
pub struct Args {
    /// GitHub username (defaults to "username" in the config file)
    pub username: Option<String>,

    /// Year to wrap (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// GitHub token (otherwise GITHUB_TOKEN, GH_TOKEN, config file, `gh auth token`)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// API strategy
    #[arg(long, value_enum, value_name = "MODE")]
    pub api: Option<ApiMode>,

    /// Print a plain-text summary instead of starting the TUI
    #[arg(long, conflicts_with_all = ["json", "export"])]
    pub summary: bool,

    /// Print the statistics as JSON
    #[arg(long, conflicts_with = "export")]
    pub json: bool,

    /// Write the share card and exit
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub export: Option<ExportFormat>,

    /// Directory for exported cards
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Offset for hour and weekday statistics, e.g. +02:00 or -05:30
    #[arg(long, value_name = "+HH:MM", allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Number of languages to show
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Maximum pages per paginated REST endpoint
    #[arg(long, value_name = "N")]
    pub page_cap: Option<u32>,

    /// Maximum repositories inspected for languages and commits
    #[arg(long, value_name = "N")]
    pub repo_limit: Option<usize>,

    /// Persist username, API mode, export dir, offset and top N to the config file
    #[arg(long)]
    pub save_config: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}
