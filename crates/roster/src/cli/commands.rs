//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::reorder::Direction;

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Roster file (JSON list, or object with a `members`/`data` list)
    pub file: PathBuf,

    /// Text to look for in names, departments, roles and skills
    #[arg(default_value = "")]
    pub query: String,

    /// Only show leadership
    #[arg(short = 'L', long)]
    pub leaders: bool,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Browse command arguments.
#[derive(Debug, Args)]
pub struct BrowseCommand {
    /// Roster file
    pub file: PathBuf,

    /// Narrow the page to members matching this text
    #[arg(short = 's', long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Roster file
    pub file: PathBuf,

    /// Member identifier
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Reorder command arguments.
#[derive(Debug, Args)]
pub struct ReorderCommand {
    /// JSON list file (guidelines, prizes, ...)
    pub file: PathBuf,

    /// Zero-based position of the item to move
    pub index: usize,

    /// Which way to move it
    #[arg(value_enum)]
    pub direction: DirectionArg,

    /// Write the result back to the file instead of printing it
    #[arg(short, long)]
    pub in_place: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Direction argument for reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Towards the front
    Up,
    /// Towards the back
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Self::Up,
            DirectionArg::Down => Self::Down,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
