//! Command-line interface for roster.
//!
//! This module provides the CLI structure for the `roster` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BrowseCommand, ConfigCommand, DirectionArg, OutputFormat, ReorderCommand, SearchCommand,
    ShowCommand,
};

use crate::logging::Verbosity;

/// roster - Browse and search a club's member directory
///
/// Reads a roster export, derives each member's primary department, role and
/// leadership status, and prints the team page or search results.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search members by name, department, role or skill
    Search(SearchCommand),

    /// Print the team page: leadership first, then departments
    Browse(BrowseCommand),

    /// Show one member's profile
    Show(ShowCommand),

    /// Move an item of a JSON list up or down
    Reorder(ReorderCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Config(ConfigCommand::Path),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "roster");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["roster", "search", "team.json", "web dev"]).unwrap();
        let Command::Search(cmd) = cli.command else {
            panic!("Expected search command");
        };
        assert_eq!(cmd.file, PathBuf::from("team.json"));
        assert_eq!(cmd.query, "web dev");
        assert_eq!(cmd.format, OutputFormat::Table);
        assert!(cmd.limit.is_none());
    }

    #[test]
    fn test_parse_search_without_query() {
        let cli = Cli::try_parse_from(["roster", "search", "team.json", "-L", "-l", "5"]).unwrap();
        let Command::Search(cmd) = cli.command else {
            panic!("Expected search command");
        };
        assert!(cmd.query.is_empty());
        assert!(cmd.leaders);
        assert_eq!(cmd.limit, Some(5));
    }

    #[test]
    fn test_parse_browse() {
        let cli =
            Cli::try_parse_from(["roster", "browse", "team.json", "-s", "design", "-f", "json"])
                .unwrap();
        let Command::Browse(cmd) = cli.command else {
            panic!("Expected browse command");
        };
        assert_eq!(cmd.query.as_deref(), Some("design"));
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["roster", "show", "team.json", "64f1"]).unwrap();
        assert!(matches!(cli.command, Command::Show(ShowCommand { ref id, .. }) if id == "64f1"));
    }

    #[test]
    fn test_parse_reorder() {
        let cli = Cli::try_parse_from(["roster", "reorder", "prizes.json", "2", "up", "-i"]).unwrap();
        let Command::Reorder(cmd) = cli.command else {
            panic!("Expected reorder command");
        };
        assert_eq!(cmd.index, 2);
        assert_eq!(cmd.direction, DirectionArg::Up);
        assert!(cmd.in_place);
    }

    #[test]
    fn test_parse_reorder_rejects_bad_direction() {
        assert!(Cli::try_parse_from(["roster", "reorder", "prizes.json", "2", "left"]).is_err());
    }

    #[test]
    fn test_parse_with_global_flags() {
        let cli =
            Cli::try_parse_from(["roster", "-c", "/custom/config.toml", "-vv", "config", "path"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.verbose, 2);
    }
}
