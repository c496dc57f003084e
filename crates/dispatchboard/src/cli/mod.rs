//! Command-line interface for dispatchboard.
//!
//! This module provides the CLI structure for the `dispatch` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AssignCommand, ConfigCommand, DriversCommand, ListCommand, OpenCommand, ShowCommand,
    StatsCommand, StatusArg,
};

/// dispatch - View shipments and assign drivers
///
/// Loads the shipment dataset into an in-memory store for the duration of
/// one command, or of one interactive session.
#[derive(Debug, Parser)]
#[command(name = "dispatch")]
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
    /// Show the shipment list
    List(ListCommand),

    /// Show one shipment
    Show(ShowCommand),

    /// Navigate to a route path
    Open(OpenCommand),

    /// Assign a driver to a shipment
    Assign(AssignCommand),

    /// Show drivers
    Drivers(DriversCommand),

    /// Show shipment counters
    Stats(StatsCommand),

    /// Start an interactive session
    Session,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::OutputFormat;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Stats(StatsCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "dispatch");
    }

    #[test]
    fn test_verbosity() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_filter() {
        let cli = Cli::try_parse_from(["dispatch", "list", "--status", "unassigned"]).unwrap();
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.status, Some(StatusArg::Unassigned));
        assert!(cmd.format.is_none());
    }

    #[test]
    fn test_parse_show_json() {
        let cli = Cli::try_parse_from(["dispatch", "show", "SHP-1001", "-f", "json"]).unwrap();
        let Command::Show(cmd) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(cmd.id, "SHP-1001");
        assert_eq!(cmd.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_assign() {
        let cli = Cli::try_parse_from(["dispatch", "assign", "S1", "D1", "--show"]).unwrap();
        let Command::Assign(cmd) = cli.command else {
            panic!("expected assign command");
        };
        assert_eq!(cmd.shipment_id, "S1");
        assert_eq!(cmd.driver_id, "D1");
        assert!(cmd.show);
    }

    #[test]
    fn test_parse_assign_requires_driver() {
        assert!(Cli::try_parse_from(["dispatch", "assign", "S1"]).is_err());
    }

    #[test]
    fn test_parse_session() {
        let cli = Cli::try_parse_from(["dispatch", "session"]).unwrap();
        assert!(matches!(cli.command, Command::Session));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["dispatch", "-c", "/custom/config.toml", "stats"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["dispatch", "config", "validate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: None })
        ));
    }
}
