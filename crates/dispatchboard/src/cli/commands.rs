//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::ShipmentStatus;
use crate::views::OutputFormat;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show shipments with this status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Shipment id
    pub id: String,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Open command arguments.
#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Route path, e.g. "/" or "/shipments/SHP-1001"
    pub path: String,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Assign command arguments.
#[derive(Debug, Args)]
pub struct AssignCommand {
    /// Shipment to assign
    pub shipment_id: String,

    /// Driver to assign to the shipment
    pub driver_id: String,

    /// Print the updated shipment after a successful assignment
    #[arg(long)]
    pub show: bool,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Drivers command arguments.
#[derive(Debug, Args)]
pub struct DriversCommand {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
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

    /// Validate configuration and the dataset it points to
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Shipment status argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Shipments with a driver
    Assigned,
    /// Shipments without a driver
    Unassigned,
}

impl From<StatusArg> for ShipmentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Assigned => Self::Assigned,
            StatusArg::Unassigned => Self::NotAssigned,
        }
    }
}
