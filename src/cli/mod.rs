//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the Vidal client using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Vidal - drug database lookups and patient alerts
#[derive(Parser, Debug)]
#[command(name = "vidal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vidal.toml", env = "VIDAL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VIDAL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a medication, pathology or allergy
    Lookup(commands::lookup::LookupArgs),

    /// Fetch drug-interaction alerts for a patient
    Alerts(commands::alerts::AlertsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
