// Vidal Client - Vidal drug database lookups and patient alerts
// Copyright (c) 2025 Vidal Client Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use vidal_client::cli::commands::exit_code;
use vidal_client::cli::{Cli, Commands};
use vidal_client::config::{load_config, LoggingConfig};
use vidal_client::logging::{init_logging, LoggingGuard};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code::FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Vidal client");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit_code::FATAL
        }
    };

    process::exit(exit_code);
}

/// Initializes logging from the configuration file when it loads, falling
/// back to console-only output otherwise
fn setup_logging(cli: &Cli) -> vidal_client::domain::Result<LoggingGuard> {
    let console_only = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };

    let (level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("warn".to_string(), console_only.clone()),
    };
    let level = cli.log_level.clone().unwrap_or(level);

    match init_logging(&level, &logging_config) {
        Ok(guard) => Ok(guard),
        // The log directory may not be writable; keep console output
        Err(_) if logging_config.local_enabled => init_logging(&level, &console_only),
        Err(e) => Err(e),
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Lookup(args) => args.execute(&cli.config).await,
        Commands::Alerts(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
