//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Vidal client configuration file.

use super::exit_code;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code::CONFIGURATION);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Vidal Endpoint: {}", config.service.base_url);
        println!("  App Id: {}", config.service.app_id);
        println!("  App Key: [REDACTED]");
        println!("  Timeout: {}s", config.service.timeout_seconds);
        println!("  TLS Verify: {}", config.service.tls_verify);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  Log Files: disabled");
        }
        println!();
        Ok(exit_code::SUCCESS)
    }
}
