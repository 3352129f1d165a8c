//! Configuration management for the Vidal client.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The client uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VIDAL_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vidal_client::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vidal.toml")?;
//!
//! println!("Vidal endpoint: {}", config.service.base_url);
//! println!("Log level: {}", config.application.log_level);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ServiceConfig`] - Vidal endpoint, credentials, timeout and TLS
//! - [`LoggingConfig`] - Local log file settings
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [service]
//! base_url = "http://api-sa.vidal.fr/rest/api/"
//! app_id = "my-app-id"
//! app_key = "${VIDAL_APP_KEY}"
//! timeout_seconds = 30
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/vidal"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{ApplicationConfig, LoggingConfig, ServiceConfig, VidalConfig};
pub use secret::{secret_string, SecretString, SecretValue};
