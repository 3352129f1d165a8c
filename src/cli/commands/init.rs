//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::exit_code;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vidal.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Vidal client configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_code::CONFIGURATION);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your Vidal app id", self.output);
                println!("  2. Set VIDAL_APP_KEY in your environment or a .env file");
                println!("  3. Validate configuration: vidal validate-config");
                println!("  4. Try a lookup: vidal lookup icd10 I10");
                println!();
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(exit_code::FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Vidal Client Configuration File

[application]
log_level = "info"

[service]
base_url = "http://api-sa.vidal.fr/rest/api/"
app_id = "your-app-id"
app_key = "${VIDAL_APP_KEY}"
timeout_seconds = 30
tls_verify = true

[logging]
local_enabled = true
local_path = "/var/log/vidal"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Vidal Client Configuration File
#
# Values of the form ${NAME} are replaced with environment variables when the
# file is loaded. Any setting can also be overridden with an environment
# variable named VIDAL_<SECTION>_<KEY>, for example:
#
#   VIDAL_SERVICE_APP_KEY=...        overrides [service] app_key
#   VIDAL_APPLICATION_LOG_LEVEL=debug

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[service]
# Vidal REST endpoint. Every call is a sub-path of this URL.
base_url = "http://api-sa.vidal.fr/rest/api/"

# Credentials issued by Vidal, appended to every request as app_id/app_key
app_id = "your-app-id"
app_key = "${VIDAL_APP_KEY}"

# Request timeout in seconds
timeout_seconds = 30

# Set to false only for test servers with self-signed certificates
tls_verify = true

[logging]
# JSON log files in addition to console output on stderr
local_enabled = true
local_path = "/var/log/vidal"

# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VidalConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "vidal.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "vidal.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generated_configs_parse() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: VidalConfig = toml::from_str(&content).unwrap();
            assert_eq!(config.service.app_id, "your-app-id");
            assert!(config.validate().is_ok());
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("vidal.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), exit_code::CONFIGURATION);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs {
            force: true,
            ..args
        };
        assert_eq!(args.execute().await.unwrap(), exit_code::SUCCESS);
        assert!(fs::read_to_string(&output).unwrap().contains("[service]"));
    }
}
