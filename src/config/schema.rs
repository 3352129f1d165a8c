//! Configuration schema types
//!
//! This module defines the configuration structure for the Vidal client.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VidalConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Vidal service endpoint and credentials
    pub service: ServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VidalConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.service.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Vidal service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base REST endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Application id issued by Vidal
    pub app_id: String,

    /// Application key issued by Vidal
    /// Stored securely in memory and automatically zeroized on drop
    pub app_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify TLS certificates
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl ServiceConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("service.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("service.base_url must start with http:// or https://".to_string());
        }

        if self.app_id.trim().is_empty() {
            return Err("service.app_id cannot be empty".to_string());
        }

        if self.app_key.expose_secret().is_empty() {
            return Err("service.app_key cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("service.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    crate::adapters::vidal::DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_local_path() -> String {
    "/var/log/vidal".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn service() -> ServiceConfig {
        ServiceConfig {
            base_url: "https://api-sa.vidal.fr/rest/api/".to_string(),
            app_id: "app".to_string(),
            app_key: secret_string("key".to_string()),
            timeout_seconds: 30,
            tls_verify: true,
        }
    }

    fn config() -> VidalConfig {
        VidalConfig {
            application: ApplicationConfig::default(),
            service: service(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = config();
        config.application.log_level = "verbose".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_service_validation() {
        let mut service_config = service();
        service_config.base_url = "api-sa.vidal.fr".to_string();
        assert!(service_config.validate().is_err());

        let mut service_config = service();
        service_config.app_id = "  ".to_string();
        assert!(service_config
            .validate()
            .unwrap_err()
            .contains("service.app_id"));

        let mut service_config = service();
        service_config.app_key = secret_string(String::new());
        assert!(service_config
            .validate()
            .unwrap_err()
            .contains("service.app_key"));

        let mut service_config = service();
        service_config.timeout_seconds = 0;
        assert!(service_config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = config();
        config.logging.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.logging.local_rotation = "never".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_from_toml() {
        let toml_str = r#"
[service]
app_id = "app"
app_key = "key"
"#;
        let config: VidalConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.service.base_url, "http://api-sa.vidal.fr/rest/api/");
        assert_eq!(config.service.timeout_seconds, 30);
        assert!(config.service.tls_verify);
        assert!(config.logging.local_enabled);
        assert_eq!(config.logging.local_rotation, "daily");
    }
}
