//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VidalConfig;
use super::secret::secret_string;
use crate::domain::errors::VidalError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VidalConfig
/// 4. Applies environment variable overrides (VIDAL_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use vidal_client::config::loader::load_config;
///
/// let config = load_config("vidal.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VidalConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VidalError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VidalError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Applies the same substitution, overrides and validation as [`load_config`].
pub fn load_config_from_str(contents: &str) -> Result<VidalConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: VidalConfig = toml::from_str(&contents)
        .map_err(|e| VidalError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        VidalError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
pub(crate) fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| VidalError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(VidalError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the VIDAL_* prefix
///
/// Environment variables follow the pattern VIDAL_<SECTION>_<KEY>, for
/// example VIDAL_SERVICE_APP_KEY or VIDAL_APPLICATION_LOG_LEVEL. Values that
/// fail to parse leave the file setting in place.
fn apply_env_overrides(config: &mut VidalConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("VIDAL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Service overrides
    if let Ok(val) = std::env::var("VIDAL_SERVICE_BASE_URL") {
        config.service.base_url = val;
    }
    if let Ok(val) = std::env::var("VIDAL_SERVICE_APP_ID") {
        config.service.app_id = val;
    }
    if let Ok(val) = std::env::var("VIDAL_SERVICE_APP_KEY") {
        config.service.app_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("VIDAL_SERVICE_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.service.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("VIDAL_SERVICE_TLS_VERIFY") {
        if let Ok(verify) = val.parse() {
            config.service.tls_verify = verify;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("VIDAL_LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Ok(val) = std::env::var("VIDAL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("VIDAL_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Serializes tests that touch VIDAL_* variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const MINIMAL: &str = r#"
[service]
app_id = "file-app"
app_key = "file-key"
"#;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VIDAL_LOADER_TEST_VAR", "test_value");
        let input = "app_key = \"${VIDAL_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "app_key = \"test_value\"");
        std::env::remove_var("VIDAL_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VIDAL_LOADER_MISSING_VAR");
        let input = "app_key = \"${VIDAL_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("VIDAL_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("VIDAL_LOADER_COMMENTED_VAR");
        let input = "# app_key = \"${VIDAL_LOADER_COMMENTED_VAR}\"\napp_id = \"x\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(VidalError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let toml_content = r#"
[application]
log_level = "debug"

[service]
base_url = "https://vidal.example.com/rest/api/"
app_id = "my-app"
app_key = "my-key"
timeout_seconds = 5

[logging]
local_enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(
            config.service.base_url,
            "https://vidal.example.com/rest/api/"
        );
        assert_eq!(config.service.app_id, "my-app");
        assert_eq!(config.service.app_key.expose_secret(), "my-key");
        assert_eq!(config.service.timeout_seconds, 5);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var("VIDAL_SERVICE_APP_KEY", "env-key");
        std::env::set_var("VIDAL_SERVICE_TIMEOUT_SECONDS", "12");
        std::env::set_var("VIDAL_SERVICE_TLS_VERIFY", "not-a-bool");

        let result = load_config_from_str(MINIMAL);

        std::env::remove_var("VIDAL_SERVICE_APP_KEY");
        std::env::remove_var("VIDAL_SERVICE_TIMEOUT_SECONDS");
        std::env::remove_var("VIDAL_SERVICE_TLS_VERIFY");

        let config = result.unwrap();
        assert_eq!(config.service.app_id, "file-app");
        assert_eq!(config.service.app_key.expose_secret(), "env-key");
        assert_eq!(config.service.timeout_seconds, 12);
        assert!(config.service.tls_verify);
    }

    #[test]
    fn test_validation_failure() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let result = load_config_from_str(
            r#"
[service]
base_url = "ftp://vidal.example.com"
app_id = "app"
app_key = "key"
"#,
        );

        match result {
            Err(VidalError::Configuration(message)) => {
                assert!(message.contains("service.base_url"));
            }
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_toml() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = load_config_from_str("[service\napp_id = ");
        assert!(matches!(result, Err(VidalError::Configuration(_))));
    }
}
