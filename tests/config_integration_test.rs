//! Integration tests for configuration loading and validation

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use vidal_client::adapters::vidal::VidalClient;
use vidal_client::config::load_config;
use vidal_client::domain::VidalError;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("VIDAL_APPLICATION_LOG_LEVEL");
    std::env::remove_var("VIDAL_SERVICE_BASE_URL");
    std::env::remove_var("VIDAL_SERVICE_APP_ID");
    std::env::remove_var("VIDAL_SERVICE_APP_KEY");
    std::env::remove_var("VIDAL_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("TEST_VIDAL_APP_KEY");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[service]
base_url = "https://vidal.example.com/rest/api/"
app_id = "complete-app"
app_key = "complete-key"
timeout_seconds = 15
tls_verify = false

[logging]
local_enabled = true
local_path = "/tmp/vidal-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(
        config.service.base_url,
        "https://vidal.example.com/rest/api/"
    );
    assert_eq!(config.service.app_id, "complete-app");
    assert_eq!(config.service.app_key.expose_secret(), "complete-key");
    assert_eq!(config.service.timeout_seconds, 15);
    assert!(!config.service.tls_verify);
    assert_eq!(config.logging.local_path, "/tmp/vidal-logs");
    assert_eq!(config.logging.local_rotation, "hourly");

    let client = VidalClient::from_config(&config.service).unwrap();
    assert_eq!(client.base_url(), "https://vidal.example.com/rest/api/");
    assert_eq!(client.app_id(), "complete-app");
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_VIDAL_APP_KEY", "substituted-key");

    let temp_file = write_config(
        r#"
[service]
app_id = "app"
app_key = "${TEST_VIDAL_APP_KEY}"
"#,
    );

    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.service.app_key.expose_secret(), "substituted-key");
}

#[test]
fn test_missing_env_var_fails() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[service]
app_id = "app"
app_key = "${TEST_VIDAL_APP_KEY}"
"#,
    );

    match load_config(temp_file.path()) {
        Err(VidalError::Configuration(message)) => {
            assert!(message.contains("TEST_VIDAL_APP_KEY"));
        }
        other => panic!("Expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("VIDAL_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("VIDAL_SERVICE_APP_ID", "env-app");
    std::env::set_var("VIDAL_LOGGING_LOCAL_ENABLED", "false");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[service]
app_id = "file-app"
app_key = "file-key"
"#,
    );

    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.service.app_id, "env-app");
    assert_eq!(config.service.app_key.expose_secret(), "file-key");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_missing_service_section() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[application]\nlog_level = \"info\"\n");

    assert!(matches!(
        load_config(temp_file.path()),
        Err(VidalError::Configuration(_))
    ));
}

#[test]
fn test_invalid_values_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"loud\"\n[service]\napp_id = \"a\"\napp_key = \"k\"\n",
        "[service]\napp_id = \"\"\napp_key = \"k\"\n",
        "[service]\napp_id = \"a\"\napp_key = \"\"\n",
        "[service]\napp_id = \"a\"\napp_key = \"k\"\n[logging]\nlocal_rotation = \"weekly\"\n",
    ] {
        let temp_file = write_config(content);
        assert!(
            load_config(temp_file.path()).is_err(),
            "expected rejection for:\n{content}"
        );
    }
}
