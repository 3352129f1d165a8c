//! Integration tests for logging functionality

use tempfile::TempDir;
use vidal_client::config::LoggingConfig;
use vidal_client::logging::init_logging;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "/var/log/vidal");
}

#[test]
fn test_invalid_log_level_rejected() {
    let config = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };

    // Rejected before any subscriber is installed
    assert!(init_logging("verbose", &config).is_err());
}

// The global subscriber can only be installed once per process, so this is
// the only test in this binary that initializes logging successfully.
#[test]
fn test_init_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    tracing::info!("logging initialized for test");
    drop(guard);
}
