//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted log files with rotation
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Console output on stderr
//!
//! # Example
//!
//! ```no_run
//! use vidal_client::logging::init_logging;
//! use vidal_client::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a Vidal lookup
///
/// # Example
///
/// ```no_run
/// use vidal_client::log_lookup_start;
///
/// log_lookup_start!("pathology_by_icd10_code", "I10");
/// ```
#[macro_export]
macro_rules! log_lookup_start {
    ($operation:expr, $identifier:expr) => {
        tracing::info!(
            operation = $operation,
            identifier = %$identifier,
            "Starting Vidal lookup"
        );
    };
}

/// Log the completion of a Vidal call
///
/// # Example
///
/// ```no_run
/// use vidal_client::log_lookup_complete;
/// use std::time::Duration;
///
/// log_lookup_complete!("alerts", 200u16, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_lookup_complete {
    ($operation:expr, $status:expr, $duration:expr) => {
        tracing::info!(
            operation = $operation,
            status = $status,
            duration_ms = $duration.as_millis() as u64,
            "Vidal call completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use vidal_client::log_error_with_context;
/// use vidal_client::domain::VidalError;
///
/// let error = VidalError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
