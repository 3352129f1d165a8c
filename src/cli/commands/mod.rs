//! CLI command implementations
//!
//! This module contains all CLI command implementations and the exit code
//! mapping they share.

pub mod alerts;
pub mod init;
pub mod lookup;
pub mod validate;

use crate::adapters::vidal::VidalClient;
use crate::config::load_config;
use crate::domain::{Result, VidalError};

/// Process exit codes
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const SOFT_FAILURE: i32 = 1;
    pub const CONFIGURATION: i32 = 2;
    pub const PARAMETER: i32 = 3;
    pub const FATAL: i32 = 5;
}

/// Maps an error to the process exit code
pub fn exit_code_for(error: &VidalError) -> i32 {
    match error {
        VidalError::Configuration(_) => exit_code::CONFIGURATION,
        e if e.is_parameter_error() => exit_code::PARAMETER,
        _ => exit_code::FATAL,
    }
}

/// Loads configuration and builds a client, or reports the failure
///
/// On failure, the error is printed and the exit code is returned as `Err`.
pub(crate) fn client_from_config(config_path: &str) -> std::result::Result<VidalClient, i32> {
    prepare_client(config_path).map_err(|e| {
        crate::log_error_with_context!(&e, "Failed to prepare Vidal client");
        eprintln!("❌ {e}");
        exit_code_for(&e)
    })
}

fn prepare_client(config_path: &str) -> Result<VidalClient> {
    let config = load_config(config_path)?;
    VidalClient::from_config(&config.service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&VidalError::Configuration("x".to_string())),
            exit_code::CONFIGURATION
        );
        assert_eq!(
            exit_code_for(&VidalError::missing("code")),
            exit_code::PARAMETER
        );
        assert_eq!(
            exit_code_for(&VidalError::InvalidParameter("dob".to_string())),
            exit_code::PARAMETER
        );
        assert_eq!(
            exit_code_for(&ServiceError::Timeout("slow".to_string()).into()),
            exit_code::FATAL
        );
    }
}
