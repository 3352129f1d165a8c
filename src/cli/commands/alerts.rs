//! Alerts command implementation
//!
//! Reads a patient alerts request from a JSON file, runs it against the
//! configured Vidal endpoint and prints the formatted alert.

use super::{client_from_config, exit_code, exit_code_for};
use crate::domain::{PatientAlertsRequest, Result, VidalError};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the alerts command
#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// JSON file holding the patient profile and identifier lists
    pub request: PathBuf,
}

impl AlertsArgs {
    /// Execute the alerts command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let request = match read_request(&self.request) {
            Ok(request) => request,
            Err(e) => {
                eprintln!(
                    "❌ Cannot read alert request {}: {e}",
                    self.request.display()
                );
                return Ok(exit_code::PARAMETER);
            }
        };

        let client = match client_from_config(config_path) {
            Ok(client) => client,
            Err(code) => return Ok(code),
        };

        match client.get_patient_alerts(&request).await {
            Ok(alert) => {
                println!("{}", serde_json::to_string_pretty(&alert)?);
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Patient alerts failed");
                eprintln!("❌ Patient alerts failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

/// Reads and parses an alerts request file
fn read_request(path: &Path) -> Result<PatientAlertsRequest> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| VidalError::InvalidParameter(format!("alert request: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_request() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "patient": {{"dateOfBirth": "1980-05-01", "gender": "FEMALE"}},
                "allergyClasses": ["penicillins"],
                "medications": ["3400930000000"]
            }}"#
        )
        .unwrap();

        let request = read_request(file.path()).unwrap();
        assert_eq!(request.patient.date_of_birth.as_deref(), Some("1980-05-01"));
        assert_eq!(request.allergy_classes, vec!["penicillins"]);
        assert!(request.pathologies.is_empty());
        assert_eq!(request.medications, vec!["3400930000000"]);
    }

    #[test]
    fn test_read_request_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            read_request(file.path()),
            Err(VidalError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_read_request_missing_file() {
        assert!(matches!(
            read_request(Path::new("does-not-exist.json")),
            Err(VidalError::Io(_))
        ));
    }
}
