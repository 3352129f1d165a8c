//! Lookup command implementation
//!
//! Runs one Vidal lookup and prints the outcome as JSON on stdout.

use super::{client_from_config, exit_code, exit_code_for};
use crate::adapters::vidal::VidalClient;
use crate::domain::{LookupOutcome, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

/// What to look up
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Medication by green-rain code
    GreenRainCode,
    /// Search by name
    Name,
    /// Medication package by Vidal id
    Id,
    /// Pathology by ICD10 code
    Icd10,
    /// Allergy by class or ingredient name
    Allergy,
}

/// Arguments for the lookup command
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Kind of lookup
    #[arg(value_enum)]
    pub kind: LookupKind,

    /// Code, id or name to look up
    pub identifier: String,
}

impl LookupArgs {
    /// Execute the lookup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let client = match client_from_config(config_path) {
            Ok(client) => client,
            Err(code) => return Ok(code),
        };

        match self.run(&client).await {
            Ok((found, json)) => {
                println!("{json}");
                Ok(if found {
                    exit_code::SUCCESS
                } else {
                    exit_code::SOFT_FAILURE
                })
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Lookup failed");
                eprintln!("❌ Lookup failed: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }

    /// Runs the lookup and renders the outcome
    async fn run(&self, client: &VidalClient) -> Result<(bool, String)> {
        let identifier = self.identifier.as_str();
        match self.kind {
            LookupKind::GreenRainCode => {
                render(client.get_medication_by_green_rain_code(identifier).await?)
            }
            LookupKind::Name => render(client.get_medication_by_name(identifier).await?),
            LookupKind::Id => render(client.get_medication_by_id(identifier).await?),
            LookupKind::Icd10 => render(client.get_pathology_by_icd10_code(identifier).await?),
            LookupKind::Allergy => {
                render(client.get_allergy_by_class_or_ingredient(identifier).await?)
            }
        }
    }
}

fn render<T: Serialize>(outcome: LookupOutcome<T>) -> Result<(bool, String)> {
    let found = outcome.is_found();
    Ok((found, serde_json::to_string_pretty(&outcome)?))
}
