// Vidal Client - Vidal drug database lookups and patient alerts
// Copyright (c) 2025 Vidal Client Contributors
// Licensed under the MIT License

//! # Vidal Client
//!
//! An async client for the Vidal drug database REST API.
//!
//! ## Overview
//!
//! This library provides:
//! - **Lookups** of medications, pathologies and allergies by code, id or name
//! - **Normalization** of the XML/Atom answers into flat records
//! - **Patient alerts**: resolving every identifier of a prescription and
//!   posting it to the Vidal alerts service
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - XML parsing, record normalization, alerts orchestration
//! - [`adapters`] - The Vidal REST client
//! - [`domain`] - Errors, records and patient types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vidal_client::adapters::vidal::VidalClient;
//! use vidal_client::domain::{LookupOutcome, PatientAlertsRequest, PatientProfile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VidalClient::new("my-app-id", "my-app-key");
//!
//!     if let LookupOutcome::Found(pathology) = client.get_pathology_by_icd10_code("I10").await? {
//!         println!("Pathology: {}", pathology["name"]);
//!     }
//!
//!     let request = PatientAlertsRequest::new(PatientProfile::new("1980-05-01"))
//!         .with_pathologies(["I10"])
//!         .with_medications(["3400930000000"]);
//!
//!     let alert = client.get_patient_alerts(&request).await?;
//!     println!("{} ({})", alert.alert_title, alert.alert_severity);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`]. A lookup that reaches
//! the service but gets a non-200 answer is not an error: it returns
//! [`domain::LookupOutcome::Unexpected`] with the raw body.
//!
//! ```rust,no_run
//! use vidal_client::domain::VidalError;
//!
//! fn example() -> Result<(), VidalError> {
//!     let config = vidal_client::config::load_config("vidal.toml")?;
//!     println!("{}", config.service.base_url);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
