//! External system integrations.
//!
//! - [`vidal`] - Vidal drug database REST API
//!
//! # Design Pattern
//!
//! Adapters isolate the HTTP and XML details of external services from the
//! core logic. The alerts orchestration talks to the [`vidal::VidalApi`]
//! trait, so it can be exercised with an in-memory implementation.
//!
//! ```rust,no_run
//! use vidal_client::adapters::vidal::VidalClient;
//! use vidal_client::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vidal.toml")?;
//! let client = VidalClient::from_config(&config.service)?;
//!
//! let outcome = client.get_pathology_by_icd10_code("I10").await?;
//! println!("Found: {}", outcome.is_found());
//! # Ok(())
//! # }
//! ```

pub mod vidal;
