//! Vidal API trait definition
//!
//! The patient alerts orchestrator only needs three lookups and the ability to
//! post an alert request. This trait captures exactly that surface so the
//! orchestration can run against [`super::VidalClient`] or any other
//! implementation.

use crate::domain::{LookupOutcome, Record, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Operations the alerts orchestrator relies on
///
/// # Example
///
/// ```no_run
/// use vidal_client::adapters::vidal::{VidalApi, VidalClient};
///
/// # async fn example() -> vidal_client::domain::Result<()> {
/// let client = VidalClient::new("app-id", "app-key");
/// let api: &dyn VidalApi = &client;
///
/// let outcome = api.pathology_by_icd10_code("I10").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait VidalApi: Send + Sync {
    /// Looks up a medication by green-rain code
    async fn medication_by_green_rain_code(&self, code: &str) -> Result<LookupOutcome<Record>>;

    /// Looks up a pathology by ICD10 code
    async fn pathology_by_icd10_code(&self, code: &str) -> Result<LookupOutcome<Record>>;

    /// Looks up an allergy by class or ingredient name
    async fn allergy_by_class_or_ingredient(&self, name: &str) -> Result<LookupOutcome<Record>>;

    /// Posts an alert request payload and returns the parsed response tree
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ServiceError::UnknownService`] for any status
    /// other than 200.
    async fn submit_alert_request(&self, payload: String) -> Result<Value>;
}
