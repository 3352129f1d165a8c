//! Vidal REST client
//!
//! [`VidalClient`] holds the base endpoint, the static credentials and a
//! reusable HTTP client. It is immutable after construction and can be shared
//! between tasks.
//!
//! # Result contract
//!
//! Lookups never panic and never surface HTTP status codes as errors:
//!
//! - HTTP 200: `Ok(LookupOutcome::Found(..))` with the normalized record(s)
//! - any other status: `Ok(LookupOutcome::Unexpected { status, body })`
//! - empty identifier, transport failure, unreadable XML: `Err(VidalError)`

use super::api::VidalApi;
use super::request::{
    build_url, parse_base_url, redacted, Credentials, Operation, DEFAULT_BASE_URL,
};
use crate::config::ServiceConfig;
use crate::core::alerts;
use crate::core::transform::{entry_nodes, normalize_document, normalize_entries_accumulating};
use crate::core::xml::parse_document;
use crate::domain::{
    AlertResult, LookupOutcome, PatientAlertsRequest, Record, Result, ServiceError, VidalError,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

/// Client for the Vidal drug database REST API
///
/// # Example
///
/// ```no_run
/// use vidal_client::adapters::vidal::VidalClient;
/// use vidal_client::domain::LookupOutcome;
///
/// # async fn example() -> vidal_client::domain::Result<()> {
/// let client = VidalClient::new("my-app-id", "my-app-key");
///
/// match client.get_medication_by_green_rain_code("3400930000000").await? {
///     LookupOutcome::Found(medication) => println!("Vidal id: {}", medication["id"]),
///     LookupOutcome::Unexpected { status, body } => eprintln!("{status}: {body}"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct VidalClient {
    /// Base endpoint, e.g. `http://api-sa.vidal.fr/rest/api/`
    base_url: Url,

    /// HTTP client for making requests
    client: Client,

    /// Static credentials appended to every request
    credentials: Credentials,
}

impl VidalClient {
    /// Creates a client for the default Vidal endpoint
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            client: Client::new(),
            credentials: Credentials::new(app_id, app_key),
        }
    }

    /// Creates a client from service configuration
    ///
    /// Applies the configured base URL, request timeout and TLS verification
    /// setting.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

        if !config.tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| VidalError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            client,
            credentials: Credentials::from_secret(config.app_id.clone(), config.app_key.clone()),
        })
    }

    /// Points the client at another endpoint
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Base endpoint of this client
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Application id sent with every request
    pub fn app_id(&self) -> &str {
        self.credentials.app_id()
    }

    /// Issues a GET and parses a 200 body into an XML tree
    async fn fetch_document(&self, operation: Operation<'_>) -> Result<LookupOutcome<Value>> {
        let url = build_url(&self.base_url, &operation, &self.credentials)?;
        let started = Instant::now();

        tracing::debug!(
            url = %redacted(&url),
            operation = operation.name(),
            "Sending Vidal request"
        );

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            let err = VidalError::from(e);
            crate::log_error_with_context!(&err, operation.name());
            err
        })?;

        let status = response.status();
        let body = response.text().await?;

        crate::log_lookup_complete!(operation.name(), status.as_u16(), started.elapsed());

        if status == StatusCode::OK {
            Ok(LookupOutcome::Found(parse_document(&body)?))
        } else {
            tracing::warn!(
                url = %redacted(&url),
                status = status.as_u16(),
                "Vidal lookup returned an unexpected status"
            );
            Ok(LookupOutcome::Unexpected {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// Runs a single-record lookup
    async fn lookup_record(&self, operation: Operation<'_>) -> Result<LookupOutcome<Record>> {
        Ok(self
            .fetch_document(operation)
            .await?
            .map(|document| normalize_document(&document)))
    }

    /// Looks up a medication by its green-rain code (`search?code=`)
    pub async fn get_medication_by_green_rain_code(
        &self,
        green_rain_code: &str,
    ) -> Result<LookupOutcome<Record>> {
        let code = required("greenRainCode", green_rain_code)?;
        crate::log_lookup_start!("medication_by_green_rain_code", code);
        self.lookup_record(Operation::SearchByGreenRainCode(code))
            .await
    }

    /// Searches by name (`pathologies?q=`)
    ///
    /// Returns one record per matched entry. Records accumulate: each one also
    /// carries fields of earlier entries that were not overwritten.
    pub async fn get_medication_by_name(&self, name: &str) -> Result<LookupOutcome<Vec<Record>>> {
        let name = required("name", name)?;
        crate::log_lookup_start!("medication_by_name", name);
        Ok(self
            .fetch_document(Operation::SearchByName(name))
            .await?
            .map(|document| normalize_entries_accumulating(entry_nodes(&document))))
    }

    /// Fetches a medication package by Vidal id (`package/{id}`)
    pub async fn get_medication_by_id(&self, id: &str) -> Result<LookupOutcome<Record>> {
        let id = required("id", id)?;
        crate::log_lookup_start!("medication_by_id", id);
        self.lookup_record(Operation::PackageById(id)).await
    }

    /// Looks up a pathology by ICD10 code (`pathologies?filter=CIM10&code=`)
    pub async fn get_pathology_by_icd10_code(
        &self,
        icd10_code: &str,
    ) -> Result<LookupOutcome<Record>> {
        let code = required("icd10Code", icd10_code)?;
        crate::log_lookup_start!("pathology_by_icd10_code", code);
        self.lookup_record(Operation::PathologyByIcd10(code)).await
    }

    /// Looks up an allergy by class or ingredient name (`allergies?q=`)
    pub async fn get_allergy_by_class_or_ingredient(
        &self,
        class_or_ingredient: &str,
    ) -> Result<LookupOutcome<Record>> {
        let name = required("allergyClassOrIngredient", class_or_ingredient)?;
        crate::log_lookup_start!("allergy_by_class_or_ingredient", name);
        self.lookup_record(Operation::AllergyByClassOrIngredient(name))
            .await
    }

    /// Fetches drug-interaction alerts for a patient
    ///
    /// See [`alerts::get_patient_alerts`] for the resolution rules.
    pub async fn get_patient_alerts(&self, request: &PatientAlertsRequest) -> Result<AlertResult> {
        alerts::get_patient_alerts(self, request).await
    }

    /// Posts an XML alert request (`alerts`, content type `text/xml`)
    async fn post_alert_request(&self, payload: String) -> Result<Value> {
        let url = build_url(&self.base_url, &Operation::Alerts, &self.credentials)?;
        let started = Instant::now();

        tracing::debug!(
            url = %redacted(&url),
            payload_bytes = payload.len(),
            "Posting alert request"
        );

        let response = self
            .client
            .post(url)
            .header("Content-Type", "text/xml")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                let err = VidalError::from(e);
                crate::log_error_with_context!(&err, "alerts");
                err
            })?;

        let status = response.status();
        let body = response.text().await?;

        crate::log_lookup_complete!("alerts", status.as_u16(), started.elapsed());

        if status != StatusCode::OK {
            return Err(ServiceError::UnknownService {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        parse_document(&body)
    }
}

#[async_trait]
impl VidalApi for VidalClient {
    async fn medication_by_green_rain_code(&self, code: &str) -> Result<LookupOutcome<Record>> {
        self.get_medication_by_green_rain_code(code).await
    }

    async fn pathology_by_icd10_code(&self, code: &str) -> Result<LookupOutcome<Record>> {
        self.get_pathology_by_icd10_code(code).await
    }

    async fn allergy_by_class_or_ingredient(&self, name: &str) -> Result<LookupOutcome<Record>> {
        self.get_allergy_by_class_or_ingredient(name).await
    }

    async fn submit_alert_request(&self, payload: String) -> Result<Value> {
        self.post_alert_request(payload).await
    }
}

fn default_base_url() -> Url {
    // The constant is a valid absolute URL
    Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("invalid DEFAULT_BASE_URL"))
}

/// Rejects absent or blank identifiers before any request is made
fn required<'a>(parameter: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(VidalError::missing(parameter));
    }
    Ok(value)
}
