//! Vidal request building
//!
//! Every Vidal call is a fixed sub-path under the base endpoint plus query
//! parameters, with the static credentials appended as `app_id` and
//! `app_key`. Parameter order is fixed per operation so that identical inputs
//! always produce byte-identical URLs.

use crate::config::{secret_string, SecretString};
use crate::domain::{Result, VidalError};
use secrecy::ExposeSecret;
use std::fmt;
use url::Url;

/// Default Vidal REST endpoint
pub const DEFAULT_BASE_URL: &str = "http://api-sa.vidal.fr/rest/api/";

/// Static application credentials
///
/// The key is kept in a [`SecretString`] and is redacted from `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    app_id: String,
    app_key: SecretString,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: secret_string(app_key.into()),
        }
    }

    /// Builds credentials from an already protected key
    pub fn from_secret(app_id: impl Into<String>, app_key: SecretString) -> Self {
        Self {
            app_id: app_id.into(),
            app_key,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    fn app_key(&self) -> &str {
        self.app_key.expose_secret().as_ref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"[REDACTED]")
            .finish()
    }
}

/// A Vidal REST operation and its identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    /// `search?code=` by green-rain code
    SearchByGreenRainCode(&'a str),
    /// `pathologies?q=` by name
    SearchByName(&'a str),
    /// `package/{id}`
    PackageById(&'a str),
    /// `pathologies?filter=CIM10&code=`
    PathologyByIcd10(&'a str),
    /// `allergies?q=`
    AllergyByClassOrIngredient(&'a str),
    /// `alerts` (POST)
    Alerts,
}

/// Position of the credential pair relative to the operation's own parameters
enum CredentialPosition {
    Before,
    After,
}

impl<'a> Operation<'a> {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SearchByGreenRainCode(_) => "medication_by_green_rain_code",
            Operation::SearchByName(_) => "medication_by_name",
            Operation::PackageById(_) => "medication_by_id",
            Operation::PathologyByIcd10(_) => "pathology_by_icd10_code",
            Operation::AllergyByClassOrIngredient(_) => "allergy_by_class_or_ingredient",
            Operation::Alerts => "alerts",
        }
    }

    /// Path segments below the base endpoint
    fn segments(&self) -> Vec<&'a str> {
        match *self {
            Operation::SearchByGreenRainCode(_) => vec!["search"],
            Operation::SearchByName(_) | Operation::PathologyByIcd10(_) => vec!["pathologies"],
            Operation::PackageById(id) => vec!["package", id],
            Operation::AllergyByClassOrIngredient(_) => vec!["allergies"],
            Operation::Alerts => vec!["alerts"],
        }
    }

    /// Operation-specific query parameters, in wire order
    fn parameters(&self) -> (Vec<(&'static str, &'a str)>, CredentialPosition) {
        match *self {
            Operation::SearchByGreenRainCode(code) => {
                (vec![("code", code)], CredentialPosition::After)
            }
            Operation::SearchByName(name) => (vec![("q", name)], CredentialPosition::After),
            Operation::PackageById(_) => (Vec::new(), CredentialPosition::After),
            Operation::PathologyByIcd10(code) => (
                vec![("filter", "CIM10"), ("code", code)],
                CredentialPosition::Before,
            ),
            Operation::AllergyByClassOrIngredient(name) => {
                (vec![("q", name)], CredentialPosition::After)
            }
            Operation::Alerts => (Vec::new(), CredentialPosition::After),
        }
    }
}

/// Parses and checks a base endpoint
///
/// The endpoint must be an absolute `http` or `https` URL.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| VidalError::Configuration(format!("Invalid base URL '{base_url}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(VidalError::Configuration(format!(
            "Unsupported scheme '{scheme}' in base URL '{base_url}'"
        ))),
    }
}

/// Builds the full request URL for an operation
///
/// Path segments are percent-encoded and query values form-urlencoded.
///
/// # Example
///
/// ```
/// use vidal_client::adapters::vidal::request::{build_url, parse_base_url, Credentials, Operation};
///
/// let base = parse_base_url("http://api-sa.vidal.fr/rest/api/").unwrap();
/// let credentials = Credentials::new("my-app", "my-key");
///
/// let operation = Operation::SearchByGreenRainCode("3400930000000");
/// let url = build_url(&base, &operation, &credentials).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "http://api-sa.vidal.fr/rest/api/search?code=3400930000000&app_id=my-app&app_key=my-key"
/// );
/// ```
pub fn build_url(base: &Url, operation: &Operation<'_>, credentials: &Credentials) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            VidalError::Configuration(format!("Base URL '{base}' cannot carry a path"))
        })?;
        segments.pop_if_empty();
        segments.extend(operation.segments());
    }

    let (parameters, position) = operation.parameters();
    {
        let mut query = url.query_pairs_mut();
        if let CredentialPosition::Before = position {
            query.append_pair("app_id", credentials.app_id());
            query.append_pair("app_key", credentials.app_key());
        }
        for (name, value) in &parameters {
            query.append_pair(name, value);
        }
        if let CredentialPosition::After = position {
            query.append_pair("app_id", credentials.app_id());
            query.append_pair("app_key", credentials.app_key());
        }
    }

    Ok(url)
}

/// Renders a URL without its query string, for logging
pub fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}
