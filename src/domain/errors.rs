//! Domain error types
//!
//! This module defines the error hierarchy for the Vidal client.
//! All errors are domain-specific and don't expose third-party types.
//!
//! # Errors are values
//!
//! Every public operation returns [`crate::domain::Result`]. Callers must
//! inspect the returned value before using it as a normal result: a lookup
//! that reaches the service but gets a non-200 answer is *not* an error (see
//! [`crate::domain::LookupOutcome::Unexpected`]), while missing input,
//! transport failures and unreadable responses come back as `Err`.

use thiserror::Error;

use super::records::ReferenceKind;

/// Main Vidal client error type
#[derive(Debug, Error)]
pub enum VidalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required input was absent or empty
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// An input was present but could not be used
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Vidal service errors
    #[error("Vidal service error: {0}")]
    Service(#[from] ServiceError),

    /// XML parsing or writing errors
    #[error("XML error: {0}")]
    Xml(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors that occur when talking to the Vidal REST API.
///
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Failed to reach the service
    #[error("Failed to connect to Vidal API: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The alerts endpoint answered with a status other than 200
    #[error("Unknown error occurred (status {status}): {message}")]
    UnknownService { status: u16, message: String },

    /// The response did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A sub-lookup did not yield a usable Vidal id
    #[error("Could not resolve {kind} '{identifier}' to a Vidal id")]
    UnresolvedReference {
        kind: ReferenceKind,
        identifier: String,
    },
}

impl VidalError {
    /// Shorthand for a [`VidalError::MissingParameter`]
    pub fn missing(parameter: impl Into<String>) -> Self {
        VidalError::MissingParameter(parameter.into())
    }

    /// Shorthand for a [`ServiceError::MalformedResponse`]
    pub fn malformed(message: impl Into<String>) -> Self {
        VidalError::Service(ServiceError::MalformedResponse(message.into()))
    }

    /// Whether the error was caused by caller input rather than the service
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            VidalError::MissingParameter(_) | VidalError::InvalidParameter(_)
        )
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout(err.to_string())
        } else {
            ServiceError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<reqwest::Error> for VidalError {
    fn from(err: reqwest::Error) -> Self {
        VidalError::Service(err.into())
    }
}

impl From<quick_xml::Error> for VidalError {
    fn from(err: quick_xml::Error) -> Self {
        VidalError::Xml(err.to_string())
    }
}

impl From<std::io::Error> for VidalError {
    fn from(err: std::io::Error) -> Self {
        VidalError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VidalError {
    fn from(err: serde_json::Error) -> Self {
        VidalError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for VidalError {
    fn from(err: toml::de::Error) -> Self {
        VidalError::Configuration(format!("TOML parse error: {err}"))
    }
}
