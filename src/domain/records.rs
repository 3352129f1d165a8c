//! Lookup results and alert records
//!
//! Records returned by the Vidal lookups are loosely typed: the service decides
//! which `vidal:*` fields an entry carries, so a record is a plain mapping from
//! normalized field name to the parsed XML value.

use crate::core::xml::CONTENT_KEY;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A normalized medication, allergy or pathology record
///
/// Keys are lower-cased field names with the `VIDAL:` marker removed,
/// e.g. `id`, `name`, `company`.
pub type Record = Map<String, Value>;

/// Outcome of a lookup that reached the Vidal service
///
/// A non-200 answer is not treated as an error: the raw body is handed back
/// to the caller as [`LookupOutcome::Unexpected`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum LookupOutcome<T> {
    /// HTTP 200 with the normalized payload
    Found(T),

    /// Any other status, with the body exactly as received
    Unexpected { status: u16, body: String },
}

impl<T> LookupOutcome<T> {
    /// Returns true for [`LookupOutcome::Found`]
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    /// Returns the payload, discarding a soft failure
    pub fn found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            LookupOutcome::Unexpected { .. } => None,
        }
    }

    /// Maps the found payload, leaving a soft failure untouched
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LookupOutcome<U> {
        match self {
            LookupOutcome::Found(value) => LookupOutcome::Found(f(value)),
            LookupOutcome::Unexpected { status, body } => {
                LookupOutcome::Unexpected { status, body }
            }
        }
    }
}

/// Formatted drug-interaction alert
///
/// Serialized with the field names callers of the Vidal API expect
/// (`alert`, `alertType`, `alertSeverity`, `alertContent`, `alertTitle`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResult {
    /// Alert kind, from the first entry's `vidal:type`
    pub alert: String,

    /// Alert type, from the second entry's `vidal:alertType`
    pub alert_type: String,

    /// Severity, from the second entry's `vidal:severity`
    pub alert_severity: String,

    /// Alert body, from the second entry's `content`
    pub alert_content: String,

    /// Alert title, from the first entry's `title`
    pub alert_title: String,
}

/// Kind of reference resolved while building an alert request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    AllergyClass,
    AllergyIngredient,
    Pathology,
    Medication,
}

impl ReferenceKind {
    /// Vidal URI prefix used for this kind in the alert request payload
    pub fn uri_prefix(&self) -> &'static str {
        match self {
            ReferenceKind::AllergyClass => "vidal://allergy/",
            ReferenceKind::AllergyIngredient => "vidal://molecule/",
            ReferenceKind::Pathology => "vidal://cim10/",
            ReferenceKind::Medication => "vidal://package/",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::AllergyClass => "allergy class",
            ReferenceKind::AllergyIngredient => "allergy ingredient",
            ReferenceKind::Pathology => "pathology",
            ReferenceKind::Medication => "medication",
        };
        f.write_str(name)
    }
}

/// Text carried by a parsed XML value
///
/// Leaf elements parse to strings; elements with attributes parse to a
/// mapping whose text sits under [`CONTENT_KEY`].
pub fn text_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => map.get(CONTENT_KEY).and_then(Value::as_str),
        _ => None,
    }
}
