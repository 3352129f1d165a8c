//! Domain models and types for the Vidal client.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Patient types** ([`PatientProfile`], [`PatientAlertsRequest`])
//! - **Lookup results** ([`Record`], [`LookupOutcome`], [`AlertResult`])
//! - **Error types** ([`VidalError`], [`ServiceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VidalError>`]. A lookup that
//! reaches the service but does not get HTTP 200 still returns `Ok`, carrying
//! [`LookupOutcome::Unexpected`] with the raw body:
//!
//! ```rust
//! use vidal_client::domain::{LookupOutcome, Record, Result};
//!
//! fn describe(result: Result<LookupOutcome<Record>>) -> String {
//!     match result {
//!         Ok(LookupOutcome::Found(record)) => format!("{} fields", record.len()),
//!         Ok(LookupOutcome::Unexpected { status, .. }) => format!("status {status}"),
//!         Err(e) => format!("failed: {e}"),
//!     }
//! }
//! ```

pub mod errors;
pub mod patient;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ServiceError, VidalError};
pub use patient::{
    BreastFeeding, Gender, HepaticInsufficiency, PatientAlertsRequest, PatientProfile,
};
pub use records::{text_of, AlertResult, LookupOutcome, Record, ReferenceKind};
pub use result::Result;
