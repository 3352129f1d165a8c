//! Patient alerts: request payload, orchestration and response formatting

pub mod format;
pub mod orchestrator;
pub mod request;

pub use format::{format_alert_entries, format_alert_response};
pub use orchestrator::get_patient_alerts;
pub use request::{build_alert_request, AlertReferences};
