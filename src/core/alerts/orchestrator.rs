//! Patient alerts orchestration
//!
//! Resolves every allergy, pathology and medication identifier to its Vidal id,
//! posts the resulting prescription to the alerts endpoint and formats the
//! answer.

use super::format::format_alert_response;
use super::request::{build_alert_request, AlertReferences};
use crate::adapters::vidal::VidalApi;
use crate::domain::{
    text_of, AlertResult, LookupOutcome, PatientAlertsRequest, ReferenceKind, Result, ServiceError,
    VidalError,
};

/// Fetches drug-interaction alerts for a patient
///
/// Sub-lookups run one after another, in list order. A sub-lookup that does
/// not yield an `id` aborts the whole request with
/// [`ServiceError::UnresolvedReference`].
///
/// # Errors
///
/// - [`VidalError::MissingParameter`] if the medications list is empty or the
///   patient has no date of birth
/// - [`VidalError::InvalidParameter`] if the date of birth cannot be parsed
/// - [`ServiceError::UnresolvedReference`] if an identifier cannot be resolved
/// - [`ServiceError::UnknownService`] if the alerts endpoint does not answer 200
/// - [`ServiceError::MalformedResponse`] if the alerts feed has fewer than two entries
///
/// # Example
///
/// ```no_run
/// use vidal_client::adapters::vidal::VidalClient;
/// use vidal_client::core::alerts::get_patient_alerts;
/// use vidal_client::domain::{PatientAlertsRequest, PatientProfile};
///
/// # async fn example() -> vidal_client::domain::Result<()> {
/// let client = VidalClient::new("app-id", "app-key");
/// let request = PatientAlertsRequest::new(PatientProfile::new("1980-05-01"))
///     .with_pathologies(["I10"])
///     .with_medications(["3400930000000"]);
///
/// let alert = get_patient_alerts(&client, &request).await?;
/// println!("{}: {}", alert.alert_severity, alert.alert_title);
/// # Ok(())
/// # }
/// ```
pub async fn get_patient_alerts(
    api: &dyn VidalApi,
    request: &PatientAlertsRequest,
) -> Result<AlertResult> {
    if request.medications.is_empty() {
        return Err(VidalError::missing("medications"));
    }
    let date_of_birth = request.patient.date_of_birth_timestamp()?;

    tracing::debug!(
        allergy_classes = request.allergy_classes.len(),
        allergy_ingredients = request.allergy_ingredients.len(),
        pathologies = request.pathologies.len(),
        medications = request.medications.len(),
        "Resolving alert request references"
    );

    let references = AlertReferences {
        allergy_classes: resolve_all(api, ReferenceKind::AllergyClass, &request.allergy_classes)
            .await?,
        allergy_ingredients: resolve_all(
            api,
            ReferenceKind::AllergyIngredient,
            &request.allergy_ingredients,
        )
        .await?,
        pathologies: resolve_all(api, ReferenceKind::Pathology, &request.pathologies).await?,
        medications: resolve_all(api, ReferenceKind::Medication, &request.medications).await?,
    };

    let payload = build_alert_request(&request.patient, &date_of_birth, &references)?;
    let document = api.submit_alert_request(payload).await?;
    let alert = format_alert_response(&document)?;

    tracing::info!(
        alert = %alert.alert,
        alert_type = %alert.alert_type,
        severity = %alert.alert_severity,
        "Patient alerts retrieved"
    );

    Ok(alert)
}

async fn resolve_all(
    api: &dyn VidalApi,
    kind: ReferenceKind,
    identifiers: &[String],
) -> Result<Vec<String>> {
    let mut ids = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        ids.push(resolve_reference(api, kind, identifier).await?);
    }
    Ok(ids)
}

async fn resolve_reference(
    api: &dyn VidalApi,
    kind: ReferenceKind,
    identifier: &str,
) -> Result<String> {
    let outcome = match kind {
        ReferenceKind::AllergyClass | ReferenceKind::AllergyIngredient => {
            api.allergy_by_class_or_ingredient(identifier).await?
        }
        ReferenceKind::Pathology => api.pathology_by_icd10_code(identifier).await?,
        ReferenceKind::Medication => api.medication_by_green_rain_code(identifier).await?,
    };

    let unresolved = || {
        VidalError::Service(ServiceError::UnresolvedReference {
            kind,
            identifier: identifier.to_string(),
        })
    };

    match outcome {
        LookupOutcome::Found(record) => {
            let id = record
                .get("id")
                .and_then(text_of)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string);

            if id.is_none() {
                tracing::warn!(
                    kind = %kind,
                    identifier = %identifier,
                    "Lookup returned no Vidal id"
                );
            }
            id.ok_or_else(unresolved)
        }
        LookupOutcome::Unexpected { status, .. } => {
            tracing::warn!(
                kind = %kind,
                identifier = %identifier,
                status = status,
                "Lookup failed while resolving alert request"
            );
            Err(unresolved())
        }
    }
}
