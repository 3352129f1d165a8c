//! Alert request payload construction
//!
//! The Vidal alerts endpoint takes an XML "prescription": the patient profile
//! followed by the Vidal URIs of the patient's allergies, allergenic
//! molecules, pathologies and prescribed packages.

use crate::domain::{PatientProfile, ReferenceKind, Result, VidalError};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fmt::Display;

/// Vidal ids resolved for each identifier list of an alert request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertReferences {
    pub allergy_classes: Vec<String>,
    pub allergy_ingredients: Vec<String>,
    pub pathologies: Vec<String>,
    pub medications: Vec<String>,
}

fn write_error(err: impl Display) -> VidalError {
    VidalError::Xml(format!("Failed to write alert request: {err}"))
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)?;
    Ok(())
}

/// Writes `<container><item>uri</item>...</container>`, or `<container/>` when empty
fn write_reference_list<W: std::io::Write>(
    writer: &mut Writer<W>,
    container: &str,
    item: &str,
    kind: ReferenceKind,
    ids: &[String],
) -> Result<()> {
    if ids.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new(container)))
            .map_err(write_error)?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(BytesStart::new(container)))
        .map_err(write_error)?;
    for id in ids {
        write_text_element(writer, item, &format!("{}{id}", kind.uri_prefix()))?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(container)))
        .map_err(write_error)?;
    Ok(())
}

fn write_patient<W: std::io::Write>(
    writer: &mut Writer<W>,
    patient: &PatientProfile,
    date_of_birth: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("patient")))
        .map_err(write_error)?;
    write_text_element(writer, "dateOfBirth", date_of_birth)?;
    write_text_element(writer, "gender", patient.gender.as_str())?;
    write_text_element(writer, "weight", &patient.weight.to_string())?;
    write_text_element(writer, "height", &patient.height.to_string())?;
    write_text_element(writer, "breastFeeding", patient.breast_feeding.as_str())?;
    write_text_element(writer, "creatin", &patient.creatin.to_string())?;
    write_text_element(
        writer,
        "hepaticInsufficiency",
        patient.hepatic_insufficiency.as_str(),
    )?;
    writer
        .write_event(Event::End(BytesEnd::new("patient")))
        .map_err(write_error)?;
    Ok(())
}

/// Builds the XML body posted to the alerts endpoint
///
/// `date_of_birth` must already be resolved to an ISO-8601 timestamp (see
/// [`PatientProfile::date_of_birth_timestamp`]). Allergy classes are written
/// as `allergy` URIs and allergy ingredients as `molecule` URIs.
///
/// # Example
///
/// ```
/// use vidal_client::core::alerts::request::{build_alert_request, AlertReferences};
/// use vidal_client::domain::PatientProfile;
///
/// let patient = PatientProfile::new("1980-05-01");
/// let references = AlertReferences {
///     medications: vec!["12345".to_string()],
///     ..Default::default()
/// };
///
/// let xml = build_alert_request(&patient, "1980-05-01T00:00:00.000+00:00", &references).unwrap();
/// assert!(xml.contains("<drug>vidal://package/12345</drug>"));
/// ```
pub fn build_alert_request(
    patient: &PatientProfile,
    date_of_birth: &str,
    references: &AlertReferences,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("prescription")))
        .map_err(write_error)?;

    write_patient(&mut writer, patient, date_of_birth)?;

    write_reference_list(
        &mut writer,
        "allergies",
        "allergy",
        ReferenceKind::AllergyClass,
        &references.allergy_classes,
    )?;
    write_reference_list(
        &mut writer,
        "molecules",
        "molecule",
        ReferenceKind::AllergyIngredient,
        &references.allergy_ingredients,
    )?;
    write_reference_list(
        &mut writer,
        "pathologies",
        "pathology",
        ReferenceKind::Pathology,
        &references.pathologies,
    )?;

    writer
        .write_event(Event::Start(BytesStart::new("prescription-lines")))
        .map_err(write_error)?;
    for id in &references.medications {
        writer
            .write_event(Event::Start(BytesStart::new("prescription-line")))
            .map_err(write_error)?;
        write_text_element(
            &mut writer,
            "drug",
            &format!("{}{id}", ReferenceKind::Medication.uri_prefix()),
        )?;
        writer
            .write_event(Event::End(BytesEnd::new("prescription-line")))
            .map_err(write_error)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("prescription-lines")))
        .map_err(write_error)?;

    writer
        .write_event(Event::End(BytesEnd::new("prescription")))
        .map_err(write_error)?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| VidalError::Xml(format!("Alert request is not valid UTF-8: {e}")))
}
