//! Alert response formatting
//!
//! The alerts feed places a "type" entry first and a "detail" entry second.
//! Fields are picked by position:
//!
//! | Field | Source |
//! |---|---|
//! | `alert` | entry 0, `vidal:type` |
//! | `alertTitle` | entry 0, `title` |
//! | `alertType` | entry 1, `vidal:alertType` content |
//! | `alertSeverity` | entry 1, `vidal:severity` |
//! | `alertContent` | entry 1, `content` content |

use crate::domain::{text_of, AlertResult, Result, VidalError};
use serde_json::Value;

fn field(entry: &Value, index: usize, key: &str) -> Result<String> {
    entry
        .get(key)
        .and_then(text_of)
        .map(str::to_string)
        .ok_or_else(|| VidalError::malformed(format!("Alert entry {index} has no {key} field")))
}

/// Formats the first two entries of an alerts feed
///
/// # Errors
///
/// Returns a malformed-response error when fewer than two entries are given or
/// when one of the five fields is missing.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vidal_client::core::alerts::format::format_alert_entries;
///
/// let entries = vec![
///     json!({"TITLE": "T1", "VIDAL:TYPE": "TypeA"}),
///     json!({
///         "VIDAL:ALERTTYPE": {"content": "Interaction"},
///         "VIDAL:SEVERITY": "HIGH",
///         "CONTENT": {"content": "Avoid combo"}
///     }),
/// ];
///
/// let alert = format_alert_entries(&entries).unwrap();
/// assert_eq!(alert.alert_type, "Interaction");
/// ```
pub fn format_alert_entries(entries: &[Value]) -> Result<AlertResult> {
    let [type_entry, detail_entry, ..] = entries else {
        return Err(VidalError::malformed(format!(
            "Expected at least two alert entries, found {}",
            entries.len()
        )));
    };

    Ok(AlertResult {
        alert: field(type_entry, 0, "VIDAL:TYPE")?,
        alert_title: field(type_entry, 0, "TITLE")?,
        alert_type: field(detail_entry, 1, "VIDAL:ALERTTYPE")?,
        alert_severity: field(detail_entry, 1, "VIDAL:SEVERITY")?,
        alert_content: field(detail_entry, 1, "CONTENT")?,
    })
}

/// Formats a parsed alerts document (`FEED.ENTRY`)
pub fn format_alert_response(document: &Value) -> Result<AlertResult> {
    let entries = document
        .get("FEED")
        .and_then(|feed| feed.get("ENTRY"))
        .ok_or_else(|| VidalError::malformed("Alert response has no feed entries"))?;

    match entries {
        Value::Array(entries) => format_alert_entries(entries),
        _ => Err(VidalError::malformed("Expected at least two alert entries, found 1")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::xml::parse_document;
    use crate::domain::ServiceError;
    use serde_json::json;

    fn example_entries() -> Vec<Value> {
        vec![
            json!({"TITLE": "T1", "VIDAL:TYPE": "TypeA"}),
            json!({
                "VIDAL:ALERTTYPE": {"content": "Interaction"},
                "VIDAL:SEVERITY": "HIGH",
                "CONTENT": {"content": "Avoid combo"}
            }),
        ]
    }

    #[test]
    fn test_format_example_entries() {
        let alert = format_alert_entries(&example_entries()).unwrap();

        assert_eq!(
            alert,
            AlertResult {
                alert: "TypeA".to_string(),
                alert_title: "T1".to_string(),
                alert_type: "Interaction".to_string(),
                alert_severity: "HIGH".to_string(),
                alert_content: "Avoid combo".to_string(),
            }
        );
    }

    #[test]
    fn test_extra_entries_ignored() {
        let mut entries = example_entries();
        entries.push(json!({"TITLE": "ignored"}));

        let alert = format_alert_entries(&entries).unwrap();
        assert_eq!(alert.alert_title, "T1");
    }

    #[test]
    fn test_single_entry_is_malformed() {
        let entries = vec![json!({"TITLE": "T1", "VIDAL:TYPE": "TypeA"})];
        let result = format_alert_entries(&entries);

        assert!(matches!(
            result,
            Err(VidalError::Service(ServiceError::MalformedResponse(_)))
        ));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut entries = example_entries();
        entries[1] = json!({"VIDAL:SEVERITY": "HIGH"});

        let err = format_alert_entries(&entries).unwrap_err();
        assert!(err.to_string().contains("VIDAL:ALERTTYPE"));
    }

    #[test]
    fn test_format_parsed_feed() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:vidal="http://api.vidal.net/-/spec/vidal-api/1.0/">
  <title>Alerts</title>
  <entry>
    <title>Drug interaction</title>
    <vidal:type>ALERT</vidal:type>
  </entry>
  <entry>
    <title>ASPIRINE / WARFARINE</title>
    <vidal:alertType name="DRUG_DRUG_INTERACTION">Interaction</vidal:alertType>
    <vidal:severity>LEVEL_3</vidal:severity>
    <content type="text/html">Association d&#233;conseill&#233;e</content>
  </entry>
</feed>"#;

        let tree = parse_document(xml).unwrap();
        let alert = format_alert_response(&tree).unwrap();

        assert_eq!(alert.alert, "ALERT");
        assert_eq!(alert.alert_title, "Drug interaction");
        assert_eq!(alert.alert_type, "Interaction");
        assert_eq!(alert.alert_severity, "LEVEL_3");
        assert_eq!(alert.alert_content, "Association déconseillée");
    }

    #[test]
    fn test_feed_without_entries() {
        let tree = json!({"FEED": {"TITLE": "Alerts"}});
        assert!(format_alert_response(&tree).is_err());

        let single = json!({"FEED": {"ENTRY": {"TITLE": "T1", "VIDAL:TYPE": "TypeA"}}});
        assert!(format_alert_response(&single).is_err());
    }
}
