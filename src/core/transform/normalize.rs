//! Field normalization for Vidal lookup responses
//!
//! Vidal entries mix Atom fields (`title`, `id`, `link`) with the service's
//! own `vidal:*` fields. Only the latter are kept, renamed to plain lower-case
//! names:
//!
//! - `"VIDAL:ID"` → `"id"`
//! - `"VIDAL:MARKETSTATUS"` → `"marketstatus"`
//!
//! When several entries carry the same field, the last entry wins. This
//! overwrite behaviour is long-standing and callers depend on it; it is
//! documented rather than changed.

use crate::domain::Record;
use serde_json::{Map, Value};

/// Marker identifying Vidal-specific fields in a parsed entry
pub const VIDAL_MARKER: &str = "VIDAL:";

/// Key holding an entry within each top-level node of a parsed feed
pub const ENTRY_KEY: &str = "ENTRY";

/// Collects the `ENTRY` mappings of a parsed document
///
/// Every top-level child of the root element is inspected for an `ENTRY`
/// value. A single entry contributes one mapping; a list contributes each of
/// its mapping elements in document order. Anything else is skipped.
pub fn entry_nodes(document: &Value) -> Vec<&Map<String, Value>> {
    let mut entries = Vec::new();

    let Some(root) = document.as_object() else {
        return entries;
    };

    for node in root.values() {
        match node.get(ENTRY_KEY) {
            Some(Value::Object(entry)) => entries.push(entry),
            Some(Value::Array(items)) => {
                entries.extend(items.iter().filter_map(Value::as_object));
            }
            _ => {}
        }
    }

    entries
}

/// Renames a marker-bearing key, or returns `None` for any other key
///
/// The marker is stripped wherever it appears and the rest lower-cased.
pub fn normalize_key(key: &str) -> Option<String> {
    if key.contains(VIDAL_MARKER) {
        Some(key.replace(VIDAL_MARKER, "").to_lowercase())
    } else {
        None
    }
}

/// Copies the marker-bearing fields of one entry into `record`
///
/// Returns the number of fields copied.
fn apply_entry(record: &mut Record, entry: &Map<String, Value>) -> usize {
    let mut copied = 0;
    for (key, value) in entry {
        if let Some(name) = normalize_key(key) {
            record.insert(name, value.clone());
            copied += 1;
        }
    }
    copied
}

/// Merges the Vidal fields of all entries into a single record
///
/// Later entries overwrite earlier ones under the same field name. Returns an
/// empty record when no entry carries a Vidal field.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vidal_client::core::transform::normalize::normalize_entries;
///
/// let first = json!({"TITLE": "Doliprane", "VIDAL:ID": "1"});
/// let second = json!({"VIDAL:ID": "2", "VIDAL:NAME": "Efferalgan"});
///
/// let record = normalize_entries([first.as_object().unwrap(), second.as_object().unwrap()]);
/// assert_eq!(record["id"], "2");
/// assert_eq!(record["name"], "Efferalgan");
/// assert!(!record.contains_key("title"));
/// ```
pub fn normalize_entries<'a, I>(entries: I) -> Record
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    let mut record = Record::new();
    for entry in entries {
        apply_entry(&mut record, entry);
    }
    record
}

/// Accumulating variant used for by-name searches
///
/// The running record is never reset. After each entry that contributed at
/// least one Vidal field, a snapshot of the record so far is emitted, so the
/// n-th snapshot also holds fields from earlier entries that the n-th entry
/// did not overwrite.
pub fn normalize_entries_accumulating<'a, I>(entries: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Map<String, Value>>,
{
    let mut record = Record::new();
    let mut snapshots = Vec::new();

    for entry in entries {
        if apply_entry(&mut record, entry) > 0 {
            snapshots.push(record.clone());
        }
    }

    snapshots
}

/// Normalizes a whole parsed document into a single record
pub fn normalize_document(document: &Value) -> Record {
    normalize_entries(entry_nodes(document))
}
