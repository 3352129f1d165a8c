//! XML to generic tree conversion
//!
//! Vidal answers with Atom-like XML feeds. Rather than binding every feed
//! shape to a struct, responses are folded into a generic tree of
//! `serde_json::Value` mappings keyed by upper-cased tag name:
//!
//! - a leaf element becomes its trimmed text
//! - an element with attributes becomes `{ATTR: value, "content": text}`
//! - an element with children becomes a mapping of its children
//! - a tag repeated under one parent becomes a list
//! - the document becomes `{ROOT: value}`

use crate::domain::{Result, VidalError};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Key under which element text is stored when the element also has attributes
/// or children
pub const CONTENT_KEY: &str = "content";

/// An element being assembled while its end tag has not been read yet
struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_uppercase();

        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| VidalError::Xml(format!("Invalid attribute: {e}")))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();

            // Namespace declarations carry no data
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }

            let raw = String::from_utf8_lossy(&attr.value);
            let value = unescape(&raw)
                .map_err(|e| VidalError::Xml(format!("Invalid attribute value: {e}")))?;
            attributes.insert(key.to_uppercase(), Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let Frame {
            name,
            attributes,
            children,
            text,
        } = self;
        let text = text.trim();

        if attributes.is_empty() && children.is_empty() {
            return (name, Value::String(text.to_string()));
        }

        let mut node = attributes;
        for (key, value) in children {
            node.insert(key, value);
        }
        if !text.is_empty() {
            node.insert(CONTENT_KEY.to_string(), Value::String(text.to_string()));
        }

        (name, Value::Object(node))
    }
}

/// Inserts a child, turning repeated tags into a list in document order
fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn attach(
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    (name, value): (String, Value),
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.children, name, value),
        None => {
            if root.is_some() {
                return Err(VidalError::Xml(format!(
                    "Unexpected second root element <{name}>"
                )));
            }
            *root = Some((name, value));
        }
    }
    Ok(())
}

/// Parses an XML document into a generic tree
///
/// # Errors
///
/// Returns [`VidalError::Xml`] if the document is not well-formed, contains an
/// unknown entity, or has no root element.
///
/// # Example
///
/// ```
/// use vidal_client::core::xml::parse_document;
///
/// let tree = parse_document("<feed><entry><vidal:id>42</vidal:id></entry></feed>").unwrap();
/// assert_eq!(tree["FEED"]["ENTRY"]["VIDAL:ID"], "42");
/// ```
pub fn parse_document(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let frame = Frame::open(&start)?;
                attach(&mut stack, &mut root, frame.close())?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| VidalError::Xml("Unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, frame.close())?;
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(frame) = stack.last_mut() {
                    let entity = format!("&{};", String::from_utf8_lossy(&reference));
                    let resolved = unescape(&entity)
                        .map_err(|e| VidalError::Xml(format!("Unknown entity {entity}: {e}")))?;
                    frame.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no data
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(VidalError::Xml(format!(
            "Unexpected end of document inside <{}>",
            open.name
        )));
    }

    let (name, value) =
        root.ok_or_else(|| VidalError::Xml("Document has no root element".to_string()))?;

    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SEARCH_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:vidal="http://api.vidal.net/-/spec/vidal-api/1.0/">
  <title>Search</title>
  <entry>
    <title>DOLIPRANE 1000 mg cp</title>
    <id>vidal://package/12345</id>
    <vidal:id>12345</vidal:id>
    <vidal:company vidalId="77">SANOFI</vidal:company>
    <link rel="alternate" href="/rest/api/package/12345"/>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_atom_feed() {
        let tree = parse_document(SEARCH_FEED).unwrap();

        assert_eq!(
            tree,
            json!({
                "FEED": {
                    "TITLE": "Search",
                    "ENTRY": {
                        "TITLE": "DOLIPRANE 1000 mg cp",
                        "ID": "vidal://package/12345",
                        "VIDAL:ID": "12345",
                        "VIDAL:COMPANY": {"VIDALID": "77", "content": "SANOFI"},
                        "LINK": {"REL": "alternate", "HREF": "/rest/api/package/12345"}
                    }
                }
            })
        );
    }

    #[test]
    fn test_repeated_tags_become_list() {
        let xml = "<feed><e><id>1</id></e><e><id>2</id></e><e><id>3</id></e></feed>";
        let tree = parse_document(xml).unwrap();

        assert_eq!(
            tree["FEED"]["E"],
            json!([{"ID": "1"}, {"ID": "2"}, {"ID": "3"}])
        );
    }

    #[test]
    fn test_entities_and_cdata() {
        let xml = "<r><a>Salt &amp; pepper</a><b><![CDATA[<b>bold</b>]]></b><c>caf&#233;</c></r>";
        let tree = parse_document(xml).unwrap();

        assert_eq!(tree["R"]["A"], "Salt & pepper");
        assert_eq!(tree["R"]["B"], "<b>bold</b>");
        assert_eq!(tree["R"]["C"], "café");
    }

    #[test]
    fn test_empty_element() {
        let tree = parse_document("<root><empty/><blank></blank></root>").unwrap();
        assert_eq!(tree, json!({"ROOT": {"EMPTY": "", "BLANK": ""}}));
    }

    #[test]
    fn test_empty_root() {
        let tree = parse_document("<feed/>").unwrap();
        assert_eq!(tree, json!({"FEED": ""}));
    }

    #[test]
    fn test_mismatched_tags_fail() {
        let result = parse_document("<feed><entry></feed>");
        assert!(matches!(result, Err(VidalError::Xml(_))));
    }

    #[test]
    fn test_unclosed_document_fails() {
        let result = parse_document("<feed><entry>");
        assert!(matches!(result, Err(VidalError::Xml(_))));
    }

    #[test]
    fn test_no_root_fails() {
        let result = parse_document("   ");
        assert!(matches!(result, Err(VidalError::Xml(_))));
    }

    #[test]
    fn test_plain_text_body_fails() {
        let result = parse_document("Service Unavailable");
        assert!(result.is_err());
    }
}
