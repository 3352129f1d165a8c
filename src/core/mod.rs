//! Core logic for the Vidal client.
//!
//! # Modules
//!
//! - [`xml`] - Parsing XML responses into generic trees
//! - [`transform`] - Flattening `vidal:`-prefixed entry fields into records
//! - [`alerts`] - Patient alerts payload, orchestration and response formatting
//!
//! # Lookup Workflow
//!
//! 1. **Request**: the adapter builds the URL and issues the call
//! 2. **Parse**: a 200 body becomes a [`serde_json::Value`] tree
//! 3. **Normalize**: `vidal:` fields of each entry become a flat record
//!
//! # Example
//!
//! ```rust
//! use vidal_client::core::transform::normalize_document;
//! use vidal_client::core::xml::parse_document;
//!
//! let tree = parse_document(
//!     "<feed><entry><vidal:id>42</vidal:id><vidal:name>Aspirine</vidal:name></entry></feed>",
//! )
//! .unwrap();
//!
//! let record = normalize_document(&tree);
//! assert_eq!(record["id"], "42");
//! assert_eq!(record["name"], "Aspirine");
//! ```

pub mod alerts;
pub mod transform;
pub mod xml;
