//! XML handling for Vidal responses

pub mod tree;

pub use tree::{parse_document, CONTENT_KEY};
