//! Data transformation for Vidal responses
//!
//! Parsed XML trees are reduced to flat records keyed by normalized field
//! name. See [`normalize`] for the renaming rules.

pub mod normalize;

pub use normalize::{
    entry_nodes, normalize_document, normalize_entries, normalize_entries_accumulating,
    VIDAL_MARKER,
};
