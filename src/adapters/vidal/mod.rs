//! Vidal drug database integration
//!
//! - [`client`] - HTTP client for the Vidal REST API
//! - [`request`] - Credentials, operations and URL construction
//! - [`api`] - The lookup surface used by alerts orchestration

pub mod api;
pub mod client;
pub mod request;

pub use api::VidalApi;
pub use client::VidalClient;
pub use request::{Credentials, Operation, DEFAULT_BASE_URL};
