//! Result type alias for the Vidal client

use super::errors::VidalError;

/// Result type alias for Vidal client operations
///
/// # Examples
///
/// ```
/// use vidal_client::domain::result::Result;
/// use vidal_client::domain::errors::VidalError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(VidalError::MissingParameter("code".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, VidalError>;
