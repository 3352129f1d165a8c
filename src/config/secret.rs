//! Application key protection
//!
//! Vidal authenticates with an `app_key` query parameter, so the key ends up
//! in every request URL. The configuration keeps it as a [`SecretString`],
//! which is wiped on drop and only readable through an explicit
//! [`ExposeSecret::expose_secret`] call.
//!
//! [`ExposeSecret::expose_secret`]: secrecy::ExposeSecret::expose_secret
//!
//! ```rust
//! use secrecy::ExposeSecret;
//! use vidal_client::config::secret_string;
//!
//! let app_key = secret_string("my-app-key".to_string());
//! assert_eq!(app_key.expose_secret().as_ref(), "my-app-key");
//! assert!(!format!("{app_key:?}").contains("my-app-key"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Raw key material held inside a [`SecretString`]
///
/// There is no `Display` impl and `Debug` is redacted even after
/// `expose_secret()`. Read it through `AsRef<str>` or compare it against a
/// `&str`.
#[derive(Clone, Zeroize, Serialize, Deserialize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
// `ServiceConfig` derives `Serialize`
impl SerializableSecret for SecretValue {}

impl SecretValue {
    /// True for an empty key, which `ServiceConfig::validate` rejects
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue([REDACTED])")
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A protected string, used for the Vidal application key
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
