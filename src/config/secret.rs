//! Secret wrappers for OAuth material
//!
//! Client secrets, access tokens and refresh tokens are held in
//! [`secrecy::Secret`] so they are zeroized on drop and redacted from `Debug`
//! output. The wrapped value still serializes verbatim, because tokens have to
//! be written back to the token file by the `authorize` command.
//!
//! # Example
//!
//! ```rust
//! use drive_backup::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("ya29.a0Af".to_string());
//! assert_eq!(token.expose_secret().as_ref(), "ya29.a0Af");
//! assert!(!format!("{token:?}").contains("ya29"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype satisfying the marker traits `Secret` requires
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A zeroizing, redacted string
pub type SecretString = Secret<SecretValue>;

/// Wraps a String as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("client-secret".to_string());
        assert_eq!(secret.expose_secret(), "client-secret");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("1//0refresh-token".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("refresh-token"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_is_empty() {
        assert!(secret_string("  ".to_string()).expose_secret().is_empty());
        assert!(!secret_string("x".to_string()).expose_secret().is_empty());
    }

    #[test]
    fn test_secret_serde() {
        #[derive(Serialize, Deserialize)]
        struct Token {
            access_token: SecretString,
        }

        let token = Token {
            access_token: secret_string("ya29.token".to_string()),
        };

        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"access_token":"ya29.token"}"#);

        let deserialized: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.access_token.expose_secret(), "ya29.token");
    }
}
