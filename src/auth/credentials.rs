//! Credential management for ballchasing API authentication.

use secrecy::{ExposeSecret, SecretString};

/// An opaque ballchasing.com API key.
///
/// The key is sent verbatim in the `Authorization` header of every request.
/// It is stored as a [`SecretString`] so it never appears in `Debug` output
/// or log events.
#[derive(Clone)]
pub struct ApiKey {
    key: SecretString,
}

impl ApiKey {
    /// Create an API key from a raw string.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::from(key.into()),
        }
    }

    /// Create an API key from the `BALLCHASING_API_KEY` environment variable.
    ///
    /// Returns `None` if the variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var("BALLCHASING_API_KEY")
    }

    /// Create an API key from a custom environment variable.
    ///
    /// Returns `None` if the variable is not set.
    pub fn try_from_env_var(var: &str) -> Option<Self> {
        std::env::var(var).ok().map(Self::new)
    }

    /// Get the raw key for the `Authorization` header.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose(&self) -> &str {
        self.key.expose_secret()
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey").field("key", &"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_redacted() {
        let key = ApiKey::new("super_secret_key");
        let debug_str = format!("{:?}", key);
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_api_key_expose() {
        let key = ApiKey::from("abc123");
        assert_eq!(key.expose(), "abc123");
    }
}
