//! Secret handling
//!
//! Secrets reach the rest of the crate only through a [`SecretSource`]
//! handed in at construction time. That keeps the provider adapter testable
//! without touching process environment and gives the integration test
//! workflow one place to plug in real token retrieval.

use std::collections::HashMap;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Token sent when no real bearer token can be retrieved
pub const PLACEHOLDER_TOKEN: &str = "<TOKEN>";

/// A secret value whose memory is cleared on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    /// Wrap a value, rejecting empty or whitespace-only input
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let mut value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            value.zeroize();
            return None;
        }
        let secret = Secret(trimmed.to_string());
        value.zeroize();
        Some(secret)
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Looks up secrets by name
pub trait SecretSource: Send + Sync {
    /// Return the secret stored under `name`, if any
    fn secret(&self, name: &str) -> Option<Secret>;
}

/// Reads secrets from process environment variables at lookup time
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretSource;

impl SecretSource for EnvSecretSource {
    fn secret(&self, name: &str) -> Option<Secret> {
        std::env::var(name).ok().and_then(Secret::new)
    }
}

/// Fixed in-memory secrets
#[derive(Default, Clone)]
pub struct StaticSecretSource {
    values: HashMap<String, Secret>,
}

impl StaticSecretSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Some(secret) = Secret::new(value) {
            self.values.insert(name.into(), secret);
        }
        self
    }
}

impl SecretSource for StaticSecretSource {
    fn secret(&self, name: &str) -> Option<Secret> {
        self.values.get(name).cloned()
    }
}

/// Answers every lookup with [`PLACEHOLDER_TOKEN`]
///
/// Integration tokens are never persisted, so this is what the test
/// workflow sends until a real token store is plugged in.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderSecretSource;

impl SecretSource for PlaceholderSecretSource {
    fn secret(&self, _name: &str) -> Option<Secret> {
        Secret::new(PLACEHOLDER_TOKEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_rejects_blank_values() {
        assert!(Secret::new("").is_none());
        assert!(Secret::new("   \n").is_none());
        assert_eq!(Secret::new("  key ").unwrap().expose_secret(), "key");
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::new("super-secret-value").unwrap();
        let debug = format!("{secret:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_static_source() {
        let source = StaticSecretSource::new()
            .with("GEMINI_API_KEY", "abc123")
            .with("EMPTY", "  ");
        assert_eq!(
            source.secret("GEMINI_API_KEY").unwrap().expose_secret(),
            "abc123"
        );
        assert!(source.secret("EMPTY").is_none());
        assert!(source.secret("MISSING").is_none());
    }

    #[test]
    fn test_placeholder_source() {
        let source = PlaceholderSecretSource;
        assert_eq!(
            source.secret("petstore").unwrap().expose_secret(),
            PLACEHOLDER_TOKEN
        );
    }

    #[test]
    fn test_env_source_reads_variable_at_lookup() {
        // Cargo exports package metadata to every test process
        let source = EnvSecretSource;
        assert_eq!(
            source.secret("CARGO_PKG_NAME").unwrap().expose_secret(),
            env!("CARGO_PKG_NAME")
        );
    }

    #[test]
    fn test_env_source_missing_variable() {
        let source = EnvSecretSource;
        assert!(source.secret("INTEGRA_TEST_VARIABLE_THAT_IS_NEVER_SET").is_none());
    }
}
