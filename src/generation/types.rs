//! Core types for the generation domain

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Target language of a generated client
///
/// Unknown values are kept verbatim so a configuration written by hand never
/// fails to load; they simply produce plain-text artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    Python,
    Node,
    Other(String),
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Language::Python => "python",
            Language::Node => "node",
            Language::Other(name) => name,
        }
    }

    /// Get the display name for this language
    pub fn display_name(&self) -> &str {
        match self {
            Language::Python => "Python",
            Language::Node => "Node.js",
            Language::Other(name) => name,
        }
    }

    /// Get the file extension used for generated artifacts
    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::Python => "py",
            Language::Node => "js",
            Language::Other(_) => "txt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "python" => Language::Python,
            "node" => Language::Node,
            _ => Language::Other(s.to_string()),
        })
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(language) => language,
            Err(never) => match never {},
        }
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}

/// Whether generated code carries a bearer-token header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    #[serde(alias = "None")]
    None,
    #[serde(alias = "Bearer")]
    Bearer,
}

impl AuthMode {
    /// `Bearer` when a token was supplied, otherwise `None`
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.trim().is_empty() => AuthMode::Bearer,
            _ => AuthMode::None,
        }
    }
}

/// Metadata document stored next to an integration's artifacts
///
/// Saving always replaces the whole document, so callers assemble the full
/// desired state before handing it to the store. Fields this crate does not
/// know about are carried in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredMetadata")]
pub struct IntegrationMetadata {
    pub name: String,
    pub language: Language,
    pub generated_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub auth_mode: AuthMode,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// On-disk shape, accepting the older `auth` key next to `auth_mode`
#[derive(Deserialize)]
struct StoredMetadata {
    #[serde(default)]
    name: String,
    language: Language,
    generated_file: PathBuf,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    auth_mode: Option<AuthMode>,
    #[serde(default)]
    auth: Option<AuthMode>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl From<StoredMetadata> for IntegrationMetadata {
    fn from(stored: StoredMetadata) -> Self {
        Self {
            name: stored.name,
            language: stored.language,
            generated_file: stored.generated_file,
            base_url: stored.base_url,
            // `auth_mode` wins; `auth` is dropped on the next save
            auth_mode: stored.auth_mode.or(stored.auth).unwrap_or_default(),
            extra: stored.extra,
        }
    }
}

impl IntegrationMetadata {
    pub fn new(name: impl Into<String>, language: Language, generated_file: PathBuf) -> Self {
        Self {
            name: name.into(),
            language,
            generated_file,
            base_url: None,
            auth_mode: AuthMode::None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.auth_mode = auth_mode;
        self
    }
}
