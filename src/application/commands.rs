//! Data Transfer Objects for application layer

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::application::ValidationError;
use crate::core::AppConfig;
use crate::core::config::DEFAULT_PROJECT_NAME;
use crate::generation::{AuthMode, Language};

/// Maximum number of response-body characters returned by a smoke test
pub const DISPLAY_BODY_MAX_CHARS: usize = 1000;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Request to initialise a project in the workspace
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InitRequest {
    pub project_name: String,
    pub language: Language,
    /// Create a `.env` credential placeholder when none exists
    pub write_env: bool,
}

impl Default for InitRequest {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            language: Language::Python,
            write_env: true,
        }
    }
}

/// Result of project initialisation
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub env_created: bool,
}

/// Request to generate client code from a prompt
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Integration name; derived from the prompt when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Overrides the configured language
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub model: Option<String>,
    /// Overrides the configured provider credential
    #[serde(skip)]
    pub credential: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.prompt) {
            return Err(ValidationError::MissingField("prompt"));
        }
        Ok(())
    }

    /// Explicit name if one was given and is not blank
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !is_blank(n))
    }
}

/// Result of the generate workflow
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub name: String,
    pub slug: String,
    pub artifact_path: PathBuf,
    pub metadata_path: PathBuf,
    /// The template client was saved because the provider failed
    pub fallback_used: bool,
}

/// Request to create a template client for a known base URL
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectRequest {
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl ConnectRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::MissingField("name"));
        }
        if is_blank(&self.base_url) {
            return Err(ValidationError::MissingField("base_url"));
        }
        Url::parse(&self.base_url).map_err(|e| ValidationError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Result of the connect workflow
#[derive(Debug, Clone, Serialize)]
pub struct ConnectReport {
    pub slug: String,
    pub artifact_path: PathBuf,
    pub metadata_path: PathBuf,
    pub auth_mode: AuthMode,
}

fn default_endpoint() -> String {
    "/".to_string()
}

fn default_method() -> String {
    "GET".to_string()
}

/// Request to smoke-test an existing integration
#[derive(Debug, Clone, Deserialize)]
pub struct TestRequest {
    pub name: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// Used when the integration has no stored base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

impl TestRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: default_endpoint(),
            method: default_method(),
            base_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::MissingField("name"));
        }
        Ok(())
    }
}

/// Result of the test workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TestOutcome {
    /// No metadata exists for the integration
    NotFound,
    /// Neither the metadata nor the request provides a base URL
    MissingBaseUrl,
    /// The request was sent; `body` is truncated for display
    Completed {
        url: String,
        status: u16,
        body: String,
    },
}
