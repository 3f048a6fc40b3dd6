//! Gemini `generateContent` adapter
//!
//! One prompt in, one request out, one string back. No retries, no
//! streaming. The credential is resolved before anything goes on the wire,
//! so a missing key never costs a network round trip.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::core::config::CREDENTIAL_ENV_VAR;
use crate::generation::{
    CodeGenerator, EnvSecretSource, ProviderError, ProviderResponse, Secret, SecretSource,
};

/// Public Generative Language API host
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Environment variable that points the adapter at another host
pub const ENDPOINT_ENV_VAR: &str = "INTEGRA_GEMINI_ENDPOINT";

/// Model used when the caller does not pick one
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// API version for every model without an entry in the compatibility table
pub const CURRENT_API_VERSION: &str = "v1beta";

/// Upper bound for one generation request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Models that are only served on an older API version
const MODEL_API_VERSIONS: &[(&str, &str)] = &[("gemini-pro", "v1")];

/// API version serving `model`
pub fn api_version_for(model: &str) -> &'static str {
    MODEL_API_VERSIONS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, version)| *version)
        .unwrap_or(CURRENT_API_VERSION)
}

/// Settings for [`GeminiProvider`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    /// Name looked up in the secret source when no explicit credential is given
    pub credential_name: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credential_name: CREDENTIAL_ENV_VAR.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Point the adapter at another host, e.g. a local mock server
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, url::ParseError> {
        self.endpoint = Url::parse(endpoint)?.to_string();
        Ok(self)
    }
}

/// Code generator backed by the Gemini REST API
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    secrets: Arc<dyn SecretSource>,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig, secrets: Arc<dyn SecretSource>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            config,
            secrets,
        })
    }

    /// Credential read from the environment at call time; the endpoint
    /// comes from [`ENDPOINT_ENV_VAR`] when set
    pub fn from_env() -> Result<Self, ProviderError> {
        let config = match std::env::var(ENDPOINT_ENV_VAR) {
            Ok(endpoint) if !endpoint.trim().is_empty() => GeminiConfig::default()
                .with_endpoint(endpoint.trim())
                .map_err(|e| ProviderError::InvalidEndpoint {
                    endpoint: endpoint.clone(),
                    reason: e.to_string(),
                })?,
            _ => GeminiConfig::default(),
        };
        Self::new(config, Arc::new(EnvSecretSource))
    }

    /// `generateContent` URL for `model`
    pub fn request_url(&self, model: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            api_version_for(model),
            model
        )
    }

    fn resolve_credential(&self, explicit: Option<&str>) -> Result<Secret, ProviderError> {
        explicit
            .and_then(Secret::new)
            .or_else(|| self.secrets.secret(&self.config.credential_name))
            .ok_or_else(|| ProviderError::MissingCredential(self.config.credential_name.clone()))
    }
}

#[async_trait]
impl CodeGenerator for GeminiProvider {
    async fn generate(
        &self,
        prompt: &str,
        credential: Option<&str>,
        model: &str,
    ) -> Result<String, ProviderError> {
        let key = self.resolve_credential(credential)?;
        let url = self.request_url(model);
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        tracing::info!(model = %model, "Calling Gemini generateContent");
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .query(&[("key", key.expose_secret())])
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        match ProviderResponse::parse(status, &text) {
            ProviderResponse::Text(generated) => Ok(generated),
            ProviderResponse::RawFallback(raw) => {
                tracing::debug!(model = %model, "Response had no text part, returning raw payload");
                Ok(raw)
            }
            ProviderResponse::HttpFailure { status, body } => {
                tracing::error!(status, text = %body, "Gemini error");
                Err(ProviderError::Http { status, body })
            }
        }
    }
}
