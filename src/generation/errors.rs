//! Error types for the generation domain

use thiserror::Error;

/// Errors surfaced by a code generation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No usable credential; raised before any request is sent
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    /// The configured provider endpoint is not a valid URL
    #[error("Invalid provider endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The provider answered with a non-success status
    #[error("Provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Coarse classification used by front doors to pick a fallback behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    Configuration,
    Http,
    Transport,
}

impl ProviderError {
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::MissingCredential(_) | ProviderError::InvalidEndpoint { .. } => {
                ProviderErrorKind::Configuration
            }
            ProviderError::Http { .. } => ProviderErrorKind::Http,
            ProviderError::Transport(_) => ProviderErrorKind::Transport,
        }
    }
}

// The request URL carries the API key as a query parameter; never echo it
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.without_url().to_string())
    }
}
