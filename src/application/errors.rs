//! Application layer error types

use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Provider error: {0}")]
    Provider(#[from] crate::generation::ProviderError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::core::Error),

    #[error("Smoke test failed: {0}")]
    Probe(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<reqwest::Error> for ApplicationError {
    fn from(e: reqwest::Error) -> Self {
        ApplicationError::Probe(e.to_string())
    }
}

/// Validation errors for requests
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ProviderError;

    #[test]
    fn test_application_error_wraps_provider_error() {
        let error: ApplicationError = ProviderError::MissingCredential("GEMINI_API_KEY".into()).into();
        match error {
            ApplicationError::Provider(ProviderError::MissingCredential(var)) => {
                assert_eq!(var, "GEMINI_API_KEY")
            }
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingField("prompt").to_string(),
            "Missing required field: prompt"
        );
        let error: ApplicationError = ValidationError::InvalidBaseUrl {
            url: "nope".into(),
            reason: "relative URL without a base".into(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Validation error: Invalid base URL 'nope': relative URL without a base"
        );
    }
}
