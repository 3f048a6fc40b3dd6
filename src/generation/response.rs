//! Interpretation of provider responses
//!
//! Response shapes drift between API versions. Instead of failing on an
//! unexpected shape, a successful call always yields some text: either the
//! generated text itself or the whole decoded payload rendered as a string.

use serde_json::Value;

/// Maximum number of body characters kept when reporting an HTTP failure
pub const ERROR_BODY_MAX_CHARS: usize = 500;

/// Outcome of one provider exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResponse {
    /// Generated text found where the provider normally puts it
    Text(String),
    /// Success, but the expected shape was absent; carries the stringified body
    RawFallback(String),
    /// Non-success status, body already truncated
    HttpFailure { status: u16, body: String },
}

impl ProviderResponse {
    /// Classify a raw HTTP exchange
    pub fn parse(status: u16, body: &str) -> Self {
        if !(200..300).contains(&status) {
            return ProviderResponse::HttpFailure {
                status,
                body: truncate_chars(body, ERROR_BODY_MAX_CHARS),
            };
        }

        match serde_json::from_str::<Value>(body) {
            Ok(payload) => match extract_text(&payload) {
                Some(text) => ProviderResponse::Text(text.to_string()),
                None => ProviderResponse::RawFallback(payload.to_string()),
            },
            Err(_) => ProviderResponse::RawFallback(body.to_string()),
        }
    }
}

/// First non-empty `text` field among the first candidate's content parts
pub fn extract_text(payload: &Value) -> Option<&str> {
    payload
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?
        .iter()
        .find_map(|part| part.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Cut `s` to at most `max` characters without splitting a code point
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
