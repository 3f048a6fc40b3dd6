//! Static client templates
//!
//! Direct connections and offline fallbacks do not involve the provider;
//! they render a fixed client template with the target base URL and an
//! optional token substituted in.

use tera::{Context, Tera};

use crate::core::Result;
use crate::generation::Language;

/// Embedded Python client template
pub const PYTHON_CLIENT_TEMPLATE: &str = include_str!("../../templates/python_client.py.tera");

const PYTHON_CLIENT_NAME: &str = "python_client.py";

/// Base URL used when a client template stands in for a failed generation
pub const FALLBACK_BASE_URL: &str = "https://httpbin.org";

/// Language every static template is written in
pub const TEMPLATE_LANGUAGE: Language = Language::Python;

/// Render the Python client for `base_url`, embedding `token` when given
pub fn render_python_client(base_url: &str, token: Option<&str>) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(PYTHON_CLIENT_NAME, PYTHON_CLIENT_TEMPLATE)?;

    let mut context = Context::new();
    context.insert("base_url", base_url);
    context.insert("token", token.unwrap_or_default());

    Ok(tera.render(PYTHON_CLIENT_NAME, &context)?)
}

/// Client rendered when the provider is unavailable
pub fn render_fallback_client() -> Result<String> {
    render_python_client(FALLBACK_BASE_URL, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_base_url_and_token() {
        let code = render_python_client("https://api.example.com", Some("tok_123")).unwrap();
        assert!(code.contains(r#"os.getenv("API_BASE_URL", "https://api.example.com")"#));
        assert!(code.contains(r#"os.getenv("API_TOKEN", "tok_123")"#));
        assert!(!code.contains("{{"));
    }

    #[test]
    fn test_render_without_token_leaves_empty_default() {
        let code = render_python_client("https://api.example.com", None).unwrap();
        assert!(code.contains(r#"os.getenv("API_TOKEN", "")"#));
    }

    #[test]
    fn test_render_keeps_python_braces_intact() {
        let code = render_python_client("https://api.example.com", None).unwrap();
        assert!(code.contains(r#"h = {"Accept": "application/json"}"#));
        assert!(code.contains(r#"f"Bearer {TOKEN}""#));
    }

    #[test]
    fn test_fallback_client_targets_httpbin() {
        let code = render_fallback_client().unwrap();
        assert!(code.contains(FALLBACK_BASE_URL));
    }
}
