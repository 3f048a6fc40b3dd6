//! HTTP smoke test for a generated client's target API

use reqwest::{Client, Method};
use std::collections::BTreeMap;
use std::time::Duration;

/// Upper bound for one smoke-test request
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a smoke-test response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub status: u16,
    pub body: String,
}

/// Join a base URL and an endpoint with exactly one `/` between them
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Map a method name onto a supported HTTP method; anything unknown is GET
pub fn parse_method(method: &str) -> Method {
    match method.trim().to_uppercase().as_str() {
        "POST" => Method::POST,
        "PUT" => Method::PUT,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        "HEAD" => Method::HEAD,
        "OPTIONS" => Method::OPTIONS,
        _ => Method::GET,
    }
}

/// Issues single smoke-test requests
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client })
    }

    /// Send one request and return whatever status and body come back.
    ///
    /// Non-success statuses are results, not errors; only transport failures
    /// are reported as `Err`.
    pub async fn request(
        &self,
        base_url: &str,
        endpoint: &str,
        method: &str,
        headers: &BTreeMap<String, String>,
        payload: Option<&serde_json::Value>,
    ) -> Result<ProbeResult, reqwest::Error> {
        let url = join_url(base_url, endpoint);
        let method = parse_method(method);
        tracing::info!(%url, %method, "Sending smoke-test request");

        let mut request = self.client.request(method, &url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(%url, status, "Smoke-test response received");

        Ok(ProbeResult { status, body })
    }
}
