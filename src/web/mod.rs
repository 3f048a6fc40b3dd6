//! HTTP front door
//!
//! A thin JSON API over [`IntegrationService`] plus one static page. The
//! generate endpoint keeps working without a provider: any provider failure
//! is replaced by the template client and reported through `fallback_used`.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::application::{
    ApplicationError, ConnectRequest, FallbackPolicy, FallbackScope, GenerateRequest, InitRequest,
    IntegrationService, TestOutcome, TestRequest,
};
use crate::generation::Language;

/// Policy applied to provider failures on the generate endpoint
pub const WEB_FALLBACK: FallbackPolicy =
    FallbackPolicy::SubstituteTemplate(FallbackScope::AnyProviderError);

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Integra</title>
</head>
<body>
  <h1>Integra</h1>
  <p>Describe the API client you need.</p>
  <form id="generate">
    <textarea name="prompt" rows="6" cols="80" required></textarea>
    <br>
    <button type="submit">Generate</button>
  </form>
  <pre id="result"></pre>
  <script>
    document.getElementById("generate").addEventListener("submit", async (event) => {
      event.preventDefault();
      const prompt = new FormData(event.target).get("prompt");
      const response = await fetch("/api/generate", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ prompt }),
      });
      document.getElementById("result").textContent =
        JSON.stringify(await response.json(), null, 2);
    });
  </script>
</body>
</html>
"#;

type AppState = Arc<IntegrationService>;

/// Error body returned by every endpoint: `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::Validation(_) => Self::bad_request(e.to_string()),
            other => {
                tracing::error!(error = %other, "Request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: other.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Body of `POST /api/generate`; a missing prompt is answered with 400
#[derive(Debug, Default, Deserialize)]
struct GenerateBody {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    language: Option<Language>,
    #[serde(default)]
    model: Option<String>,
}

/// Build the router for the given service
pub fn router(service: Arc<IntegrationService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/integrations", get(list_integrations))
        .route("/api/generate", post(generate))
        .route("/api/connect", post(connect))
        .route("/api/test", post(test_integration))
        .route("/api/init", post(init))
        .with_state(service)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(service: Arc<IntegrationService>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Web server listening");
    axum::serve(listener, router(service)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_integrations(State(service): State<AppState>) -> Result<Json<Value>, ApiError> {
    let items = service.list().await?;
    Ok(Json(json!({ "items": items })))
}

async fn generate(
    State(service): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    // An unreadable body is treated like an empty one
    let body = body.map(|Json(body)| body).unwrap_or_default();
    let Some(prompt) = body.prompt.filter(|p| !p.trim().is_empty()) else {
        return Err(ApiError::bad_request("prompt is required"));
    };

    let request = GenerateRequest {
        prompt,
        name: body.name,
        language: body.language,
        model: body.model,
        credential: None,
    };
    let report = service.generate(request, WEB_FALLBACK).await?;

    Ok(Json(json!({
        "saved_to": report.artifact_path,
        "fallback_used": report.fallback_used,
    })))
}

/// Unwrap a JSON body, answering an unreadable one with 400
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

async fn connect(
    State(service): State<AppState>,
    body: Result<Json<ConnectRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(body)?;
    let report = service.connect(request).await?;
    Ok(Json(json!({
        "saved_to": report.artifact_path,
        "slug": report.slug,
        "auth_mode": report.auth_mode,
    })))
}

async fn test_integration(
    State(service): State<AppState>,
    body: Result<Json<TestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TestOutcome>), ApiError> {
    let request = json_body(body)?;
    let outcome = service.test(request).await?;
    let status = match outcome {
        TestOutcome::NotFound => StatusCode::NOT_FOUND,
        TestOutcome::MissingBaseUrl => StatusCode::BAD_REQUEST,
        TestOutcome::Completed { .. } => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}

async fn init(
    State(service): State<AppState>,
    body: Result<Json<InitRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = body.map(|Json(body)| body).unwrap_or_default();
    let report = service.init(request).await?;
    Ok(Json(json!({
        "config_path": report.config_path,
        "env_created": report.env_created,
        "project_name": report.config.project_name,
        "language": report.config.language,
    })))
}
