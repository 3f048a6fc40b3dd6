//! Integration lifecycle use cases
//!
//! [`IntegrationService`] is the single entry point both front doors call.
//! It owns the ordering guarantees: an artifact is always written before the
//! metadata that points at it, and provider failures are resolved (either
//! propagated or replaced by the template client) before anything touches
//! disk.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::fs;

use crate::application::{
    ApplicationError, ConnectReport, ConnectRequest, DISPLAY_BODY_MAX_CHARS, FallbackPolicy,
    GenerateReport, GenerateRequest, InitReport, InitRequest, TestOutcome, TestRequest,
};
use crate::core::config::CREDENTIAL_ENV_VAR;
use crate::core::{AppConfig, Workspace, derive_name, slugify};
use crate::generation::response::truncate_chars;
use crate::generation::secrets::PLACEHOLDER_TOKEN;
use crate::generation::templates::{
    TEMPLATE_LANGUAGE, render_fallback_client, render_python_client,
};
use crate::generation::{
    AuthMode, CodeGenerator, IntegrationMetadata, PlaceholderSecretSource, SecretSource,
};
use crate::infrastructure::gemini::DEFAULT_MODEL;
use crate::infrastructure::probe::join_url;
use crate::infrastructure::{GeminiProvider, HttpProbe, IntegrationStore};

/// Orchestrates name resolution, generation and persistence
pub struct IntegrationService {
    workspace: Workspace,
    generator: Arc<dyn CodeGenerator>,
    probe: HttpProbe,
    tokens: Arc<dyn SecretSource>,
}

impl IntegrationService {
    pub fn new(
        workspace: Workspace,
        generator: Arc<dyn CodeGenerator>,
        tokens: Arc<dyn SecretSource>,
    ) -> Result<Self, ApplicationError> {
        Ok(Self {
            workspace,
            generator,
            probe: HttpProbe::new()?,
            tokens,
        })
    }

    /// Gemini provider with the environment credential and placeholder test tokens
    pub fn with_defaults(workspace: Workspace) -> Result<Self, ApplicationError> {
        Self::new(
            workspace,
            Arc::new(GeminiProvider::from_env()?),
            Arc::new(PlaceholderSecretSource),
        )
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Configuration is re-read on every call so edits apply without a restart
    async fn config(&self) -> Result<AppConfig, ApplicationError> {
        Ok(AppConfig::load(&self.workspace).await?)
    }

    async fn store(&self) -> Result<IntegrationStore, ApplicationError> {
        let config = self.config().await?;
        Ok(IntegrationStore::new(
            self.workspace.integrations_dir(&config),
        ))
    }

    /// Save the configuration and create the workspace directories
    pub async fn init(&self, request: InitRequest) -> Result<InitReport, ApplicationError> {
        let config = AppConfig::new(request.project_name, request.language);
        let config_path = config.save(&self.workspace).await.map_err(ApplicationError::from)?;

        for dir in [
            self.workspace.integrations_dir(&config),
            self.workspace.profiles_dir(),
            self.workspace.logs_dir(),
        ] {
            fs::create_dir_all(&dir)
                .await
                .map_err(|e| ApplicationError::Storage(e.into()))?;
        }

        let env_path = self.workspace.env_path();
        let env_created = request.write_env && !env_path.exists();
        if env_created {
            fs::write(&env_path, format!("{CREDENTIAL_ENV_VAR}=\n"))
                .await
                .map_err(|e| ApplicationError::Storage(e.into()))?;
            tracing::info!(path = %env_path.display(), "Created credential placeholder file");
        }

        tracing::info!(
            project = %config.project_name,
            language = %config.language,
            "Project initialised"
        );
        Ok(InitReport {
            config,
            config_path,
            env_created,
        })
    }

    /// Slugs of every known integration, sorted
    pub async fn list(&self) -> Result<Vec<String>, ApplicationError> {
        Ok(self.store().await?.list_integrations().await?)
    }

    /// Generate client code from a prompt and persist it
    pub async fn generate(
        &self,
        request: GenerateRequest,
        policy: FallbackPolicy,
    ) -> Result<GenerateReport, ApplicationError> {
        request.validate()?;

        let config = self.config().await?;
        let store = IntegrationStore::new(self.workspace.integrations_dir(&config));
        let name = request
            .explicit_name()
            .map(str::to_string)
            .unwrap_or_else(|| derive_name(&request.prompt));
        let model = request.model.as_deref().unwrap_or(DEFAULT_MODEL);
        let mut language = request.language.clone().unwrap_or(config.language);

        tracing::info!(integration = %name, %model, %language, "Generating integration");

        let (code, fallback_used) = match self
            .generator
            .generate(&request.prompt, request.credential.as_deref(), model)
            .await
        {
            Ok(code) => (code, false),
            Err(e) if policy.substitutes(&e) => {
                tracing::warn!(integration = %name, error = %e, "Provider unavailable, saving template client");
                language = TEMPLATE_LANGUAGE;
                (render_fallback_client()?, true)
            }
            Err(e) => return Err(e.into()),
        };

        let artifact_path = store.save_artifact(&name, &language, &code).await?;
        let metadata = IntegrationMetadata::new(name.clone(), language, artifact_path.clone());
        let metadata_path = store.save_metadata(&name, &metadata).await?;

        tracing::info!(path = %artifact_path.display(), fallback_used, "Integration saved");
        Ok(GenerateReport {
            slug: slugify(&name),
            name,
            artifact_path,
            metadata_path,
            fallback_used,
        })
    }

    /// Render the template client for a known base URL and persist it
    pub async fn connect(&self, request: ConnectRequest) -> Result<ConnectReport, ApplicationError> {
        request.validate()?;

        let store = self.store().await?;
        let token = request.token.as_deref().filter(|t| !t.trim().is_empty());
        let auth_mode = AuthMode::from_token(token);

        let code = render_python_client(&request.base_url, token)?;
        let artifact_path = store
            .save_artifact(&request.name, &TEMPLATE_LANGUAGE, &code)
            .await?;
        let metadata =
            IntegrationMetadata::new(request.name.clone(), TEMPLATE_LANGUAGE, artifact_path.clone())
                .with_base_url(request.base_url.clone())
                .with_auth_mode(auth_mode);
        let metadata_path = store.save_metadata(&request.name, &metadata).await?;

        tracing::info!(integration = %request.name, base_url = %request.base_url, ?auth_mode, "Client connected");
        Ok(ConnectReport {
            slug: slugify(&request.name),
            artifact_path,
            metadata_path,
            auth_mode,
        })
    }

    /// Send one request to the integration's API and report what came back
    pub async fn test(&self, request: TestRequest) -> Result<TestOutcome, ApplicationError> {
        request.validate()?;

        let store = self.store().await?;
        let Some(metadata) = store.load_metadata(&request.name).await? else {
            tracing::info!(integration = %request.name, "Integration not found");
            return Ok(TestOutcome::NotFound);
        };

        let Some(base_url) = metadata
            .base_url
            .clone()
            .or_else(|| request.base_url.clone())
            .filter(|url| !url.trim().is_empty())
        else {
            return Ok(TestOutcome::MissingBaseUrl);
        };

        let mut headers = BTreeMap::new();
        if metadata.auth_mode == AuthMode::Bearer {
            // Tokens are never persisted; the secret source decides what is sent
            let token = self.tokens.secret(&slugify(&request.name));
            let token = token
                .as_ref()
                .map(|t| t.expose_secret())
                .unwrap_or(PLACEHOLDER_TOKEN);
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let result = self
            .probe
            .request(&base_url, &request.endpoint, &request.method, &headers, None)
            .await?;

        Ok(TestOutcome::Completed {
            url: join_url(&base_url, &request.endpoint),
            status: result.status,
            body: truncate_chars(&result.body, DISPLAY_BODY_MAX_CHARS),
        })
    }
}
