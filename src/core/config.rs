//! Project configuration and workspace paths
//!
//! The project configuration lives at `.integra/config.json` below the
//! workspace root. All other persisted paths (integrations, logs, `.env`)
//! are resolved from the same root so nothing in the library depends on the
//! process working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::{Error, Result};
use crate::generation::Language;

/// Directory holding the project configuration
pub const CONFIG_DIR: &str = ".integra";
/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.json";
/// Default store root, relative to the workspace
pub const DEFAULT_OUTPUT_DIR: &str = "integrations";
/// Default project name
pub const DEFAULT_PROJECT_NAME: &str = "Integra.AI";
/// Environment variable supplying the provider credential
pub const CREDENTIAL_ENV_VAR: &str = "GEMINI_API_KEY";

/// Root directory every persisted path is resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace rooted at the current working directory
    pub fn current() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    pub fn env_path(&self) -> PathBuf {
        self.root.join(".env")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("integra.log")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Store root for the given configuration
    pub fn integrations_dir(&self, config: &AppConfig) -> PathBuf {
        self.root.join(&config.output_dir)
    }
}

/// Persisted project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project_name: String,
    pub language: Language,
    pub output_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            language: Language::Python,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl AppConfig {
    pub fn new(project_name: impl Into<String>, language: Language) -> Self {
        Self {
            project_name: project_name.into(),
            language,
            ..Default::default()
        }
    }

    /// Load the configuration, writing the defaults first if no file exists yet
    pub async fn load(workspace: &Workspace) -> Result<Self> {
        let path = workspace.config_path();
        match fs::read_to_string(&path).await {
            Ok(raw) => {
                let config: Self = serde_json::from_str(&raw)?;
                if config.output_dir.trim().is_empty() {
                    return Err(Error::config(format!(
                        "output_dir in {} must not be empty",
                        path.display()
                    )));
                }
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No configuration found, writing defaults");
                let config = Self::default();
                config.save(workspace).await?;
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, workspace: &Workspace) -> Result<PathBuf> {
        let path = workspace.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, serde_json::to_string_pretty(self)?).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_writes_defaults_when_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());

        let config = AppConfig::load(&workspace).await.unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(workspace.config_path().exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());

        let config = AppConfig::new("Payments", Language::Node);
        config.save(&workspace).await.unwrap();

        let loaded = AppConfig::load(&workspace).await.unwrap();
        assert_eq!(loaded.project_name, "Payments");
        assert_eq!(loaded.language, Language::Node);
        assert_eq!(loaded.output_dir, DEFAULT_OUTPUT_DIR);
    }

    #[tokio::test]
    async fn test_config_file_shape() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());
        AppConfig::default().save(&workspace).await.unwrap();

        let raw = std::fs::read_to_string(workspace.config_path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["project_name"], "Integra.AI");
        assert_eq!(value["language"], "python");
        assert_eq!(value["output_dir"], "integrations");
    }

    #[tokio::test]
    async fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());
        std::fs::create_dir_all(temp_dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(workspace.config_path(), r#"{"language": "node"}"#).unwrap();

        let config = AppConfig::load(&workspace).await.unwrap();
        assert_eq!(config.language, Language::Node);
        assert_eq!(config.project_name, DEFAULT_PROJECT_NAME);
    }

    #[tokio::test]
    async fn test_malformed_config_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());
        std::fs::create_dir_all(temp_dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(workspace.config_path(), "{ nope").unwrap();

        let result = AppConfig::load(&workspace).await;
        assert!(matches!(result, Err(crate::core::Error::Json(_))));
    }

    #[tokio::test]
    async fn test_blank_output_dir_is_a_config_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(temp_dir.path());
        std::fs::create_dir_all(temp_dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(workspace.config_path(), r#"{"output_dir": "  "}"#).unwrap();

        match AppConfig::load(&workspace).await {
            Err(Error::Config(message)) => assert!(message.contains("output_dir")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_workspace_paths() {
        let workspace = Workspace::new("/tmp/project");
        let config = AppConfig::default();
        assert_eq!(
            workspace.config_path(),
            PathBuf::from("/tmp/project/.integra/config.json")
        );
        assert_eq!(
            workspace.log_file(),
            PathBuf::from("/tmp/project/logs/integra.log")
        );
        assert_eq!(
            workspace.integrations_dir(&config),
            PathBuf::from("/tmp/project/integrations")
        );
    }
}
