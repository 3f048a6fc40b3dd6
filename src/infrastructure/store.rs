//! Filesystem-backed integration store
//!
//! Layout below the store root:
//!
//! ```text
//! <root>/<slug>/integration.json
//! <root>/<slug>/generated_<YYYYmmdd_HHMMSS>.<ext>
//! ```
//!
//! Directories are created on demand. Filesystem errors are returned as-is;
//! nothing is retried or rolled back.

use chrono::{DateTime, Local};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::{Result, slugify};
use crate::generation::{IntegrationMetadata, Language};

/// Metadata document name inside each integration directory
pub const METADATA_FILE: &str = "integration.json";

/// Prefix of every generated artifact file
pub const ARTIFACT_PREFIX: &str = "generated_";

/// Sortable, second-resolution timestamp used in artifact names
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Directory-per-integration store
#[derive(Debug, Clone)]
pub struct IntegrationStore {
    root: PathBuf,
}

impl IntegrationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the integration directory, without creating it
    pub fn directory_path(&self, name: &str) -> PathBuf {
        self.root.join(slugify(name))
    }

    /// Return the integration directory, creating it and its parents if needed
    pub async fn resolve_directory(&self, name: &str) -> Result<PathBuf> {
        let dir = self.directory_path(name);
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Replace the metadata document of `name` with `metadata`
    pub async fn save_metadata(&self, name: &str, metadata: &IntegrationMetadata) -> Result<PathBuf> {
        let path = self.resolve_directory(name).await?.join(METADATA_FILE);
        fs::write(&path, serde_json::to_string_pretty(metadata)?).await?;
        tracing::debug!(path = %path.display(), "Saved integration metadata");
        Ok(path)
    }

    /// Load the metadata document of `name`.
    ///
    /// A missing document is not an error and yields `None`.
    pub async fn load_metadata(&self, name: &str) -> Result<Option<IntegrationMetadata>> {
        let path = self.directory_path(name).join(METADATA_FILE);
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `content` as a new artifact stamped with the current local time
    pub async fn save_artifact(
        &self,
        name: &str,
        language: &Language,
        content: &str,
    ) -> Result<PathBuf> {
        self.save_artifact_at(name, language, content, Local::now())
            .await
    }

    /// Write `content` as an artifact stamped with `timestamp`.
    ///
    /// Two writes within the same second share a file name; the later one wins.
    pub async fn save_artifact_at(
        &self,
        name: &str,
        language: &Language,
        content: &str,
        timestamp: DateTime<Local>,
    ) -> Result<PathBuf> {
        let dir = self.resolve_directory(name).await?;
        let path = dir.join(artifact_file_name(language, timestamp));
        fs::write(&path, content).await?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Saved generated artifact");
        Ok(path)
    }

    /// All integration slugs in lexicographic order
    pub async fn list_integrations(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// `generated_<timestamp>.<ext>` for the given language
pub fn artifact_file_name(language: &Language, timestamp: DateTime<Local>) -> String {
    format!(
        "{ARTIFACT_PREFIX}{}.{}",
        timestamp.format(ARTIFACT_TIMESTAMP_FORMAT),
        language.file_extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::AuthMode;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn store() -> (TempDir, IntegrationStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = IntegrationStore::new(temp_dir.path().join("integrations"));
        (temp_dir, store)
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 10, 31, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    #[tokio::test]
    async fn test_resolve_directory_is_idempotent() {
        let (_temp, store) = store();

        let first = store.resolve_directory("My API! v2").await.unwrap();
        let second = store.resolve_directory("my api v2").await.unwrap();

        assert_eq!(first, second);
        assert!(first.is_dir());
        assert_eq!(first.file_name().unwrap(), "my-api-v2");
    }

    #[tokio::test]
    async fn test_metadata_round_trip() {
        let (_temp, store) = store();
        let meta = IntegrationMetadata::new(
            "petstore",
            Language::Python,
            PathBuf::from("integrations/petstore/generated_20251031_083819.py"),
        )
        .with_base_url("https://petstore.example.com")
        .with_auth_mode(AuthMode::Bearer);

        let path = store.save_metadata("petstore", &meta).await.unwrap();
        assert_eq!(path.file_name().unwrap(), METADATA_FILE);

        let loaded = store.load_metadata("petstore").await.unwrap();
        assert_eq!(loaded, Some(meta));
    }

    #[tokio::test]
    async fn test_save_metadata_overwrites_without_merging() {
        let (_temp, store) = store();
        let first = IntegrationMetadata::new("svc", Language::Python, PathBuf::from("a.py"))
            .with_base_url("https://one.example.com")
            .with_auth_mode(AuthMode::Bearer);
        let second = IntegrationMetadata::new("svc", Language::Node, PathBuf::from("b.js"));

        store.save_metadata("svc", &first).await.unwrap();
        store.save_metadata("svc", &second).await.unwrap();

        let loaded = store.load_metadata("svc").await.unwrap().unwrap();
        assert_eq!(loaded, second);
        assert!(loaded.base_url.is_none());
        assert_eq!(loaded.auth_mode, AuthMode::None);
    }

    #[tokio::test]
    async fn test_load_hand_edited_metadata_with_both_auth_keys() {
        let (_temp, store) = store();
        let dir = store.resolve_directory("x").await.unwrap();
        std::fs::write(
            dir.join(METADATA_FILE),
            r#"{"name":"x","language":"python","generated_file":"a.py","auth":"Bearer","auth_mode":"bearer"}"#,
        )
        .unwrap();

        let loaded = store.load_metadata("x").await.unwrap().unwrap();
        assert_eq!(loaded.auth_mode, AuthMode::Bearer);
        assert_eq!(loaded.generated_file, PathBuf::from("a.py"));
    }

    #[tokio::test]
    async fn test_missing_metadata_is_none() {
        let (_temp, store) = store();
        assert!(store.load_metadata("never-created").await.unwrap().is_none());
        // Loading does not create the integration
        assert!(store.list_integrations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_metadata_is_an_error() {
        let (_temp, store) = store();
        let dir = store.resolve_directory("broken").await.unwrap();
        std::fs::write(dir.join(METADATA_FILE), "{").unwrap();

        assert!(matches!(
            store.load_metadata("broken").await,
            Err(crate::core::Error::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_artifact_extension_by_language() {
        let (_temp, store) = store();

        let py = store
            .save_artifact_at("x", &Language::Python, "print(1)", at(8, 0, 0))
            .await
            .unwrap();
        let js = store
            .save_artifact_at("x", &Language::Node, "console.log(1)", at(8, 0, 1))
            .await
            .unwrap();
        let txt = store
            .save_artifact_at("x", &Language::Other("go".into()), "package main", at(8, 0, 2))
            .await
            .unwrap();

        assert_eq!(py.file_name().unwrap(), "generated_20251031_080000.py");
        assert_eq!(js.extension().unwrap(), "js");
        assert_eq!(txt.extension().unwrap(), "txt");
        assert_eq!(std::fs::read_to_string(&js).unwrap(), "console.log(1)");
    }

    #[tokio::test]
    async fn test_artifacts_accumulate_and_same_second_overwrites() {
        let (_temp, store) = store();

        store
            .save_artifact_at("hist", &Language::Python, "v1", at(9, 0, 0))
            .await
            .unwrap();
        store
            .save_artifact_at("hist", &Language::Python, "v2", at(9, 0, 5))
            .await
            .unwrap();
        let last = store
            .save_artifact_at("hist", &Language::Python, "v3", at(9, 0, 5))
            .await
            .unwrap();

        let dir = store.directory_path("hist");
        let count = std::fs::read_dir(&dir).unwrap().count();
        assert_eq!(count, 2);
        assert_eq!(std::fs::read_to_string(last).unwrap(), "v3");
    }

    #[tokio::test]
    async fn test_save_artifact_uses_current_time() {
        let (_temp, store) = store();
        let path = store
            .save_artifact("now", &Language::Python, "pass")
            .await
            .unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with(ARTIFACT_PREFIX));
        assert!(file_name.ends_with(".py"));
        // generated_ + YYYYmmdd_HHMMSS + .py
        assert_eq!(file_name.len(), ARTIFACT_PREFIX.len() + 15 + 3);
    }

    #[tokio::test]
    async fn test_list_integrations_sorted() {
        let (_temp, store) = store();
        for name in ["zeta", "Alpha API", "mid"] {
            store.resolve_directory(name).await.unwrap();
        }
        // Stray files are not integrations
        std::fs::write(store.root().join("notes.txt"), "ignore me").unwrap();

        let names = store.list_integrations().await.unwrap();
        assert_eq!(names, vec!["alpha-api", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_list_integrations_without_root() {
        let (_temp, store) = store();
        assert!(!store.root().exists());
        assert!(store.list_integrations().await.unwrap().is_empty());
    }
}
