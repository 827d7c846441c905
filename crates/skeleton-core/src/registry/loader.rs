//! Registry loading from a remote URL or a local file

use super::snapshot::RegistrySnapshot;
use crate::error::{Result, ScaffoldError};
use crate::product::ProductConfig;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use url::Url;

/// Timeout for fetching the registry document
const REGISTRY_TIMEOUT: Duration = Duration::from_secs(30);

/// Registry source - either an HTTP(S) URL or a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    Remote(Url),
    Local(PathBuf),
}

impl RegistrySource {
    /// Classify a user-supplied URL or path
    pub fn parse(url_or_path: &str) -> Result<Self> {
        let value = url_or_path.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            let url = Url::parse(value)
                .map_err(|e| ScaffoldError::registry(value, format!("Invalid URL: {}", e)))?;
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Local(PathBuf::from(value)))
        }
    }
}

impl fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrySource::Remote(url) => write!(f, "{}", url),
            RegistrySource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Registry URL from the product's override env var, falling back to its default
pub fn registry_url_from_env<C: ProductConfig>(config: &C) -> String {
    std::env::var(config.registry_url_env())
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| config.default_registry_url().to_string())
}

/// Loads registry snapshots
pub struct RegistryLoader {
    client: reqwest::Client,
}

impl RegistryLoader {
    /// Create a loader with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(REGISTRY_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a loader from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Self {
        Self::new(config.user_agent())
    }

    /// Fetch (or read) and parse the registry document
    pub async fn load(&self, source: &RegistrySource) -> Result<RegistrySnapshot> {
        let source_ref = source.to_string();
        let data = match source {
            RegistrySource::Remote(url) => {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|e| ScaffoldError::registry(&source_ref, e))?;

                if !response.status().is_success() {
                    return Err(ScaffoldError::registry(
                        &source_ref,
                        format!("HTTP {}", response.status()),
                    ));
                }

                response
                    .bytes()
                    .await
                    .map_err(|e| ScaffoldError::registry(&source_ref, e))?
                    .to_vec()
            }
            RegistrySource::Local(path) => fs::read(path)
                .await
                .map_err(|e| ScaffoldError::registry(&source_ref, e))?,
        };

        let snapshot = parse_snapshot(&data, &source_ref)?;
        tracing::info!(
            source = %source_ref,
            modules = snapshot.modules.len(),
            timestamp = %snapshot.timestamp,
            "Loaded registry snapshot"
        );
        Ok(snapshot)
    }
}

/// Parse a registry document; unknown fields are ignored
pub fn parse_snapshot(data: &[u8], source_ref: &str) -> Result<RegistrySnapshot> {
    serde_json::from_slice(data)
        .map_err(|e| ScaffoldError::registry(source_ref, format!("Invalid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    const DOC: &str = r#"{
        "timestamp": "2025-06-01",
        "modules": {
            "score_baselibs": {"version": "2.1.0", "hash": "h1", "repo": "u1"}
        }
    }"#;

    #[test]
    fn test_parse_classifies_sources() {
        assert!(matches!(
            RegistrySource::parse("https://example.com/known_good.json").unwrap(),
            RegistrySource::Remote(_)
        ));
        assert!(matches!(
            RegistrySource::parse("http://localhost:8080/kg.json").unwrap(),
            RegistrySource::Remote(_)
        ));
        assert_eq!(
            RegistrySource::parse("./known_good.json").unwrap(),
            RegistrySource::Local(PathBuf::from("./known_good.json"))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_url() {
        let err = RegistrySource::parse("http://[::1").unwrap_err();
        assert!(matches!(err, ScaffoldError::RegistryLoad { .. }));
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("known_good.json");
        std::fs::write(&path, DOC).unwrap();

        let loader = RegistryLoader::new("test");
        let snapshot = loader.load(&RegistrySource::Local(path)).await.unwrap();

        assert_eq!(snapshot.get("score_baselibs").unwrap().version, "2.1.0");
    }

    #[tokio::test]
    async fn test_load_missing_local_file_fails() {
        let temp = TempDir::new().unwrap();
        let loader = RegistryLoader::new("test");

        let err = loader
            .load(&RegistrySource::Local(temp.path().join("absent.json")))
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::RegistryLoad { .. }));
    }

    #[tokio::test]
    async fn test_load_malformed_json_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("known_good.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = RegistryLoader::new("test")
            .load(&RegistrySource::Local(path))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_parse_snapshot_accepts_null_branch() {
        let doc = r#"{"modules":{"score_x":{"version":"1","hash":"h","repo":"r","branch":null}}}"#;
        let snapshot = parse_snapshot(doc.as_bytes(), "t").unwrap();
        assert_eq!(snapshot.get("score_x").unwrap().branch, "");
    }

    #[tokio::test]
    async fn test_load_remote() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/known_good.json");
                then.status(200).body(DOC);
            })
            .await;

        let source = RegistrySource::parse(&server.url("/known_good.json")).unwrap();
        let snapshot = RegistryLoader::new("test").load(&source).await.unwrap();

        mock.assert_async().await;
        assert_eq!(snapshot.modules.len(), 1);
    }

    #[tokio::test]
    async fn test_load_remote_non_success_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/known_good.json");
                then.status(503);
            })
            .await;

        let source = RegistrySource::parse(&server.url("/known_good.json")).unwrap();
        let err = RegistryLoader::new("test").load(&source).await.unwrap_err();

        assert!(err.to_string().contains("503"));
    }
}
