//! Latest-revision lookup against the GitHub API
//!
//! Used as the fallback when a requested module has no registry entry. The lookup
//! is a single request for the newest commit on `main`.

use crate::product::ProductConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Timeout for a single revision lookup
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Branch queried by the fallback and recorded on synthesized entries
pub const FALLBACK_BRANCH: &str = "main";

/// Why a revision lookup failed
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0} from GitHub")]
    Status(u16),

    #[error("invalid GitHub response: {0}")]
    Decode(String),

    #[error("no sha in GitHub response")]
    MissingRevision,

    #[error("cannot build lookup URL from {0}")]
    Url(String),
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    #[serde(default)]
    sha: Option<String>,
}

/// Client for the "latest commit on main" lookup
pub struct RevisionLookup {
    client: reqwest::Client,
    api_base: Url,
    owner: String,
}

impl RevisionLookup {
    /// Create a lookup against `api_base` for repositories owned by `owner`
    pub fn new(api_base: Url, owner: &str, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(LOOKUP_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            api_base,
            owner: owner.to_string(),
        }
    }

    /// Create a lookup from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self, LookupError> {
        let api_base = Url::parse(config.github_api_url())
            .map_err(|_| LookupError::Url(config.github_api_url().to_string()))?;
        Ok(Self::new(api_base, config.github_owner(), config.user_agent()))
    }

    /// Clone URI recorded for modules resolved through the fallback
    pub fn repo_uri(&self, repo: &str) -> String {
        format!("https://github.com/{}/{}.git", self.owner, repo)
    }

    /// `<api>/repos/<owner>/<repo>/commits/main`, preserving any base path
    fn commit_url(&self, repo: &str) -> Result<Url, LookupError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::Url(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), repo, "commits", FALLBACK_BRANCH]);
        Ok(url)
    }

    /// Fetch the newest commit hash on the repository's main branch
    pub async fn latest_main_commit(&self, repo: &str) -> Result<String, LookupError> {
        let url = self.commit_url(repo)?;
        tracing::debug!(%url, "Looking up latest revision");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let payload: CommitPayload = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        match payload.sha {
            Some(sha) if !sha.trim().is_empty() => Ok(sha.trim().to_string()),
            _ => Err(LookupError::MissingRevision),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn lookup_for(server: &MockServer) -> RevisionLookup {
        RevisionLookup::new(
            Url::parse(&server.base_url()).unwrap(),
            "eclipse-score",
            "test",
        )
    }

    #[test]
    fn test_repo_uri() {
        let lookup = RevisionLookup::new(
            Url::parse("https://api.github.com").unwrap(),
            "eclipse-score",
            "test",
        );
        assert_eq!(
            lookup.repo_uri("baselibs"),
            "https://github.com/eclipse-score/baselibs.git"
        );
    }

    #[test]
    fn test_commit_url_keeps_base_path() {
        let lookup = RevisionLookup::new(
            Url::parse("https://ghe.example.com/api/v3/").unwrap(),
            "eclipse-score",
            "test",
        );
        assert_eq!(
            lookup.commit_url("feo").unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/eclipse-score/feo/commits/main"
        );
    }

    #[tokio::test]
    async fn test_latest_main_commit() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/eclipse-score/feo/commits/main")
                    .header_exists("user-agent");
                then.status(200)
                    .json_body(json!({"sha": "deadbeef", "commit": {"message": "x"}}));
            })
            .await;

        let sha = lookup_for(&server).latest_main_commit("feo").await.unwrap();

        mock.assert_async().await;
        assert_eq!(sha, "deadbeef");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/eclipse-score/missing/commits/main");
                then.status(404).json_body(json!({"message": "Not Found"}));
            })
            .await;

        let err = lookup_for(&server)
            .latest_main_commit("missing")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Status(404)));
    }

    #[tokio::test]
    async fn test_empty_sha_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/eclipse-score/feo/commits/main");
                then.status(200).json_body(json!({"sha": ""}));
            })
            .await;

        let err = lookup_for(&server).latest_main_commit("feo").await.unwrap_err();
        assert!(matches!(err, LookupError::MissingRevision));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/eclipse-score/feo/commits/main");
                then.status(200).body("<html>rate limited</html>");
            })
            .await;

        let err = lookup_for(&server).latest_main_commit("feo").await.unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }
}
