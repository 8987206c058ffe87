//! Latest-release lookup against the GitHub REST API using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use crate::domain::AppError;
use crate::ports::ReleaseSource;

const DEFAULT_API_URL: &str = "https://api.github.com/";
const DEFAULT_REPOSITORY: &str = "livekit/livekit-server";
const USER_AGENT: &str = concat!("deploygen/", env!("CARGO_PKG_VERSION"));

/// Fetches the tag of the latest published server release.
#[derive(Debug, Clone)]
pub struct GithubReleaseSource {
    api_url: Url,
    repository: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

impl GithubReleaseSource {
    pub fn new(api_url: Url, repository: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { api_url, repository: repository.into(), client })
    }

    /// Client for the public GitHub API and the server repository.
    pub fn public() -> Result<Self, AppError> {
        let api_url = Url::parse(DEFAULT_API_URL)
            .map_err(|e| AppError::config_error(format!("Invalid API URL: {e}")))?;
        Self::new(api_url, DEFAULT_REPOSITORY)
    }

    fn latest_release_url(&self) -> Result<Url, AppError> {
        self.api_url
            .join(&format!("repos/{}/releases/latest", self.repository))
            .map_err(|e| AppError::ReleaseLookup(format!("Invalid release URL: {e}")))
    }
}

impl ReleaseSource for GithubReleaseSource {
    fn latest_version(&self) -> Result<String, AppError> {
        let url = self.latest_release_url()?;
        tracing::debug!(%url, "fetching latest release");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| AppError::ReleaseLookup(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ReleaseLookup(format!("unexpected status {status}")));
        }

        let release: LatestRelease =
            response.json().map_err(|e| AppError::ReleaseLookup(e.to_string()))?;
        if release.tag_name.is_empty() {
            return Err(AppError::ReleaseLookup("release has no tag".into()));
        }
        Ok(release.tag_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_release_url_joins_repository() {
        let source =
            GithubReleaseSource::new(Url::parse("http://127.0.0.1:1/").unwrap(), "org/repo")
                .unwrap();
        assert_eq!(
            source.latest_release_url().unwrap().as_str(),
            "http://127.0.0.1:1/repos/org/repo/releases/latest"
        );
    }

    #[test]
    fn reads_tag_from_response() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/repos/livekit/livekit-server/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tag_name":"v1.8.0","name":"v1.8.0"}"#)
            .create();

        let api_url = Url::parse(&format!("{}/", server.url())).unwrap();
        let source = GithubReleaseSource::new(api_url, DEFAULT_REPOSITORY).unwrap();
        assert_eq!(source.latest_version().unwrap(), "v1.8.0");
        mock.assert();
    }

    #[test]
    fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/repos/livekit/livekit-server/releases/latest")
            .with_status(403)
            .create();

        let api_url = Url::parse(&format!("{}/", server.url())).unwrap();
        let source = GithubReleaseSource::new(api_url, DEFAULT_REPOSITORY).unwrap();
        let err = source.latest_version().unwrap_err();
        assert!(matches!(err, AppError::ReleaseLookup(ref m) if m.contains("403")));
    }
}
