//! GitHub REST client implementing the [`SolutionStore`] contract.
//!
//! The repository is treated as a path-keyed content store: the contents API
//! gives check-existence, read, and create-or-update-by-path, and the repos
//! API covers existence checks and bootstrap of the target repository.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::contract::{SolutionStore, StoreError};

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Client for one `owner/repository` pair, authenticated with a personal
/// access token.
pub struct GitHubClient {
    http: reqwest::Client,
    owner: String,
    repository: String,
}

/// The subset of a contents API response we care about.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl GitHubClient {
    pub fn new(token: &str, owner: &str, repository: &str) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("leetsync"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            owner: owner.to_string(),
            repository: repository.to_string(),
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{GITHUB_API_BASE}/repos/{}/{}/contents/{path}",
            self.owner, self.repository
        )
    }

    /// Browsable URL of the repository.
    pub fn repository_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repository)
    }

    /// Fetch the contents entry at `path`, `None` on 404.
    async fn get_contents(
        &self,
        path: &str,
        branch: &str,
    ) -> Result<Option<ContentsResponse>, StoreError> {
        let response = self
            .http
            .get(self.contents_url(path))
            .query(&[("ref", branch)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: serde_json::Value = response.json().await?;
                // Directories come back as an array of entries.
                if body.is_array() {
                    return Ok(Some(ContentsResponse {
                        sha: String::new(),
                        content: None,
                        kind: Some("dir".to_string()),
                    }));
                }
                Ok(Some(serde_json::from_value(body)?))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                error!(status = %status, path, "Contents request failed");
                Err(format!("GitHub contents request for {path} failed ({status}): {body}").into())
            }
        }
    }

    /// Verify the token works by asking for the authenticated user.
    pub async fn test_connection(&self) -> bool {
        let result = self
            .http
            .get(format!("{GITHUB_API_BASE}/user"))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let login = response
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|v| v.get("login").and_then(|l| l.as_str()).map(String::from))
                    .unwrap_or_else(|| "Unknown".to_string());
                info!(user = %login, "GitHub connection test successful");
                true
            }
            Ok(response) => {
                error!(status = %response.status(), "GitHub connection test failed");
                false
            }
            Err(e) => {
                error!(error = ?e, "GitHub connection test failed");
                false
            }
        }
    }
}

#[async_trait]
impl SolutionStore for GitHubClient {
    async fn file_exists(&self, path: &str, branch: &str) -> Result<bool, StoreError> {
        Ok(self.get_contents(path, branch).await?.is_some())
    }

    async fn read_file(
        &self,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, StoreError> {
        let Some(entry) = self.get_contents(path, branch).await? else {
            return Ok(None);
        };
        if entry.kind.as_deref() == Some("dir") {
            return Ok(None);
        }
        let Some(encoded) = entry.content else {
            return Ok(None);
        };
        // The API wraps base64 payloads across lines.
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = BASE64.decode(compact.as_bytes())?;
        Ok(Some(String::from_utf8(bytes)?))
    }

    async fn write_file(
        &self,
        path: &str,
        content: &str,
        commit_message: &str,
        branch: &str,
    ) -> Result<(), StoreError> {
        // Updating an existing file needs its current blob sha.
        let existing = self.get_contents(path, branch).await?;
        if existing.as_ref().and_then(|e| e.kind.as_deref()) == Some("dir") {
            error!(path, "Path is a directory");
            return Err(format!("Path is a directory: {path}").into());
        }

        let mut body = json!({
            "message": commit_message,
            "content": BASE64.encode(content.as_bytes()),
            "branch": branch,
        });
        if let Some(entry) = &existing {
            body["sha"] = json!(entry.sha);
        }

        let response = self
            .http
            .put(self.contents_url(path))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            if existing.is_some() {
                info!(path, "Updated file");
            } else {
                info!(path, "Created file");
            }
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, path, "Failed to create/update file");
            Err(format!("GitHub write to {path} failed ({status}): {text}").into())
        }
    }

    async fn repository_exists(&self) -> Result<bool, StoreError> {
        let response = self
            .http
            .get(format!(
                "{GITHUB_API_BASE}/repos/{}/{}",
                self.owner, self.repository
            ))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(format!("GitHub repository lookup failed ({status}): {body}").into())
            }
        }
    }

    async fn create_repository(&self, description: &str) -> Result<(), StoreError> {
        debug!(repository = %self.repository, "Creating repository");
        let body = json!({
            "name": self.repository,
            "description": description,
            "private": false,
            "auto_init": true,
        });

        let response = self
            .http
            .post(format!("{GITHUB_API_BASE}/user/repos"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(repository = %self.repository, "Created repository");
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, "Failed to create repository");
            Err(format!("GitHub repository creation failed ({status}): {text}").into())
        }
    }
}
