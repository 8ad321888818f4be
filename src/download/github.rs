//! GitHub release API interaction

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use log::debug;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

use crate::config::{ActionConfig, ReleaseTag};
use crate::error::ActionError;

const USER_AGENT: &str = concat!("gh-release-path/", env!("CARGO_PKG_VERSION"));
const API_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_CONNECT_TIMEOUT: Duration = Duration::from_secs(30); // Initial connection
const DOWNLOAD_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(300); // 5 min no data

/// GitHub release metadata from API
#[derive(Deserialize, Debug, Clone)]
pub struct GitHubRelease {
    pub tag_name: String,
    pub assets: Vec<GitHubAsset>,
}

/// GitHub release asset metadata
#[derive(Deserialize, Debug, Clone)]
pub struct GitHubAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

/// Source of release metadata and asset bytes.
///
/// [`GitHubClient`] talks to the real API; tests substitute a recording fake.
#[allow(async_fn_in_trait)]
pub trait ReleaseHost {
    async fn latest_release(&self, owner: &str, project: &str) -> Result<GitHubRelease, ActionError>;

    async fn release_by_tag(
        &self,
        owner: &str,
        project: &str,
        tag: &str,
    ) -> Result<GitHubRelease, ActionError>;

    /// Stream `url` into `dest`, returning the number of bytes written
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, ActionError>;
}

/// Fetch the release named by `tag`, choosing the API call from the sentinel
pub async fn get_release<H: ReleaseHost>(
    host: &H,
    owner: &str,
    project: &str,
    tag: &ReleaseTag,
) -> Result<GitHubRelease, ActionError> {
    match tag {
        ReleaseTag::Latest => host.latest_release(owner, project).await,
        ReleaseTag::Named(tag) => host.release_by_tag(owner, project, tag).await,
    }
}

pub struct GitHubClient {
    api: reqwest::Client,
    downloads: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(config: &ActionConfig) -> Result<Self, ActionError> {
        let api = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(API_TIMEOUT)
            .build()?;

        // Connect timeout only: large assets may legitimately take minutes
        let downloads = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(DOWNLOAD_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            api,
            downloads,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Join `segments` onto the API base, percent-encoding each one so tags
    /// containing `/` or `#` stay a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ActionError> {
        let invalid = || ActionError::config(format!("Invalid GitHub API URL: {}", self.api_url));
        let mut url = Url::parse(&self.api_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_release(
        &self,
        url: Url,
        not_found: impl FnOnce() -> ActionError,
    ) -> Result<GitHubRelease, ActionError> {
        debug!("GET {}", url);
        let response = self
            .api
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(not_found()),
            status if !status.is_success() => Err(ActionError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => Ok(response.json().await?),
        }
    }
}

impl ReleaseHost for GitHubClient {
    async fn latest_release(
        &self,
        owner: &str,
        project: &str,
    ) -> Result<GitHubRelease, ActionError> {
        let url = self.endpoint(&["repos", owner, project, "releases", "latest"])?;
        self.fetch_release(url, || ActionError::NotFound {
            owner: owner.to_string(),
            project: project.to_string(),
            tag: ReleaseTag::Latest.to_string(),
        })
        .await
    }

    async fn release_by_tag(
        &self,
        owner: &str,
        project: &str,
        tag: &str,
    ) -> Result<GitHubRelease, ActionError> {
        let url = self.endpoint(&["repos", owner, project, "releases", "tags", tag])?;
        self.fetch_release(url, || ActionError::NotFound {
            owner: owner.to_string(),
            project: project.to_string(),
            tag: tag.to_string(),
        })
        .await
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64, ActionError> {
        let response = self.downloads.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ActionError::Download {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        loop {
            // Wrap stream.next() with timeout to detect inactivity
            let chunk = match timeout(DOWNLOAD_INACTIVITY_TIMEOUT, stream.next()).await {
                Ok(Some(Ok(chunk))) => chunk,
                Ok(Some(Err(e))) => return Err(e.into()),
                Ok(None) => break,
                Err(_) => {
                    return Err(ActionError::Download {
                        url: url.to_string(),
                        reason: format!(
                            "no data received for {} seconds after {} bytes",
                            DOWNLOAD_INACTIVITY_TIMEOUT.as_secs(),
                            downloaded
                        ),
                    });
                }
            };

            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }

        file.flush().await?;
        Ok(downloaded)
    }
}
