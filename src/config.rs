//! Validated run configuration
//!
//! Built once at startup from the command line and the job environment, so the
//! runner never touches process-wide state itself.

use std::path::PathBuf;

use crate::error::ActionError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Sentinel tag value selecting the newest published release
pub const LATEST_TAG: &str = "latest";

/// Which release to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTag {
    Latest,
    Named(String),
}

impl ReleaseTag {
    pub fn parse(tag: &str) -> Self {
        if tag == LATEST_TAG {
            ReleaseTag::Latest
        } else {
            ReleaseTag::Named(tag.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseTag::Latest => LATEST_TAG,
            ReleaseTag::Named(tag) => tag,
        }
    }
}

impl std::fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated values as they arrive from the CLI and environment
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub token: Option<String>,
    pub repo: Option<String>,
    pub tag: Option<String>,
    pub api_url: Option<String>,
    pub work_dir: Option<PathBuf>,
    pub dest: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub token: String,
    pub owner: String,
    pub project: String,
    pub tag: ReleaseTag,
    /// API base without trailing slash
    pub api_url: String,
    /// Scratch space for downloads and extraction directories
    pub work_dir: PathBuf,
    /// Explicit extraction directory, overriding a fresh one under `work_dir`
    pub dest: Option<PathBuf>,
}

impl ActionConfig {
    /// Validate inputs in a fixed order: token, repo, tag, then repo shape.
    pub fn from_inputs(raw: RawInputs) -> Result<Self, ActionError> {
        let token = non_empty(raw.token).ok_or_else(|| ActionError::config("No GitHub token found"))?;
        let repo = non_empty(raw.repo).ok_or_else(|| ActionError::config("Repo was not specified"))?;
        let tag = non_empty(raw.tag).ok_or_else(|| ActionError::config("Tag not specified"))?;

        let (owner, project) = split_repo(&repo)?;

        let api_url = non_empty(raw.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            token,
            owner,
            project,
            tag: ReleaseTag::parse(&tag),
            api_url,
            work_dir: raw.work_dir.unwrap_or_else(std::env::temp_dir),
            dest: raw.dest,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split `owner/project`, rejecting anything but exactly two non-empty parts
fn split_repo(repo: &str) -> Result<(String, String), ActionError> {
    match repo.split_once('/') {
        Some((owner, project))
            if !owner.is_empty() && !project.is_empty() && !project.contains('/') =>
        {
            Ok((owner.to_string(), project.to_string()))
        }
        _ => Err(ActionError::config(format!(
            "Repo must be in owner/project form, got: {}",
            repo
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(token: Option<&str>, repo: Option<&str>, tag: Option<&str>) -> RawInputs {
        RawInputs {
            token: token.map(String::from),
            repo: repo.map(String::from),
            tag: tag.map(String::from),
            ..Default::default()
        }
    }

    fn config_message(raw: RawInputs) -> String {
        match ActionConfig::from_inputs(raw) {
            Err(ActionError::Config(msg)) => msg,
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_inputs() {
        let cfg = ActionConfig::from_inputs(inputs(Some("t0k"), Some("owner/proj"), Some("v1.0.0")))
            .unwrap();
        assert_eq!(cfg.owner, "owner");
        assert_eq!(cfg.project, "proj");
        assert_eq!(cfg.tag, ReleaseTag::Named("v1.0.0".to_string()));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_latest_sentinel() {
        let cfg = ActionConfig::from_inputs(inputs(Some("t"), Some("o/p"), Some("latest"))).unwrap();
        assert_eq!(cfg.tag, ReleaseTag::Latest);
        // Only the exact sentinel selects the latest release
        assert_eq!(ReleaseTag::parse("Latest"), ReleaseTag::Named("Latest".to_string()));
    }

    #[test]
    fn test_missing_values_checked_in_order() {
        assert_eq!(config_message(inputs(None, None, None)), "No GitHub token found");
        assert_eq!(config_message(inputs(Some("t"), None, None)), "Repo was not specified");
        assert_eq!(config_message(inputs(Some("t"), Some("  "), Some("v1"))), "Repo was not specified");
        assert_eq!(config_message(inputs(Some("t"), Some("o/p"), Some(""))), "Tag not specified");
    }

    #[test]
    fn test_malformed_repo() {
        for repo in ["noslash", "a/b/c", "/b", "a/"] {
            let msg = config_message(inputs(Some("t"), Some(repo), Some("latest")));
            assert!(msg.contains("owner/project"), "{repo}: {msg}");
        }
    }

    #[test]
    fn test_api_url_trailing_slash() {
        let mut raw = inputs(Some("t"), Some("o/p"), Some("latest"));
        raw.api_url = Some("http://127.0.0.1:8080/".to_string());
        let cfg = ActionConfig::from_inputs(raw).unwrap();
        assert_eq!(cfg.api_url, "http://127.0.0.1:8080");
    }
}
