//! Error taxonomy for release resolution
//!
//! Every step of the run reports through [`ActionError`]; `main` is the single
//! place that turns one into a failed job.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    /// Missing or malformed input
    #[error("{0}")]
    Config(String),

    #[error(
        "Unsupported operating system {0} - this action is only released for Darwin, Linux and Windows"
    )]
    UnsupportedPlatform(String),

    #[error("Unsupported architecture {0} - this action is only released for x64/amd64")]
    UnsupportedArchitecture(String),

    #[error("File is neither .tar.gz nor .zip, got: {0}")]
    UnsupportedArchive(String),

    #[error("No release found for {owner}/{project} at {tag}")]
    NotFound {
        owner: String,
        project: String,
        tag: String,
    },

    #[error("Could not find a release for {tag}. Found: {}", .found.join(","))]
    AssetNotFound { tag: String, found: Vec<String> },

    #[error("GitHub API error for {url}: HTTP {status}")]
    Api { status: u16, url: String },

    #[error("Download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("Invalid asset pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ActionError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
