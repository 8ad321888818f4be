//! GitHub release resolution, download and extraction
//!
//! ## Module Organization
//!
//! - `platform` - Host OS/arch detection and pattern fragments
//! - `github` - GitHub API interaction for release discovery and asset download
//! - `matcher` - Asset name pattern and first-match selection
//! - `extract` - .tar.gz and .zip extraction

pub mod extract;
pub mod github;
pub mod matcher;
pub mod platform;

pub use extract::{ArchiveKind, extract_archive};
pub use github::{GitHubAsset, GitHubClient, GitHubRelease, ReleaseHost, get_release};
pub use matcher::{asset_pattern, select_asset};
pub use platform::{HostPlatform, OsPlatform};
