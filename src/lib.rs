//! Install a GitHub release asset for the host platform into a CI job.
//!
//! The release is resolved through the GitHub API, the first asset whose name
//! matches the host's platform and architecture is downloaded and extracted,
//! and the extracted directory is appended to the job's `GITHUB_PATH`.

pub mod config;
pub mod download;
pub mod error;
pub mod runner;
pub mod workflow;

pub use config::{ActionConfig, RawInputs, ReleaseTag};
pub use error::ActionError;
pub use runner::{install, run};
pub use workflow::WorkflowEnv;
