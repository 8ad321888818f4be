use std::path::PathBuf;

use clap::Parser;

use gh_release_path::RawInputs;

/// Command-line arguments, falling back to the Actions input environment
#[derive(Parser, Debug)]
#[command(name = "gh-release-path")]
#[command(version, about = "Download a GitHub release asset for this platform and add it to PATH")]
pub struct Args {
    /// Repository in owner/project form
    #[arg(long, env = "INPUT_REPO")]
    pub repo: Option<String>,

    /// Release tag, or "latest" for the newest release
    #[arg(long, env = "INPUT_TAG")]
    pub tag: Option<String>,

    /// Extract into this directory instead of a fresh one under RUNNER_TEMP
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

impl Args {
    /// Combine arguments with the job environment (read once, here)
    pub fn into_inputs(self) -> RawInputs {
        RawInputs {
            token: std::env::var("GITHUB_TOKEN").ok(),
            repo: self.repo,
            tag: self.tag,
            api_url: std::env::var("GITHUB_API_URL").ok(),
            work_dir: std::env::var_os("RUNNER_TEMP")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            dest: self.dest,
        }
    }
}
