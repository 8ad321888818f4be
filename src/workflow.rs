//! GitHub Actions workflow command surface
//!
//! Publishing a directory on the job's PATH and reporting failure both go
//! through the runner's file and stdout protocols.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::ActionError;

/// Where later steps of the job pick up PATH additions
#[derive(Debug, Clone, Default)]
pub struct WorkflowEnv {
    pub path_file: Option<PathBuf>,
}

impl WorkflowEnv {
    pub fn from_env() -> Self {
        Self {
            path_file: std::env::var_os("GITHUB_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Append `dir` to the job's search path.
    ///
    /// Outside a runner there is no path file; the directory is printed so a
    /// caller can pick it up.
    pub fn add_path(&self, dir: &Path) -> Result<(), ActionError> {
        match &self.path_file {
            Some(path_file) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path_file)?;
                writeln!(file, "{}", dir.display())?;
                info!("Added {} to PATH", dir.display());
            }
            None => {
                warn!("GITHUB_PATH is not set, not running inside a workflow job");
                println!("{}", dir.display());
            }
        }
        Ok(())
    }
}

/// Mark the step failed with an `::error::` annotation
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
