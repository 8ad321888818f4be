//! Platform detection for asset name matching

use once_cell::sync::OnceCell;

use crate::error::ActionError;

/// Operating systems release assets are published for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsPlatform {
    Linux,
    Darwin,
    Windows,
}

impl OsPlatform {
    /// Name as it appears in asset file names
    pub fn as_str(&self) -> &'static str {
        match self {
            OsPlatform::Linux => "linux",
            OsPlatform::Darwin => "darwin",
            OsPlatform::Windows => "windows",
        }
    }
}

/// Canonical (platform, arch) pair used to build the asset pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: OsPlatform,
    /// Regex fragment matching every spelling of the architecture
    pub arch: &'static str,
}

/// Global cache for platform detection (initialized once, used everywhere)
static PLATFORM_CACHE: OnceCell<HostPlatform> = OnceCell::new();

impl HostPlatform {
    /// Detect current platform (cached after first call)
    pub fn detect() -> Result<Self, ActionError> {
        PLATFORM_CACHE
            .get_or_try_init(|| Self::from_parts(std::env::consts::OS, std::env::consts::ARCH))
            .copied()
    }

    /// Map Rust target names onto asset naming conventions.
    ///
    /// Only the x64 class is supported; any other architecture is a hard
    /// failure rather than a silent pass-through.
    pub fn from_parts(os: &str, arch: &str) -> Result<Self, ActionError> {
        let os = match os {
            "linux" => OsPlatform::Linux,
            "macos" => OsPlatform::Darwin,
            "windows" => OsPlatform::Windows,
            other => return Err(ActionError::UnsupportedPlatform(other.to_string())),
        };

        let arch = match arch {
            "x86_64" => "(x64|amd64)",
            other => return Err(ActionError::UnsupportedArchitecture(other.to_string())),
        };

        Ok(HostPlatform { os, arch })
    }
}
