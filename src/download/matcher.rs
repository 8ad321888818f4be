//! Asset selection by platform name pattern

use log::info;
use regex::Regex;

use super::github::GitHubAsset;
use super::platform::HostPlatform;
use crate::error::ActionError;

/// Build the asset name pattern for a platform.
///
/// The single-character wildcards around the arch fragment stay loose so
/// `linux-amd64`, `linux_amd64` and `linux.amd64` all match. The extension
/// is a literal suffix anchored at the end, which keeps `.sha256` and
/// similar sidecar files out.
pub fn asset_pattern(platform: &HostPlatform) -> Result<Regex, ActionError> {
    let pattern = format!(r"{}.{}.*\.(tar\.gz|zip)$", platform.os.as_str(), platform.arch);
    Ok(Regex::new(&pattern)?)
}

/// Return the first asset, in release order, whose name matches `pattern`
pub fn select_asset<'a>(assets: &'a [GitHubAsset], pattern: &Regex) -> Option<&'a GitHubAsset> {
    assets.iter().find(|asset| {
        info!("searching for {} with {}", asset.name, pattern.as_str());
        pattern.is_match(&asset.name)
    })
}
