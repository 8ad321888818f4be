//! Release resolution procedure
//!
//! Inputs are validated and the host platform is mapped before any network
//! access. After that the release is fetched, an asset picked, its archive
//! format checked, and only then is it downloaded, extracted and published.

use std::path::PathBuf;

use log::info;

use crate::config::{ActionConfig, RawInputs};
use crate::download::{
    ArchiveKind, GitHubClient, HostPlatform, ReleaseHost, asset_pattern, extract_archive,
    get_release, select_asset,
};
use crate::error::ActionError;
use crate::workflow::WorkflowEnv;

/// Run against the real GitHub API for the detected host platform
pub async fn run(raw: RawInputs, workflow: &WorkflowEnv) -> Result<PathBuf, ActionError> {
    let config = ActionConfig::from_inputs(raw)?;
    let platform = HostPlatform::detect()?;
    let client = GitHubClient::new(&config)?;

    install(&config, platform, &client, workflow).await
}

/// Resolve, download, extract and publish; returns the extracted directory
pub async fn install<H: ReleaseHost>(
    config: &ActionConfig,
    platform: HostPlatform,
    host: &H,
    workflow: &WorkflowEnv,
) -> Result<PathBuf, ActionError> {
    let release = get_release(host, &config.owner, &config.project, &config.tag).await?;
    info!("Resolved {} to release {}", config.tag, release.tag_name);

    let pattern = asset_pattern(&platform)?;
    let asset = select_asset(&release.assets, &pattern).ok_or_else(|| {
        ActionError::AssetNotFound {
            tag: config.tag.to_string(),
            found: release.assets.iter().map(|a| a.name.clone()).collect(),
        }
    })?;

    // Defensive: the pattern already requires a .tar.gz or .zip suffix
    let kind = ArchiveKind::from_asset_name(&asset.name)?;

    tokio::fs::create_dir_all(&config.work_dir).await?;

    // Guard removes the downloaded archive once extraction is done
    let download_dir = tempfile::Builder::new()
        .prefix("gh-release-path-")
        .tempdir_in(&config.work_dir)?;
    let archive_path = download_dir.path().join(&asset.name);

    info!("Downloading {} from {}", config.project, asset.browser_download_url);
    let bytes = host.download(&asset.browser_download_url, &archive_path).await?;
    // A missing size deserializes as 0 and is not checked
    if asset.size != 0 && bytes != asset.size {
        return Err(ActionError::Download {
            url: asset.browser_download_url.clone(),
            reason: format!("received {} of {} bytes", bytes, asset.size),
        });
    }
    info!("Downloaded {} bytes to {}", bytes, archive_path.display());

    let dest = match &config.dest {
        Some(dest) => dest.clone(),
        None => tempfile::Builder::new()
            .prefix(&format!("{}-", config.project))
            .tempdir_in(&config.work_dir)?
            .keep(),
    };

    let extracted = extract_archive(kind, &archive_path, &dest).await?;
    info!("Successfully extracted {} to {}", config.project, extracted.display());

    workflow.add_path(&extracted)?;
    Ok(extracted)
}
