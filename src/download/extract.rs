//! Archive extraction for release assets
//!
//! Handles .tar.gz and .zip; the format is decided from the asset name before
//! anything is downloaded.

use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use zip::ZipArchive;

use crate::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    TarGz,
    Zip,
}

impl ArchiveKind {
    pub fn from_asset_name(name: &str) -> Result<Self, ActionError> {
        if name.ends_with(".tar.gz") {
            Ok(ArchiveKind::TarGz)
        } else if name.ends_with(".zip") {
            Ok(ArchiveKind::Zip)
        } else {
            Err(ActionError::UnsupportedArchive(name.to_string()))
        }
    }
}

fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<(), ActionError> {
    let tar_gz = std::fs::File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(tar_gz));
    archive.set_preserve_permissions(true);
    // unpack() refuses entries that would land outside `dest`
    archive.unpack(dest)?;
    Ok(())
}

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<(), ActionError> {
    let zip_file = std::fs::File::open(archive_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    archive.extract(dest)?;
    Ok(())
}

/// Extract `archive_path` into `dest`, creating it if needed.
///
/// Runs on a blocking thread since decompression is CPU-bound.
pub async fn extract_archive(
    kind: ArchiveKind,
    archive_path: &Path,
    dest: &Path,
) -> Result<PathBuf, ActionError> {
    tokio::fs::create_dir_all(dest).await?;

    let archive_path = archive_path.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || {
        match kind {
            ArchiveKind::TarGz => extract_tar_gz(&archive_path, &dest)?,
            ArchiveKind::Zip => extract_zip(&archive_path, &dest)?,
        }
        Ok::<PathBuf, ActionError>(dest)
    })
    .await
    .map_err(|e| ActionError::Io(std::io::Error::other(e)))?
}
