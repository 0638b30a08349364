//! Archive extraction, dispatched on file extension.
//!
//! Upstream ships `.tar.xz` everywhere except Windows, which gets `.zip`.
//! Anything non-zip is handed to the tar reader, with the decompressor
//! chosen by suffix. Nested or multi-stream formats are not supported.

use std::path::Path;

use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use crate::Result;

/// Supported archive container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Xz-compressed tar archive (`.tar.xz` / `.txz`).
    TarXz,
    /// Gzip-compressed tar archive (`.tar.gz` / `.tgz`).
    TarGz,
    /// Uncompressed tar archive.
    Tar,
    /// Zip archive (`.zip`).
    Zip,
}

/// Decide the extraction format from an archive filename.
pub fn detect_format(path: &Path) -> ArchiveFormat {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.ends_with(".zip") {
        ArchiveFormat::Zip
    } else if name.ends_with(".tar.xz") || name.ends_with(".txz") {
        ArchiveFormat::TarXz
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        ArchiveFormat::TarGz
    } else {
        ArchiveFormat::Tar
    }
}

/// Unpack `archive` into `dest`, off the async runtime.
///
/// `dest` must already exist; entries land directly inside it.
pub async fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let format = detect_format(archive);
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || extract_sync(format, &archive, &dest))
        .await
        .map_err(std::io::Error::other)??;
    Ok(())
}

fn extract_sync(format: ArchiveFormat, archive: &Path, dest: &Path) -> std::io::Result<()> {
    let file = std::fs::File::open(archive)?;
    match format {
        ArchiveFormat::Zip => {
            let mut zip = zip::ZipArchive::new(file).map_err(std::io::Error::other)?;
            zip.extract(dest).map_err(std::io::Error::other)?;
        }
        ArchiveFormat::TarXz => {
            tar::Archive::new(XzDecoder::new(file)).unpack(dest)?;
        }
        ArchiveFormat::TarGz => {
            tar::Archive::new(GzDecoder::new(file)).unpack(dest)?;
        }
        ArchiveFormat::Tar => {
            tar::Archive::new(file).unpack(dest)?;
        }
    }
    Ok(())
}
