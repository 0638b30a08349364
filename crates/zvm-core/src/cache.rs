//! On-disk cache of downloaded archives.
//!
//! Entries are keyed by the URL's final path segment under `cache/web/`. A
//! file already present is trusted only after its checksum is recomputed and
//! matches the manifest's recorded value; staleness or corruption is never
//! silently accepted. Freshly downloaded bytes are written as-is (the
//! transport is trusted); the next lookup of the same key verifies them.
//! Nothing is evicted automatically.

use std::io::Read;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::Error;
use crate::paths::{filename_from_url, ZvmHome};
use crate::reporter::Reporter;
use crate::Result;

/// How [`ArchiveCache::obtain`] satisfied a request.
#[derive(Debug)]
pub enum Obtained {
    /// Checksum-verified cache hit; no network activity.
    Cached(PathBuf),
    /// Freshly downloaded, with the number of bytes transferred.
    Downloaded(PathBuf, u64),
}

impl Obtained {
    /// The local archive path, wherever it came from.
    pub fn path(&self) -> &Path {
        match self {
            Self::Cached(p) | Self::Downloaded(p, _) => p,
        }
    }
}

/// Manages `cache/web/` and the explicit clear operation for `cache/`.
#[derive(Debug, Clone)]
pub struct ArchiveCache {
    http: reqwest::Client,
    cache_dir: PathBuf,
    web_dir: PathBuf,
}

impl ArchiveCache {
    pub fn new(home: &ZvmHome) -> Self {
        Self::with_client(home, reqwest::Client::new())
    }

    /// Share an existing HTTP client (connection pool).
    pub fn with_client(home: &ZvmHome, http: reqwest::Client) -> Self {
        Self {
            http,
            cache_dir: home.cache_dir(),
            web_dir: home.web_cache_dir(),
        }
    }

    /// Return a local path for the archive at `url`, reusing a cached copy
    /// only when its checksum matches `expected_sha256`.
    ///
    /// `expected_size` is the manifest's byte count, used as the progress
    /// total (the transfer itself is not limited by it).
    pub async fn obtain<R: Reporter>(
        &self,
        url: &str,
        expected_sha256: &str,
        expected_size: u64,
        reporter: &R,
    ) -> Result<Obtained> {
        let filename = filename_from_url(url);
        let dest = self.web_dir.join(filename);

        if dest.exists() {
            let actual = sha256_file(&dest).await?;
            if actual == expected_sha256 {
                debug!(archive = filename, "checksum match, using cached archive");
                reporter.cache_hit(filename);
                return Ok(Obtained::Cached(dest));
            }
            debug!(
                archive = filename,
                expected = expected_sha256,
                actual = %actual,
                "cached archive is stale, downloading again"
            );
            reporter.cache_stale(filename);
        }

        tokio::fs::create_dir_all(&self.web_dir).await?;

        let resp = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Error::DownloadFailed {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let total = match resp.content_length() {
            Some(n) if n > 0 => n,
            _ => expected_size,
        };

        let mut file = File::create(&dest).await?;
        let mut stream = resp.bytes_stream();
        let mut downloaded: u64 = 0;

        reporter.downloading(filename, 0, Some(total));
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            reporter.downloading(filename, downloaded, Some(total));
        }
        file.flush().await?;
        reporter.downloaded(filename, downloaded);

        Ok(Obtained::Downloaded(dest, downloaded))
    }

    /// Empty the whole cache directory tree (`cache/web` and
    /// `cache/extracted` alike). Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool> {
        if !self.cache_dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&self.cache_dir)?;
        Ok(true)
    }
}

/// Stream a whole file through SHA-256, off the async runtime.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let path = path.to_path_buf();
    let hash = tokio::task::spawn_blocking(move || {
        let mut hasher = Sha256::new();
        let mut file = std::fs::File::open(&path)?;
        let mut buffer = [0u8; 65536];
        loop {
            let count = file.read(&mut buffer)?;
            if count == 0 {
                break;
            }
            hasher.update(&buffer[..count]);
        }
        Ok::<String, std::io::Error>(hex::encode(hasher.finalize()))
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(hash)
}
