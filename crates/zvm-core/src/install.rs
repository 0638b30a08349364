//! Staged installation: obtain, extract, validate, promote.
//!
//! An install is all-or-nothing with respect to the versions directory: the
//! archive is unpacked into a transient staging area first, its shape is
//! validated there, and only then is the toolchain root renamed (one atomic
//! move, never a copy) into `versions/<token>`. A failure mid-extraction can
//! leave a stray staging directory behind; `zvm cache clear` disposes of it.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

use crate::cache::ArchiveCache;
use crate::error::Error;
use crate::extract;
use crate::paths::{ZvmHome, VERSION_MARKER};
use crate::reporter::Reporter;
use crate::resolver::ResolvedVersion;
use crate::Result;

// Staging directories are named "{pid}-{seq}" so that concurrent installs of
// different versions never collide, even when started in the same second.
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

fn staging_id() -> String {
    format!(
        "{}-{}",
        std::process::id(),
        STAGING_SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

/// Orchestrates download, extraction and promotion of one version.
#[derive(Debug)]
pub struct Installer {
    home: ZvmHome,
    cache: ArchiveCache,
}

impl Installer {
    pub fn new(home: ZvmHome, cache: ArchiveCache) -> Self {
        Self { home, cache }
    }

    /// Install `resolved` under `versions/<token>`.
    ///
    /// The marker file records the canonical version, which for a channel
    /// token differs from the directory name.
    pub async fn install<R: Reporter>(
        &self,
        resolved: &ResolvedVersion,
        token: &str,
        reporter: &R,
    ) -> Result<()> {
        let dest = self.home.version_dir(token);
        if dest.exists() {
            return Err(Error::AlreadyInstalled(token.to_string()));
        }

        let obtained = self
            .cache
            .obtain(
                &resolved.target.tarball,
                &resolved.target.shasum,
                resolved.target.size,
                reporter,
            )
            .await?;

        let staging = self.home.extract_cache_dir().join(staging_id());
        tokio::fs::create_dir_all(&staging).await?;
        debug!(archive = %obtained.path().display(), staging = %staging.display(), "extracting");
        extract::extract(obtained.path(), &staging).await?;

        // The archive layout is an unannounced upstream contract: exactly one
        // top-level directory holding the toolchain root.
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&staging)? {
            entries.push(entry?.path());
        }
        if entries.len() != 1 {
            return Err(Error::ArchiveShapeInvalid {
                count: entries.len(),
            });
        }

        tokio::fs::create_dir_all(self.home.versions_dir()).await?;
        tokio::fs::rename(&entries[0], &dest).await?;
        tokio::fs::write(dest.join(VERSION_MARKER), &resolved.canonical).await?;
        tokio::fs::remove_dir(&staging).await?;

        info!(token, canonical = %resolved.canonical, "installed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Target;
    use crate::reporter::NullReporter;
    use crate::store::VersionStore;
    use sha2::{Digest, Sha256};
    use tempfile::TempDir;

    fn make_tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
        let mut builder = tar::Builder::new(encoder);
        for (path, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, path, *contents).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn resolved_for(server: &mockito::Server, archive: &str, body: &[u8], canonical: &str) -> ResolvedVersion {
        ResolvedVersion {
            requested: canonical.to_string(),
            canonical: canonical.to_string(),
            target: Target {
                tarball: format!("{}/builds/{archive}", server.url()),
                shasum: hex::encode(Sha256::digest(body)),
                size: body.len() as u64,
            },
        }
    }

    async fn serve(server: &mut mockito::Server, archive: &str, body: Vec<u8>) -> mockito::Mock {
        server
            .mock("GET", format!("/builds/{archive}").as_str())
            .with_body(body)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn install_roundtrip_writes_marker_and_lists() {
        let mut server = mockito::Server::new_async().await;
        let body = make_tar_gz(&[
            ("zig-linux-x86_64-0.11.0/zig", b"#!fake".as_slice()),
            ("zig-linux-x86_64-0.11.0/lib/std.zig", b"// std".as_slice()),
        ]);
        let _m = serve(&mut server, "zig-0.11.0.tar.gz", body.clone()).await;

        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        let installer = Installer::new(home.clone(), ArchiveCache::new(&home));

        let resolved = resolved_for(&server, "zig-0.11.0.tar.gz", &body, "0.11.0");
        installer
            .install(&resolved, "0.11.0", &NullReporter)
            .await
            .unwrap();

        assert!(home.version_dir("0.11.0").join("zig").is_file());
        assert_eq!(
            std::fs::read_to_string(home.version_marker("0.11.0")).unwrap(),
            "0.11.0"
        );

        let listed = VersionStore::new(home.clone()).list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].token, "0.11.0");
        assert_eq!(listed[0].canonical, "0.11.0");

        // staging is gone
        let staging_entries: Vec<_> = match std::fs::read_dir(home.extract_cache_dir()) {
            Ok(rd) => rd.collect(),
            Err(_) => Vec::new(),
        };
        assert!(staging_entries.is_empty());
    }

    #[tokio::test]
    async fn channel_install_records_canonical_in_marker() {
        let mut server = mockito::Server::new_async().await;
        let body = make_tar_gz(&[("zig-master/zig", b"bin".as_slice())]);
        let _m = serve(&mut server, "zig-master.tar.gz", body.clone()).await;

        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        let installer = Installer::new(home.clone(), ArchiveCache::new(&home));

        let mut resolved = resolved_for(&server, "zig-master.tar.gz", &body, "0.12.0-dev.1092+68ed78775");
        resolved.requested = "master".to_string();
        installer
            .install(&resolved, "master", &NullReporter)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(home.version_marker("master")).unwrap(),
            "0.12.0-dev.1092+68ed78775"
        );
    }

    #[tokio::test]
    async fn two_top_level_entries_is_a_shape_error() {
        let mut server = mockito::Server::new_async().await;
        let body = make_tar_gz(&[
            ("zig-0.11.0/zig", b"bin".as_slice()),
            ("second-root/oops", b"?".as_slice()),
        ]);
        let _m = serve(&mut server, "zig-bad.tar.gz", body.clone()).await;

        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        let installer = Installer::new(home.clone(), ArchiveCache::new(&home));

        let resolved = resolved_for(&server, "zig-bad.tar.gz", &body, "0.11.0");
        let err = installer
            .install(&resolved, "0.11.0", &NullReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ArchiveShapeInvalid { count: 2 }));
        // nothing landed under versions/
        assert!(!home.version_dir("0.11.0").exists());
    }

    #[tokio::test]
    async fn installing_over_existing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        std::fs::create_dir_all(home.version_dir("0.11.0")).unwrap();

        let server = mockito::Server::new_async().await;
        let installer = Installer::new(home.clone(), ArchiveCache::new(&home));
        let resolved = resolved_for(&server, "unused.tar.gz", b"", "0.11.0");

        let err = installer
            .install(&resolved, "0.11.0", &NullReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyInstalled(t) if t == "0.11.0"));
    }

    #[test]
    fn staging_ids_are_unique() {
        let a = staging_id();
        let b = staging_id();
        assert_ne!(a, b);
        assert!(a.starts_with(&format!("{}-", std::process::id())));
    }
}
