//! The versions directory: enumeration, metadata reads, removal.

use std::path::PathBuf;

use tracing::debug;

use crate::error::Error;
use crate::paths::{ZvmHome, VERSION_MARKER};
use crate::Result;

/// One installed version: a directory under the versions root holding the
/// unpacked toolchain and a marker recording its canonical version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledVersion {
    /// Directory name: the token the user installed ("stable", "0.11.0", ...).
    pub token: String,
    /// The concrete version string recorded at install time.
    pub canonical: String,
}

/// Owns the versions directory.
#[derive(Debug, Clone)]
pub struct VersionStore {
    home: ZvmHome,
}

impl VersionStore {
    pub fn new(home: ZvmHome) -> Self {
        Self { home }
    }

    /// Path of one (possibly absent) installed version.
    pub fn dir(&self, token: &str) -> PathBuf {
        self.home.version_dir(token)
    }

    /// Whether a version directory exists for `token`.
    pub fn is_installed(&self, token: &str) -> bool {
        self.home.version_dir(token).exists()
    }

    /// Read the canonical version recorded for an installed token.
    pub fn canonical_of(&self, token: &str) -> Result<String> {
        std::fs::read_to_string(self.home.version_marker(token))
            .map_err(|_| Error::NotInstalled(token.to_string()))
    }

    /// Enumerate installed versions in directory order.
    ///
    /// Aliases (symlinks) and directories without a readable marker are not
    /// installed versions and are skipped. A missing versions root is an
    /// empty listing, not an error.
    pub fn list(&self) -> Result<Vec<InstalledVersion>> {
        let versions_dir = self.home.versions_dir();
        let read_dir = match std::fs::read_dir(&versions_dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut installed = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let path = entry.path();
            if path.symlink_metadata()?.file_type().is_symlink() {
                continue;
            }
            let Ok(canonical) = std::fs::read_to_string(path.join(VERSION_MARKER)) else {
                continue;
            };
            installed.push(InstalledVersion {
                token: entry.file_name().to_string_lossy().into_owned(),
                canonical,
            });
        }
        Ok(installed)
    }

    /// Delete a version's directory tree, recursively and unconditionally.
    pub fn remove(&self, token: &str) -> Result<()> {
        let dir = self.home.version_dir(token);
        if !dir.exists() {
            return Err(Error::NotInstalled(token.to_string()));
        }
        std::fs::remove_dir_all(&dir)?;
        debug!(token, "removed installed version");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install_fixture(home: &ZvmHome, token: &str, canonical: &str) {
        let dir = home.version_dir(token);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(VERSION_MARKER), canonical).unwrap();
    }

    #[test]
    fn empty_when_versions_root_is_missing() {
        let tmp = TempDir::new().unwrap();
        let store = VersionStore::new(ZvmHome::at(tmp.path()));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn lists_only_marked_directories() {
        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        install_fixture(&home, "0.11.0", "0.11.0");
        install_fixture(&home, "stable", "0.12.0");

        // a directory without a marker is not an installed version
        std::fs::create_dir_all(home.version_dir("half-extracted")).unwrap();

        let store = VersionStore::new(home);
        let mut tokens: Vec<_> = store.list().unwrap().into_iter().map(|v| v.token).collect();
        tokens.sort();
        assert_eq!(tokens, vec!["0.11.0", "stable"]);
    }

    #[cfg(unix)]
    #[test]
    fn aliases_are_not_installed_versions() {
        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        install_fixture(&home, "0.11.0", "0.11.0");
        std::os::unix::fs::symlink(home.version_dir("0.11.0"), home.current_alias()).unwrap();

        let store = VersionStore::new(home);
        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].token, "0.11.0");
    }

    #[test]
    fn canonical_survives_round_trip() {
        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        install_fixture(&home, "stable", "0.12.0");

        let store = VersionStore::new(home);
        assert_eq!(store.canonical_of("stable").unwrap(), "0.12.0");
        assert!(matches!(
            store.canonical_of("master"),
            Err(Error::NotInstalled(_))
        ));
    }

    #[test]
    fn remove_deletes_tree_or_fails_when_absent() {
        let tmp = TempDir::new().unwrap();
        let home = ZvmHome::at(tmp.path());
        install_fixture(&home, "0.11.0", "0.11.0");
        std::fs::create_dir_all(home.version_dir("0.11.0").join("lib/std")).unwrap();

        let store = VersionStore::new(home.clone());
        store.remove("0.11.0").unwrap();
        assert!(!home.version_dir("0.11.0").exists());

        assert!(matches!(
            store.remove("0.11.0"),
            Err(Error::NotInstalled(t)) if t == "0.11.0"
        ));
    }
}
