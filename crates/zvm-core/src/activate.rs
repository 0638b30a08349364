//! Active-version switching via filesystem aliasing.
//!
//! Exactly one alias may exist per scope: the global alias lives at
//! `versions/current`, the project-local one at `<project>/.zvm/zig_sdk`.
//! Switching removes the prior alias and creates the new one; the
//! remove-then-create pair is not atomic (a known, documented gap), but
//! every read and write goes through this type so the one-alias-per-scope
//! invariant is enforced at a single seam.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;
use crate::paths::{ZvmHome, LOCAL_ALIAS, LOCAL_STATE_DIR};
use crate::store::VersionStore;
use crate::Result;

/// Where an activation applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The machine-wide alias under the versions root.
    Global,
    /// The alias under the current project's `.zvm` directory.
    Local,
}

/// Owns the "current version" aliases.
#[derive(Debug, Clone)]
pub struct ActivationManager {
    home: ZvmHome,
}

impl ActivationManager {
    pub fn new(home: ZvmHome) -> Self {
        Self { home }
    }

    /// Point a scope's alias at an installed version.
    ///
    /// Local scope resolves against the current working directory.
    pub fn activate(&self, token: &str, scope: Scope) -> Result<()> {
        match scope {
            Scope::Global => self.activate_global(token),
            Scope::Local => {
                let cwd = std::env::current_dir()?;
                self.activate_local(token, &cwd)
            }
        }
    }

    fn activate_global(&self, token: &str) -> Result<()> {
        let target = self.installed_dir(token)?;
        replace_alias(&self.home.current_alias(), &target)?;
        debug!(token, "global alias switched");
        Ok(())
    }

    /// Local activation against an explicit project directory.
    pub fn activate_local(&self, token: &str, project_dir: &Path) -> Result<()> {
        let target = self.installed_dir(token)?;
        let state_dir = project_dir.join(LOCAL_STATE_DIR);
        std::fs::create_dir_all(&state_dir)?;
        replace_alias(&state_dir.join(LOCAL_ALIAS), &target)?;
        debug!(token, project = %project_dir.display(), "local alias switched");
        Ok(())
    }

    /// The token the global alias currently points at, if any.
    ///
    /// Absence of the alias is not an error.
    pub fn current_global(&self) -> Option<String> {
        let dest = std::fs::read_link(self.home.current_alias()).ok()?;
        dest.file_name().map(|n| n.to_string_lossy().into_owned())
    }

    fn installed_dir(&self, token: &str) -> Result<PathBuf> {
        let store = VersionStore::new(self.home.clone());
        if !store.is_installed(token) {
            return Err(Error::NotInstalled(token.to_string()));
        }
        Ok(store.dir(token))
    }
}

/// Remove any prior alias at `alias`, then create one pointing at `target`.
fn replace_alias(alias: &Path, target: &Path) -> Result<()> {
    if alias.symlink_metadata().is_ok() {
        remove_symlink(alias)?;
    }
    make_symlink(target, alias)?;
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, alias: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, alias)
}

#[cfg(unix)]
fn remove_symlink(alias: &Path) -> std::io::Result<()> {
    std::fs::remove_file(alias)
}

#[cfg(windows)]
fn make_symlink(target: &Path, alias: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, alias)
}

#[cfg(windows)]
fn remove_symlink(alias: &Path) -> std::io::Result<()> {
    // Directory symlinks on windows are removed as directories.
    std::fs::remove_dir(alias)
}
