//! Uninstall command

use anyhow::Result;

use zvm_core::store::VersionStore;

use crate::ui::Output;
use crate::zvm_home;

/// Delete an installed version's directory tree.
pub fn uninstall(version: &str) -> Result<()> {
    let home = zvm_home()?;
    VersionStore::new(home).remove(version)?;
    Output::new().success(&format!("Successfully uninstalled version {version}"));
    Ok(())
}
