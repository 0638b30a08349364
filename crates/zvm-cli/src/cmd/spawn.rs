//! Spawn command: hand the process over to an installed toolchain.
//!
//! The child inherits argv, environment and the standard streams. On unix
//! the current process image is replaced outright; elsewhere we wait and
//! exit with the child's status, so output ordering is identical.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use crossterm::style::Stylize;

use zvm_core::store::VersionStore;

use crate::zvm_home;

fn toolchain_binary_name() -> &'static str {
    if cfg!(windows) { "zig.exe" } else { "zig" }
}

pub fn spawn(version: &str, args: &[String]) -> Result<()> {
    let home = zvm_home()?;
    let store = VersionStore::new(home);
    if !store.is_installed(version) {
        return Err(zvm_core::Error::NotInstalled(version.to_string()).into());
    }

    let binary = store.dir(version).join(toolchain_binary_name());
    println!("  {}", format!("Spawning version {version}").green());
    run_toolchain(&binary, args)
}

#[cfg(unix)]
fn run_toolchain(binary: &Path, args: &[String]) -> Result<()> {
    use std::os::unix::process::CommandExt;
    // exec only returns on failure
    Err(Command::new(binary).args(args).exec().into())
}

#[cfg(not(unix))]
fn run_toolchain(binary: &Path, args: &[String]) -> Result<()> {
    let status = Command::new(binary).args(args).status()?;
    std::process::exit(status.code().unwrap_or(1));
}
