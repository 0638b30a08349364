//! Use command: switch the active version (project-local by default).

use anyhow::Result;
use crossterm::style::Stylize;

use zvm_core::activate::{ActivationManager, Scope};

use crate::zvm_home;

pub fn use_version(version: &str, global: bool) -> Result<()> {
    let home = zvm_home()?;
    let scope = if global { Scope::Global } else { Scope::Local };
    ActivationManager::new(home).activate(version, scope)?;
    println!("  Now using version {}", version.bold().green());
    Ok(())
}
