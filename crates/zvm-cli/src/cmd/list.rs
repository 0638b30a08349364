//! List command: installed versions, or the online manifest with `--online`.

use anyhow::Result;
use crossterm::style::Stylize;

use zvm_core::activate::ActivationManager;
use zvm_core::manifest::ManifestClient;
use zvm_core::store::VersionStore;

use crate::ui::Output;
use crate::zvm_home;

pub async fn list(index_url: &str, online: bool) -> Result<()> {
    if online {
        list_online(index_url).await
    } else {
        list_installed()
    }
}

fn list_installed() -> Result<()> {
    let home = zvm_home()?;
    let installed = VersionStore::new(home.clone()).list()?;

    if installed.is_empty() {
        Output::new().warning("No versions installed");
        return Ok(());
    }

    let current = ActivationManager::new(home).current_global();

    println!("{}", "Installed versions:".bold());
    for version in installed {
        let mut row = format!("  - {}", version.token);
        if version.token != version.canonical {
            row.push_str(&format!(" ({})", version.canonical));
        }
        if current.as_deref() == Some(version.token.as_str()) {
            println!("{}", format!("{row} (current)").green());
        } else {
            println!("{row}");
        }
    }
    Ok(())
}

async fn list_online(index_url: &str) -> Result<()> {
    let index = ManifestClient::new(index_url).fetch().await?;

    println!("{}", "Online versions:".bold());
    for (name, entry) in index.by_date() {
        match entry.version() {
            Some(build) => println!("  - {name} - {build} - {}", entry.date()),
            None => println!("  - {name} ({})", entry.date()),
        }
    }
    Ok(())
}
