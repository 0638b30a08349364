//! Install command

use anyhow::Result;
use crossterm::style::Stylize;

use zvm_core::cache::ArchiveCache;
use zvm_core::install::Installer;
use zvm_core::manifest::ManifestClient;
use zvm_core::resolver;
use zvm_core::store::VersionStore;

use crate::ui::ConsoleReporter;
use crate::zvm_home;

/// Resolve and install one version under its requested token.
pub async fn install(index_url: &str, version: &str, verbose: bool) -> Result<()> {
    let home = zvm_home()?;
    let reporter = ConsoleReporter::new(verbose);

    // Fail before touching the network when the token is already present.
    if VersionStore::new(home.clone()).is_installed(version) {
        return Err(zvm_core::Error::AlreadyInstalled(version.to_string()).into());
    }

    let machine = super::machine_target()?;
    let client = ManifestClient::new(index_url);
    let index = client.fetch().await?;
    let resolved = resolver::resolve(version, &index, &machine)?;

    if resolved.canonical == resolved.requested {
        println!(
            "  Installing version {} {}",
            version.bold().blue(),
            resolved.target.tarball.as_str().dim()
        );
    } else {
        println!(
            "  Installing version {} ({}) {}",
            version.bold().blue(),
            resolved.canonical.as_str().bold().blue(),
            resolved.target.tarball.as_str().dim()
        );
    }

    let cache = ArchiveCache::with_client(&home, client.http().clone());
    Installer::new(home, cache)
        .install(&resolved, version, &reporter)
        .await?;

    crate::ui::Output::new().success(&format!(
        "Successfully installed version {}",
        resolved.canonical
    ));
    Ok(())
}
