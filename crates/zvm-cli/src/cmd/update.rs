//! Update command (rolling channels only)

use anyhow::Result;

use zvm_core::manifest::ManifestClient;
use zvm_core::update::{UpdateCoordinator, UpdateOutcome};

use crate::ui::{ConsoleReporter, Output};
use crate::zvm_home;

/// Re-resolve a channel and reinstall it if it has moved.
pub async fn update(index_url: &str, version: &str) -> Result<()> {
    let home = zvm_home()?;
    let machine = super::machine_target()?;
    let output = Output::new();
    let reporter = ConsoleReporter::new(false);

    let client = ManifestClient::new(index_url);
    let coordinator = UpdateCoordinator::new(home, client, machine);

    match coordinator.update(version, &reporter).await? {
        UpdateOutcome::AlreadyUpToDate { .. } => {
            output.warning("Already up to date");
        }
        UpdateOutcome::Updated { from, to } => {
            output.success(&format!("Updated {version}: {from} -> {to}"));
        }
    }
    Ok(())
}
