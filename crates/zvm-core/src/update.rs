//! Rolling-channel updates: re-resolve, then remove and reinstall.
//!
//! Only "stable" and "master" can move; an explicit version never changes.
//! The remove happens before the reinstall, so a failure in between leaves
//! the channel uninstalled. That window is an accepted limitation, not a
//! transaction to be papered over; the user re-runs `install` explicitly.

use tracing::info;

use crate::cache::ArchiveCache;
use crate::error::Error;
use crate::install::Installer;
use crate::manifest::ManifestClient;
use crate::paths::ZvmHome;
use crate::reporter::Reporter;
use crate::resolver::{self, is_channel};
use crate::store::VersionStore;
use crate::Result;

/// What an update run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The channel already points at the manifest's current build.
    AlreadyUpToDate { canonical: String },
    /// The channel moved and was reinstalled.
    Updated { from: String, to: String },
}

/// Composes resolver, store and installer for channel updates.
#[derive(Debug)]
pub struct UpdateCoordinator {
    home: ZvmHome,
    client: ManifestClient,
    machine: String,
}

impl UpdateCoordinator {
    pub fn new(home: ZvmHome, client: ManifestClient, machine: impl Into<String>) -> Self {
        Self {
            home,
            client,
            machine: machine.into(),
        }
    }

    /// Update a rolling channel if its remote resolution has advanced.
    ///
    /// A no-op result (`AlreadyUpToDate`) performs no filesystem mutation.
    pub async fn update<R: Reporter>(&self, channel: &str, reporter: &R) -> Result<UpdateOutcome> {
        if !is_channel(channel) {
            return Err(Error::NotUpdatable(channel.to_string()));
        }

        let store = VersionStore::new(self.home.clone());
        let current = store.canonical_of(channel)?;

        let index = self.client.fetch().await?;
        let resolved = resolver::resolve(channel, &index, &self.machine)?;

        if resolved.canonical == current {
            return Ok(UpdateOutcome::AlreadyUpToDate { canonical: current });
        }

        info!(channel, from = %current, to = %resolved.canonical, "channel moved, reinstalling");
        store.remove(channel)?;

        let cache = ArchiveCache::with_client(&self.home, self.client.http().clone());
        Installer::new(self.home.clone(), cache)
            .install(&resolved, channel, reporter)
            .await?;

        Ok(UpdateOutcome::Updated {
            from: current,
            to: resolved.canonical.clone(),
        })
    }
}
