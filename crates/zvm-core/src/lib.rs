//! zvm-core - version resolution and installation pipeline for the Zig toolchain.
//!
//! # Overview
//!
//! The core is a pipeline: [`manifest::ManifestClient`] fetches the release
//! index, [`resolver::resolve`] maps a user token ("stable", "master", or an
//! explicit version) to a concrete download target, [`cache::ArchiveCache`]
//! obtains the archive with checksum-verified reuse, and
//! [`install::Installer`] stages, validates and promotes the unpacked tree
//! into the versions directory. [`activate::ActivationManager`] owns the
//! "current version" alias; [`update::UpdateCoordinator`] re-resolves a
//! rolling channel and reinstalls it when it has moved.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.zvm/
//! ├── versions/<token>/       # Unpacked toolchains, one dir per installed token
//! │   └── .zvm_version        # Marker: the canonical version string
//! ├── versions/current        # Global active alias (symlink)
//! ├── cache/web/              # Downloaded archives, keyed by filename
//! └── cache/extracted/        # Transient extraction staging dirs
//! ```

pub mod activate;
pub mod cache;
pub mod error;
pub mod extract;
pub mod install;
pub mod manifest;
pub mod paths;
pub mod platform;
pub mod reporter;
pub mod resolver;
pub mod store;
pub mod update;

pub use error::Error;
pub use paths::ZvmHome;
pub use reporter::{NullReporter, Reporter};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// User Agent string for manifest and archive requests
pub const USER_AGENT: &str = concat!("zvm/", env!("CARGO_PKG_VERSION"));
