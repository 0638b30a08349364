//! zvm - a Zig toolchain version manager
//!
//! Thin CLI over [`zvm_core`]: one module per subcommand under [`cmd`],
//! console rendering under [`ui`]. All version-resolution and filesystem
//! logic lives in the core crate.

pub mod cmd;
pub mod ui;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use zvm_core::ZvmHome;

/// Resolve the zvm home directory or fail with an actionable message.
pub fn zvm_home() -> anyhow::Result<ZvmHome> {
    ZvmHome::from_env()
        .ok_or_else(|| anyhow!("could not determine home directory; set ZVM_HOME to override"))
}

#[derive(Debug, Parser)]
#[command(name = "zvm")]
#[command(author, version, about = "zvm - a Zig toolchain version manager")]
pub struct Cli {
    /// Version manifest endpoint
    #[arg(
        long,
        global = true,
        env = "ZVM_INDEX_URL",
        default_value = zvm_core::manifest::DEFAULT_INDEX_URL
    )]
    pub index_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install a version ("stable", "master", or an explicit version)
    Install {
        /// The version to install
        version: String,
        /// Narrate cache decisions
        #[arg(short, long)]
        verbose: bool,
    },
    /// Update an installed rolling channel (stable or master)
    Update {
        /// The channel to update
        version: String,
    },
    /// Uninstall an installed version
    Uninstall {
        /// The version to uninstall
        version: String,
    },
    /// List installed versions
    List {
        /// List versions available online instead
        #[arg(long)]
        online: bool,
    },
    /// Select the active version for this project
    Use {
        /// The version to use
        version: String,
        /// Switch the machine-wide version instead of the project-local one
        #[arg(short = 'g', long = "global")]
        global: bool,
    },
    /// Run an installed toolchain, forwarding arguments
    Spawn {
        /// The version to run
        version: String,
        /// Arguments passed through to the toolchain binary
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Empty the whole cache directory (archives and staging leftovers)
    Clear,
}
