//! One module per subcommand, all thin over zvm-core.

pub mod cache;
pub mod install;
pub mod list;
pub mod spawn;
pub mod uninstall;
pub mod update;
pub mod r#use;

use anyhow::anyhow;

/// The host's manifest machine identifier, or a terminal error.
pub(crate) fn machine_target() -> anyhow::Result<String> {
    zvm_core::platform::machine_target()
        .ok_or_else(|| anyhow!("unsupported platform {}", std::env::consts::OS))
}
