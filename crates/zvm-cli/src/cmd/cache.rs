//! Cache maintenance

use anyhow::Result;

use zvm_core::cache::ArchiveCache;

use crate::ui::Output;
use crate::zvm_home;

/// Empty the whole cache directory tree.
pub fn clear() -> Result<()> {
    let home = zvm_home()?;
    let output = Output::new();
    if ArchiveCache::new(&home).clear()? {
        output.success("Successfully cleared cache");
    } else {
        output.warning("Cache already empty");
    }
    Ok(())
}
