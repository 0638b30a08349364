//! Reporter trait for dependency injection
//!
//! This trait lets core logic report progress and status without being
//! coupled to a specific console implementation. Progress is observational
//! only; it never synchronizes anything.

pub trait Reporter: Send + Sync {
    /// Updates the progress of an archive download, in bytes transferred.
    fn downloading(&self, archive: &str, current: u64, total: Option<u64>);

    /// A download finished; `bytes` is the total transferred.
    fn downloaded(&self, archive: &str, bytes: u64);

    /// A cached archive passed checksum verification and will be reused.
    fn cache_hit(&self, archive: &str);

    /// A cached archive failed verification and will be re-downloaded.
    fn cache_stale(&self, archive: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn downloading(&self, archive: &str, current: u64, total: Option<u64>) {
        (**self).downloading(archive, current, total)
    }
    fn downloaded(&self, archive: &str, bytes: u64) {
        (**self).downloaded(archive, bytes)
    }
    fn cache_hit(&self, archive: &str) {
        (**self).cache_hit(archive)
    }
    fn cache_stale(&self, archive: &str) {
        (**self).cache_stale(archive)
    }
    fn info(&self, msg: &str) {
        (**self).info(msg)
    }
    fn success(&self, msg: &str) {
        (**self).success(msg)
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg)
    }
    fn error(&self, msg: &str) {
        (**self).error(msg)
    }
}

/// A no-op reporter for silent operations (e.g., verification, testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn downloading(&self, _: &str, _: u64, _: Option<u64>) {}
    fn downloaded(&self, _: &str, _: u64) {}
    fn cache_hit(&self, _: &str) {}
    fn cache_stale(&self, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}
