//! Filesystem layout of the zvm home directory.

use std::path::{Path, PathBuf};

use dirs::home_dir;

/// Name of the per-version metadata marker file.
pub const VERSION_MARKER: &str = ".zvm_version";

/// Name of the global active alias under the versions directory.
pub const CURRENT_ALIAS: &str = "current";

/// Name of the project-local state directory and the alias inside it.
pub const LOCAL_STATE_DIR: &str = ".zvm";
pub const LOCAL_ALIAS: &str = "zig_sdk";

/// Handle on the zvm root directory (`~/.zvm` by default).
///
/// All path derivation goes through this type so the on-disk layout is
/// decided in one place.
#[derive(Debug, Clone)]
pub struct ZvmHome {
    root: PathBuf,
}

impl ZvmHome {
    /// Resolve the home directory, honoring a `ZVM_HOME` override.
    ///
    /// Returns `None` if neither `ZVM_HOME` is set nor the user's home
    /// directory can be determined.
    pub fn from_env() -> Option<Self> {
        if let Ok(val) = std::env::var("ZVM_HOME") {
            return Some(Self {
                root: PathBuf::from(val),
            });
        }
        home_dir().map(|h| Self {
            root: h.join(".zvm"),
        })
    }

    /// Use an explicit root directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Installed versions: `<root>/versions`
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    /// One installed version: `<root>/versions/<token>`
    pub fn version_dir(&self, token: &str) -> PathBuf {
        self.versions_dir().join(token)
    }

    /// Metadata marker of one installed version.
    pub fn version_marker(&self, token: &str) -> PathBuf {
        self.version_dir(token).join(VERSION_MARKER)
    }

    /// Global active alias: `<root>/versions/current`
    pub fn current_alias(&self) -> PathBuf {
        self.versions_dir().join(CURRENT_ALIAS)
    }

    /// Cache root: `<root>/cache`
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Downloaded archives: `<root>/cache/web`
    pub fn web_cache_dir(&self) -> PathBuf {
        self.cache_dir().join("web")
    }

    /// Transient extraction staging: `<root>/cache/extracted`
    pub fn extract_cache_dir(&self) -> PathBuf {
        self.cache_dir().join("extracted")
    }
}

/// Extract the filename from a URL.
///
/// # Example
///
/// ```
/// use zvm_core::paths::filename_from_url;
///
/// assert_eq!(
///     filename_from_url("https://ziglang.org/download/0.11.0/zig-linux-x86_64-0.11.0.tar.xz"),
///     "zig-linux-x86_64-0.11.0.tar.xz"
/// );
/// assert_eq!(filename_from_url(""), "");
/// ```
pub fn filename_from_url(url: &str) -> &str {
    url.split('/').next_back().unwrap_or("")
}
