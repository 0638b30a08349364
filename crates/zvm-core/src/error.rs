//! Domain errors for the version-management pipeline.
//!
//! None of these are retried; each one terminates the current command and is
//! rendered as a single human-readable line by the CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to fetch version manifest (HTTP {status})")]
    ManifestUnavailable { status: u16 },

    #[error("version manifest is malformed: {0}")]
    ManifestMalformed(String),

    #[error("version {0} does not exist")]
    UnknownVersion(String),

    #[error("no {version} build available for {machine}")]
    UnsupportedPlatform { version: String, machine: String },

    #[error("failed to download {url} (HTTP {status})")]
    DownloadFailed { status: u16, url: String },

    #[error("invalid archive: expected exactly 1 top-level entry, got {count}")]
    ArchiveShapeInvalid { count: usize },

    #[error("version {0} is already installed")]
    AlreadyInstalled(String),

    #[error("version {0} is not installed")]
    NotInstalled(String),

    #[error("only stable and master can be updated, not {0}")]
    NotUpdatable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
