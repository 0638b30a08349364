//! Remote version manifest: fetch and parse.
//!
//! The index is a single JSON document mapping a channel or version name to
//! an entry object. Entries share one schema with slightly different
//! required fields: the rolling "master" entry carries its own `version`
//! field (the concrete build identifier), released versions are named by
//! their own key. Per-machine download targets live inside the same object,
//! keyed by `"{arch}-{platform}"`, next to non-target fields (`docs`,
//! `notes`, ...) which are ignored.
//!
//! The manifest is never persisted locally; an index lives only for the
//! duration of one command.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::Result;

/// Default manifest endpoint.
pub const DEFAULT_INDEX_URL: &str = "https://ziglang.org/download/index.json";

/// Key of the rolling development channel inside the index.
pub const MASTER: &str = "master";

/// One downloadable archive for a specific machine.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    /// Archive URL.
    pub tarball: String,
    /// Hex-encoded SHA-256 of the archive.
    pub shasum: String,
    /// Archive size in bytes (a decimal string on the wire).
    #[serde(deserialize_with = "size_from_wire")]
    pub size: u64,
}

fn size_from_wire<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Number(u64),
    }

    match Wire::deserialize(deserializer)? {
        Wire::Number(n) => Ok(n),
        Wire::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// One manifest entry: either the rolling channel or a released version.
#[derive(Debug, Clone)]
pub enum ManifestEntry {
    /// The "master" channel, tagged with its own concrete build identifier.
    Channel {
        version: String,
        date: NaiveDate,
        targets: BTreeMap<String, Target>,
    },
    /// A released version, named by its index key.
    Release {
        date: NaiveDate,
        targets: BTreeMap<String, Target>,
    },
}

impl ManifestEntry {
    /// Release date, used for channel ordering.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Channel { date, .. } | Self::Release { date, .. } => *date,
        }
    }

    /// Per-machine download targets.
    pub fn targets(&self) -> &BTreeMap<String, Target> {
        match self {
            Self::Channel { targets, .. } | Self::Release { targets, .. } => targets,
        }
    }

    /// Target for a machine identifier, if this entry supports it.
    pub fn target(&self, machine: &str) -> Option<&Target> {
        self.targets().get(machine)
    }

    /// The entry's own version field (channel entries only).
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Channel { version, .. } => Some(version),
            Self::Release { .. } => None,
        }
    }
}

/// Parsed manifest: name → entry.
#[derive(Debug, Clone, Default)]
pub struct ManifestIndex {
    entries: BTreeMap<String, ManifestEntry>,
}

impl ManifestIndex {
    /// Parse an index document.
    pub fn parse(json: &str) -> Result<Self> {
        let doc: BTreeMap<String, Value> = serde_json::from_str(json)
            .map_err(|e| Error::ManifestMalformed(e.to_string()))?;

        let mut entries = BTreeMap::new();
        for (name, value) in doc {
            entries.insert(name.clone(), parse_entry(&name, &value)?);
        }
        Ok(Self { entries })
    }

    /// Look up an entry by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.get(name)
    }

    /// All entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All entries ordered by release date, oldest first.
    pub fn by_date(&self) -> Vec<(&str, &ManifestEntry)> {
        let mut all: Vec<_> = self.iter().collect();
        all.sort_by_key(|(_, e)| e.date());
        all
    }

    /// The entry with the maximum release date. Ties are broken
    /// arbitrarily; release dates are expected unique in practice.
    pub fn latest(&self) -> Option<(&str, &ManifestEntry)> {
        self.iter().max_by_key(|(_, e)| e.date())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(name: &str, value: &Value) -> Result<ManifestEntry> {
    let obj = value
        .as_object()
        .ok_or_else(|| Error::ManifestMalformed(format!("entry {name} is not an object")))?;

    let date = obj
        .get("date")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::ManifestMalformed(format!("entry {name} has no date")))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| Error::ManifestMalformed(format!("entry {name} has invalid date: {e}")))?;

    let mut targets = BTreeMap::new();
    for (key, field) in obj {
        // Targets are the object-valued fields carrying a tarball URL;
        // everything else (docs, notes, src metadata without one) is skipped.
        if let Some(target_obj) = field.as_object() {
            if target_obj.contains_key("tarball") {
                let target: Target = serde_json::from_value(field.clone()).map_err(|e| {
                    Error::ManifestMalformed(format!("target {name}/{key}: {e}"))
                })?;
                targets.insert(key.clone(), target);
            }
        }
    }

    if let Some(version) = obj.get("version") {
        let version = version
            .as_str()
            .ok_or_else(|| Error::ManifestMalformed(format!("entry {name} version is not a string")))?;
        semver::Version::parse(version).map_err(|e| {
            Error::ManifestMalformed(format!("entry {name} has invalid version {version}: {e}"))
        })?;
        return Ok(ManifestEntry::Channel {
            version: version.to_string(),
            date,
            targets,
        });
    }

    if name == MASTER {
        return Err(Error::ManifestMalformed(
            "master entry has no version field".to_string(),
        ));
    }
    semver::Version::parse(name).map_err(|e| {
        Error::ManifestMalformed(format!("entry name {name} is not a valid version: {e}"))
    })?;

    Ok(ManifestEntry::Release { date, targets })
}

/// Fetches the remote version manifest.
///
/// Performs exactly one network request per [`fetch`](Self::fetch); there is
/// no local persistence of the manifest.
#[derive(Debug, Clone)]
pub struct ManifestClient {
    http: reqwest::Client,
    index_url: String,
}

impl ManifestClient {
    pub fn new(index_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            index_url: index_url.into(),
        }
    }

    /// Share an existing HTTP client (connection pool) with other components.
    pub fn with_client(http: reqwest::Client, index_url: impl Into<String>) -> Self {
        Self {
            http,
            index_url: index_url.into(),
        }
    }

    /// The underlying HTTP client, for components downloading archives.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetch and parse the index.
    pub async fn fetch(&self) -> Result<ManifestIndex> {
        debug!(url = %self.index_url, "fetching version manifest");
        let resp = self
            .http
            .get(&self.index_url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::ManifestUnavailable {
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await?;
        ManifestIndex::parse(&body)
    }
}
