//! Version resolution: user token → concrete manifest target.

use tracing::debug;

use crate::error::Error;
use crate::manifest::{ManifestIndex, Target, MASTER};
use crate::Result;

/// Name of the rolling "latest release" alias. Unlike [`MASTER`] this is not
/// an index key; it is substituted by date ordering.
pub const STABLE: &str = "stable";

/// Whether a token names a rolling channel (re-resolvable over time).
pub fn is_channel(token: &str) -> bool {
    token == STABLE || token == MASTER
}

/// The output of resolution, handed to the installer. Short-lived.
#[derive(Debug, Clone)]
pub struct ResolvedVersion {
    /// The token the user asked for ("stable", "master", "0.11.0", ...).
    pub requested: String,
    /// The concrete version string the token resolves to right now.
    pub canonical: String,
    /// The download target for the caller's machine.
    pub target: Target,
}

/// Resolve a user-supplied version token against a manifest index.
///
/// - an explicit token must match an index key exactly (case-sensitive);
/// - `"master"` resolves to the index's master entry, whose own `version`
///   field is the canonical build identifier;
/// - `"stable"` resolves to the entry with the maximum release date.
pub fn resolve(token: &str, index: &ManifestIndex, machine: &str) -> Result<ResolvedVersion> {
    let (name, entry) = if token == STABLE {
        index
            .latest()
            .ok_or_else(|| Error::UnknownVersion(token.to_string()))?
    } else {
        let entry = index
            .get(token)
            .ok_or_else(|| Error::UnknownVersion(token.to_string()))?;
        (token, entry)
    };

    let canonical = entry.version().unwrap_or(name).to_string();

    let target = entry
        .target(machine)
        .ok_or_else(|| Error::UnsupportedPlatform {
            version: canonical.clone(),
            machine: machine.to_string(),
        })?
        .clone();

    debug!(token, canonical = %canonical, machine, "resolved version");
    Ok(ResolvedVersion {
        requested: token.to_string(),
        canonical,
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestIndex;

    fn index() -> ManifestIndex {
        ManifestIndex::parse(
            r#"{
            "master": {
                "version": "0.12.0-dev.1092+68ed78775",
                "date": "2023-10-03",
                "x86_64-linux": {"tarball": "https://b/master.tar.xz", "shasum": "aa", "size": "10"}
            },
            "0.11.0": {
                "date": "2023-08-01",
                "x86_64-linux": {"tarball": "https://b/0.11.0.tar.xz", "shasum": "bb", "size": "11"},
                "aarch64-macos": {"tarball": "https://b/0.11.0-mac.tar.xz", "shasum": "cc", "size": "12"}
            },
            "0.12.0": {
                "date": "2023-08-01",
                "x86_64-linux": {"tarball": "https://b/0.12.0.tar.xz", "shasum": "dd", "size": "13"}
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn explicit_token_is_its_own_canonical() {
        let resolved = resolve("0.11.0", &index(), "x86_64-linux").unwrap();
        assert_eq!(resolved.requested, "0.11.0");
        assert_eq!(resolved.canonical, "0.11.0");
        assert_eq!(resolved.target.tarball, "https://b/0.11.0.tar.xz");
    }

    #[test]
    fn master_canonical_comes_from_entry_version_field() {
        let resolved = resolve("master", &index(), "x86_64-linux").unwrap();
        assert_eq!(resolved.requested, "master");
        assert_eq!(resolved.canonical, "0.12.0-dev.1092+68ed78775");
    }

    #[test]
    fn stable_selects_maximum_date() {
        // master postdates both releases, so stable currently resolves to it;
        // the domain scenario below exercises the release-only shape.
        let idx = ManifestIndex::parse(
            r#"{
            "0.11.0": {
                "date": "2023-05-01",
                "x86_64-linux": {"tarball": "https://b/0.11.0.tar.xz", "shasum": "aa", "size": "1"}
            },
            "0.12.0": {
                "date": "2023-08-01",
                "x86_64-linux": {"tarball": "https://b/0.12.0.tar.xz", "shasum": "bb", "size": "2"}
            }
        }"#,
        )
        .unwrap();

        let resolved = resolve("stable", &idx, "x86_64-linux").unwrap();
        assert_eq!(resolved.requested, "stable");
        assert_eq!(resolved.canonical, "0.12.0");
    }

    #[test]
    fn unknown_token_fails() {
        assert!(matches!(
            resolve("0.9.9", &index(), "x86_64-linux"),
            Err(Error::UnknownVersion(v)) if v == "0.9.9"
        ));
    }

    #[test]
    fn token_match_is_case_sensitive() {
        assert!(matches!(
            resolve("MASTER", &index(), "x86_64-linux"),
            Err(Error::UnknownVersion(_))
        ));
    }

    #[test]
    fn missing_machine_target_fails() {
        assert!(matches!(
            resolve("0.12.0", &index(), "aarch64-macos"),
            Err(Error::UnsupportedPlatform { machine, .. }) if machine == "aarch64-macos"
        ));
    }

    #[test]
    fn every_token_resolves_for_its_machines() {
        let idx = index();
        for (name, entry) in idx.iter() {
            for machine in entry.targets().keys() {
                let resolved = resolve(name, &idx, machine).unwrap();
                assert_eq!(&resolved.target.tarball, &entry.target(machine).unwrap().tarball);
            }
        }
    }

    #[test]
    fn channel_tokens() {
        assert!(is_channel("stable"));
        assert!(is_channel("master"));
        assert!(!is_channel("0.11.0"));
    }
}
