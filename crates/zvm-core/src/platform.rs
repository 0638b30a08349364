//! Machine identifier detection for manifest target lookup.
//!
//! The manifest keys its per-target download tables by
//! `"{architecture}-{platform}"`, using its own vocabulary. Host names
//! reported by the OS are normalized before lookup (`arm64` is `aarch64`,
//! `AMD64` is `x86_64`).

/// Normalize an architecture name to the manifest's vocabulary.
pub fn normalize_arch(arch: &str) -> &str {
    match arch {
        "arm64" => "aarch64",
        "AMD64" => "x86_64",
        other => other,
    }
}

/// Normalize an OS name to the manifest's vocabulary.
///
/// Returns `None` for platforms the manifest never carries targets for.
pub fn normalize_os(os: &str) -> Option<&str> {
    match os {
        "linux" => Some("linux"),
        "macos" | "darwin" => Some("macos"),
        "windows" => Some("windows"),
        "freebsd" => Some("freebsd"),
        _ => None,
    }
}

/// The machine identifier of the host, e.g. `x86_64-linux`.
///
/// Returns `None` on platforms with no manifest vocabulary.
pub fn machine_target() -> Option<String> {
    let arch = normalize_arch(std::env::consts::ARCH);
    let os = normalize_os(std::env::consts::OS)?;
    Some(format!("{arch}-{os}"))
}
