//! Version classification and ordering
//!
//! Versions arrive in canonical form: a leading `v`, a full
//! MAJOR.MINOR.PATCH triple, and optional prerelease/build suffixes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Release channel of a version
///
/// "Latest" selection prefers releases over everything else, so the stored
/// string form of this enum participates in the oracle's ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    /// Stable release: no prerelease suffix
    Release,
    /// Tagged prerelease
    Prerelease,
    /// Synthetic version derived from an untagged commit
    Pseudo,
}

impl VersionType {
    /// Stable string stored in the version_type column
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionType::Release => "release",
            VersionType::Prerelease => "prerelease",
            VersionType::Pseudo => "pseudo",
        }
    }
}

impl std::fmt::Display for VersionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version string is not canonical `vMAJOR.MINOR.PATCH` form
#[derive(Debug, Clone, PartialEq, Error)]
#[error("not a canonical semantic version: {0:?}")]
pub struct InvalidVersion(pub String);

fn parse(version: &str) -> Result<semver::Version, InvalidVersion> {
    let rest = version
        .strip_prefix('v')
        .ok_or_else(|| InvalidVersion(version.to_string()))?;
    semver::Version::parse(rest).map_err(|_| InvalidVersion(version.to_string()))
}

/// True when the version is canonical
pub fn is_valid(version: &str) -> bool {
    parse(version).is_ok()
}

/// Classify a canonical version string
pub fn classify(version: &str) -> Result<VersionType, InvalidVersion> {
    let parsed = parse(version)?;
    if parsed.pre.is_empty() {
        Ok(VersionType::Release)
    } else if is_pseudo_prerelease(parsed.pre.as_str()) {
        Ok(VersionType::Pseudo)
    } else {
        Ok(VersionType::Prerelease)
    }
}

/// Pseudo-version prereleases end in `yyyymmddhhmmss-abcdefabcdef`: a
/// 14-digit UTC timestamp and a 12-char lowercase commit hash
fn is_pseudo_prerelease(pre: &str) -> bool {
    let last = pre.rsplit('.').next().unwrap_or(pre);
    let (stamp, hash) = match last.rsplit_once('-') {
        Some(parts) => parts,
        None => return false,
    };
    stamp.len() == 14
        && stamp.bytes().all(|b| b.is_ascii_digit())
        && hash.len() == 12
        && hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Encode a version so lexicographic string order matches semver precedence
///
/// MAJOR/MINOR/PATCH and numeric prerelease identifiers are zero-padded to
/// fixed width. Releases gain a `~` suffix, which sorts above the `-` that
/// opens a prerelease suffix. Prerelease identifiers are joined with `!`,
/// which sorts below every identifier character, preserving semver's
/// shorter-identifier-list-first rule. Build metadata does not participate
/// in precedence and is dropped. Unparseable input is returned unchanged;
/// validation rejects it before anything reaches storage.
pub fn for_sorting(version: &str) -> String {
    let parsed = match parse(version) {
        Ok(parsed) => parsed,
        Err(_) => return version.to_string(),
    };
    let mut out = format!(
        "{:020}.{:020}.{:020}",
        parsed.major, parsed.minor, parsed.patch
    );
    if parsed.pre.is_empty() {
        out.push('~');
        return out;
    }
    out.push('-');
    for (i, ident) in parsed.pre.as_str().split('.').enumerate() {
        if i > 0 {
            out.push('!');
        }
        if ident.bytes().all(|b| b.is_ascii_digit()) {
            match ident.parse::<u64>() {
                Ok(n) => {
                    let padded = format!("{:020}", n);
                    out.push_str(&padded);
                }
                // Numeric identifier wider than u64; keep it verbatim
                Err(_) => out.push_str(ident),
            }
        } else {
            out.push_str(ident);
        }
    }
    out
}
