//! Module path rules
//!
//! Path syntax checking, series-path derivation, and the standard library
//! sentinel path that is exempt from syntax checks.

use thiserror::Error;

/// Sentinel module path for the standard library
///
/// Standard library ingestions skip module-path and version syntax checks;
/// their versions are assigned by the toolchain, not by a repository tag.
pub const STDLIB_MODULE_PATH: &str = "std";

/// Module path fails syntax rules
#[derive(Debug, Clone, PartialEq, Error)]
#[error("malformed module path {path:?}: {reason}")]
pub struct MalformedPath {
    pub path: String,
    pub reason: &'static str,
}

/// Check module-path syntax
///
/// The first element must contain a dot (a registrable domain). Elements may
/// not be empty, relative (`.`/`..`), start or end with a dot, or contain
/// characters outside `[A-Za-z0-9._~-]`. Leading and trailing slashes are
/// rejected.
pub fn check_module_path(module_path: &str) -> Result<(), MalformedPath> {
    let fail = |reason: &'static str| {
        Err(MalformedPath {
            path: module_path.to_string(),
            reason,
        })
    };

    if module_path.is_empty() {
        return fail("empty path");
    }
    if module_path.starts_with('/') || module_path.ends_with('/') {
        return fail("leading or trailing slash");
    }

    let mut elements = module_path.split('/');
    let first = elements.next().unwrap_or_default();
    if !first.contains('.') {
        return fail("missing dot in first path element");
    }

    for element in module_path.split('/') {
        if element.is_empty() {
            return fail("empty path element");
        }
        if element == "." || element == ".." {
            return fail("relative path element");
        }
        if element.starts_with('.') || element.ends_with('.') {
            return fail("path element starts or ends with a dot");
        }
        for b in element.bytes() {
            if !(b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')) {
                return fail("invalid character in path element");
            }
        }
    }
    Ok(())
}

/// Derive the series path: the module path with any `/vN` (N >= 2)
/// major-version suffix removed
///
/// All major versions of one module share a series path, which is what
/// cross-version features group by.
pub fn series_path(module_path: &str) -> &str {
    if let Some((prefix, last)) = module_path.rsplit_once('/') {
        if is_major_version_suffix(last) {
            return prefix;
        }
    }
    module_path
}

fn is_major_version_suffix(element: &str) -> bool {
    let digits = match element.strip_prefix('v') {
        Some(digits) => digits,
        None => return false,
    };
    // N >= 2, written without leading zeros
    !digits.is_empty()
        && !digits.starts_with('0')
        && digits != "1"
        && digits.bytes().all(|b| b.is_ascii_digit())
}
