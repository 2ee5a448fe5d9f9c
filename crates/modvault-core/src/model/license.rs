use serde::{Deserialize, Serialize};

/// License metadata attached to a package or directory
///
/// Carries the file path of the license and the license types detected in
/// it. An empty `types` list means detection found the file but could not
/// classify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// Path of the license file, relative to the module root
    pub file_path: String,

    /// Detected license types (e.g. "MIT", "Apache-2.0"); may be empty
    #[serde(default)]
    pub types: Vec<String>,
}

/// A full license record owned by a module version
///
/// Unlike [`LicenseInfo`], this carries the license file contents and the
/// detector's coverage report. Licenses are attribution records, not
/// filters: a license with no detected type is still stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// Path of the license file, relative to the module root
    pub file_path: String,

    /// Raw contents of the license file
    #[serde(default)]
    pub contents: String,

    /// Detected license types; may be empty
    #[serde(default)]
    pub types: Vec<String>,

    /// Opaque detector coverage report, stored as JSON
    #[serde(default)]
    pub coverage: serde_json::Value,
}

/// Flatten license metadata into parallel (types, file_paths) arrays
///
/// A license file with zero detected types still contributes one pairing
/// with an empty type: an unclassified license file applies to the package
/// and is treated as non-permissive rather than dropped.
pub fn license_pairs(licenses: &[LicenseInfo]) -> (Vec<String>, Vec<String>) {
    let mut types = Vec::new();
    let mut paths = Vec::new();
    for license in licenses {
        if license.types.is_empty() {
            types.push(String::new());
            paths.push(license.file_path.clone());
        } else {
            for typ in &license.types {
                types.push(typ.clone());
                paths.push(license.file_path.clone());
            }
        }
    }
    (types, paths)
}
