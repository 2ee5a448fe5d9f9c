use serde::{Deserialize, Serialize};

use super::license::LicenseInfo;

/// Directory - a filesystem path within a module version's tree
///
/// A directory optionally wraps at most one package (rooted at the same
/// path) plus its readme. Directories are only persisted when the caller
/// enables directory tables on the upsert call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    /// Path of the directory, unique within a module version
    pub path: String,

    /// Path the directory would have under major version 1
    #[serde(default)]
    pub v1_path: String,

    /// Whether derived content below this path may be stored and served
    #[serde(default)]
    pub is_redistributable: bool,

    /// Licenses that apply to this directory
    #[serde(default)]
    pub licenses: Vec<LicenseInfo>,

    /// Readme found in this directory, if any
    #[serde(default)]
    pub readme: Option<Readme>,

    /// Package rooted at this directory, if any
    #[serde(default)]
    pub package: Option<DirectoryPackage>,
}

/// A readme file and its raw contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readme {
    pub file_path: String,
    #[serde(default)]
    pub contents: String,
}

/// The package rooted at a directory
///
/// Documentation must be present on submission when the package exists;
/// a directory package without it is invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPackage {
    /// Package name
    pub name: String,

    /// Import paths of the packages this package imports
    #[serde(default)]
    pub imports: Vec<String>,

    /// Rendered documentation for this package
    #[serde(default)]
    pub documentation: Option<Documentation>,
}

/// Rendered documentation for one build platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(default)]
    pub goos: String,
    #[serde(default)]
    pub goarch: String,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub html: String,
}
