use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modpath;
use crate::version::{self, VersionType};

use super::directory::Directory;
use super::license::License;
use super::package::Package;

/// Module - a versioned unit of source code and the root of the model tree
///
/// A module is identified by `(module_path, version)` and owns its packages,
/// licenses, and directories. It is created wholesale per ingestion call and
/// superseded as a whole when the same identity is ingested again; nothing
/// updates it partially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Module path (e.g. "example.com/widget/v2")
    pub module_path: String,

    /// Canonical semantic version, with leading "v" (e.g. "v1.2.3")
    pub version: String,

    /// Commit time of the underlying revision; the Unix epoch means unset
    #[serde(default = "unix_epoch")]
    pub commit_time: DateTime<Utc>,

    /// Path of the module readme, relative to the module root
    #[serde(default)]
    pub readme_file_path: String,

    /// Raw contents of the module readme
    #[serde(default)]
    pub readme_contents: String,

    /// Opaque repository/source metadata, stored as JSON
    #[serde(default)]
    pub source_info: serde_json::Value,

    /// Whether readme and other derived module content may be stored
    #[serde(default)]
    pub is_redistributable: bool,

    /// Whether the revision carried an explicit build descriptor file
    #[serde(default)]
    pub has_build_descriptor: bool,

    /// Packages contained in this module version
    #[serde(default)]
    pub packages: Vec<Package>,

    /// Licenses found in this module version
    #[serde(default)]
    pub licenses: Vec<License>,

    /// Directory tree entries, populated only when the caller writes
    /// directory tables
    #[serde(default)]
    pub directories: Vec<Directory>,
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Module {
    /// Create a new Module with the given identity and commit time
    ///
    /// # Arguments
    /// * `module_path` - Module path (e.g. "example.com/widget")
    /// * `version` - Canonical semantic version with leading "v"
    /// * `commit_time` - Commit time of the underlying revision
    ///
    /// # Returns
    /// A new Module with no packages, licenses, or directories
    pub fn new(module_path: String, version: String, commit_time: DateTime<Utc>) -> Self {
        Self {
            module_path,
            version,
            commit_time,
            readme_file_path: String::new(),
            readme_contents: String::new(),
            source_info: serde_json::Value::Null,
            is_redistributable: false,
            has_build_descriptor: false,
            packages: Vec::new(),
            licenses: Vec::new(),
            directories: Vec::new(),
        }
    }

    /// Classify this module's version as release, prerelease, or pseudo
    ///
    /// Derived from the version string on every call so it can never
    /// disagree with it. Versions that fail to parse are treated as
    /// releases; validation rejects them up front for non-stdlib paths.
    pub fn version_type(&self) -> VersionType {
        version::classify(&self.version).unwrap_or(VersionType::Release)
    }

    /// The series path: the module path with any `/vN` (N >= 2)
    /// major-version suffix removed
    pub fn series_path(&self) -> &str {
        modpath::series_path(&self.module_path)
    }

    /// The version encoded so lexicographic order matches semver precedence
    pub fn sort_version(&self) -> String {
        version::for_sorting(&self.version)
    }

    /// Whether the commit time is set; the Unix epoch means unset
    pub fn has_commit_time(&self) -> bool {
        self.commit_time != DateTime::<Utc>::UNIX_EPOCH
    }

    /// Sort all owned collections into their canonical write order
    ///
    /// Packages sort by path, licenses by file path, directories by path,
    /// and every import list lexically. Rows then reach the store in the
    /// same order from every transaction, which fixes lock-acquisition
    /// order across concurrent writers.
    pub fn sort_for_write(&mut self) {
        self.packages.sort_by(|a, b| a.path.cmp(&b.path));
        self.licenses.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        self.directories.sort_by(|a, b| a.path.cmp(&b.path));
        for package in &mut self.packages {
            package.imports.sort();
        }
        for directory in &mut self.directories {
            if let Some(package) = &mut directory.package {
                package.imports.sort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LicenseInfo;

    fn commit_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_587_486_381, 0).unwrap()
    }

    #[test]
    fn test_new_module() {
        let module = Module::new(
            "example.com/widget".to_string(),
            "v1.2.3".to_string(),
            commit_time(),
        );

        assert_eq!(module.module_path, "example.com/widget");
        assert_eq!(module.version, "v1.2.3");
        assert!(module.has_commit_time());
        assert!(module.packages.is_empty());
        assert!(!module.is_redistributable);
    }

    #[test]
    fn test_version_type_is_derived() {
        let mut module = Module::new(
            "example.com/widget".to_string(),
            "v1.2.3".to_string(),
            commit_time(),
        );
        assert_eq!(module.version_type(), VersionType::Release);

        module.version = "v1.2.3-beta.1".to_string();
        assert_eq!(module.version_type(), VersionType::Prerelease);

        module.version = "v0.0.0-20200409183150-7cc351a1a280".to_string();
        assert_eq!(module.version_type(), VersionType::Pseudo);
    }

    #[test]
    fn test_series_path() {
        let module = Module::new(
            "example.com/widget/v2".to_string(),
            "v2.0.0".to_string(),
            commit_time(),
        );
        assert_eq!(module.series_path(), "example.com/widget");
    }

    #[test]
    fn test_unset_commit_time() {
        let module = Module::new(
            "example.com/widget".to_string(),
            "v1.0.0".to_string(),
            DateTime::<Utc>::UNIX_EPOCH,
        );
        assert!(!module.has_commit_time());
    }

    #[test]
    fn test_sort_for_write_orders_everything() {
        let mut module = Module::new(
            "example.com/widget".to_string(),
            "v1.0.0".to_string(),
            commit_time(),
        );

        let mut pkg_b = Package::new("example.com/widget/b".to_string(), "b".to_string());
        pkg_b.imports = vec!["z".to_string(), "a".to_string()];
        let pkg_a = Package::new("example.com/widget/a".to_string(), "a".to_string());
        module.packages = vec![pkg_b, pkg_a];

        module.licenses = vec![
            License {
                file_path: "sub/LICENSE".to_string(),
                contents: String::new(),
                types: vec![],
                coverage: serde_json::Value::Null,
            },
            License {
                file_path: "LICENSE".to_string(),
                contents: String::new(),
                types: vec![],
                coverage: serde_json::Value::Null,
            },
        ];

        module.sort_for_write();

        assert_eq!(module.packages[0].path, "example.com/widget/a");
        assert_eq!(module.packages[1].path, "example.com/widget/b");
        assert_eq!(module.packages[1].imports, vec!["a", "z"]);
        assert_eq!(module.licenses[0].file_path, "LICENSE");
    }

    #[test]
    fn test_deserialize_ingest_json() {
        let json = r#"{
            "module_path": "example.com/widget",
            "version": "v1.0.0",
            "commit_time": "2020-04-21T15:46:21Z",
            "is_redistributable": true,
            "packages": [{
                "path": "example.com/widget",
                "name": "widget",
                "documentation_html": "<p>widget</p>"
            }],
            "licenses": [{"file_path": "LICENSE", "types": ["MIT"]}]
        }"#;

        let module: Module = serde_json::from_str(json).unwrap();
        assert_eq!(module.version, "v1.0.0");
        assert_eq!(module.commit_time.timestamp(), 1_587_483_981);
        assert_eq!(module.packages.len(), 1);
        assert_eq!(module.licenses[0].types, vec!["MIT"]);
        assert!(module.directories.is_empty());
    }

    #[test]
    fn test_license_info_on_package() {
        let mut pkg = Package::new("example.com/widget".to_string(), "widget".to_string());
        pkg.licenses = vec![LicenseInfo {
            file_path: "LICENSE".to_string(),
            types: vec!["MIT".to_string()],
        }];
        assert_eq!(pkg.licenses.len(), 1);
    }
}
