use serde::{Deserialize, Serialize};

use super::license::LicenseInfo;

/// Package - an importable unit of code within a module version
///
/// A package is identified by its import path, which is unique within one
/// module version. Documentation HTML must be present on submission; the
/// redactor may blank it but never removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Import path of the package (unique within a module version)
    pub path: String,

    /// Package name (the identifier clients import it as)
    pub name: String,

    /// One-line summary extracted from the package documentation
    #[serde(default)]
    pub synopsis: String,

    /// Import path the package would have under major version 1
    #[serde(default)]
    pub v1_path: String,

    /// Whether derived content (docs, synopsis) may be stored and served
    #[serde(default)]
    pub is_redistributable: bool,

    /// Rendered documentation HTML; `None` is an invalid submission,
    /// redaction yields `Some("")`
    #[serde(default)]
    pub documentation_html: Option<String>,

    /// Licenses that apply to this package
    #[serde(default)]
    pub licenses: Vec<LicenseInfo>,

    /// Build platform the documentation was generated for
    #[serde(default)]
    pub goos: String,

    /// Build architecture the documentation was generated for
    #[serde(default)]
    pub goarch: String,

    /// Import paths of the packages this package imports
    #[serde(default)]
    pub imports: Vec<String>,
}

impl Package {
    /// Create a new Package with the given path and name
    ///
    /// All derived content starts empty; `documentation_html` starts as
    /// `Some("")` so the result is a valid submission.
    pub fn new(path: String, name: String) -> Self {
        Self {
            path,
            name,
            synopsis: String::new(),
            v1_path: String::new(),
            is_redistributable: false,
            documentation_html: Some(String::new()),
            licenses: Vec::new(),
            goos: String::new(),
            goarch: String::new(),
            imports: Vec::new(),
        }
    }
}
