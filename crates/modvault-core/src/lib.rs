//! modvault Core - Domain model and pure rules for module ingestion
//!
//! This crate provides everything the persistence layer needs that does not
//! itself touch storage, including:
//! - Module/Package/License/Directory models describing a resolved module version
//! - Submission validation with aggregated error reporting
//! - Redaction of non-redistributable derived content
//! - Text sanitization for relational storage
//! - Version classification and the sortable version encoding
//! - Module path rules (syntax, series path, standard library sentinel)
//! - The structured error facility and logging initialization

pub mod errors;
pub mod logging;
pub mod model;
pub mod modpath;
pub mod redact;
pub mod sanitize;
pub mod validate;
pub mod version;

// Re-export commonly used types
pub use errors::{Error, ErrorKind, Result};
pub use model::{
    Directory, DirectoryPackage, Documentation, License, LicenseInfo, Module, Package, Readme,
};
pub use version::VersionType;
