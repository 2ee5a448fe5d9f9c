use crate::errors::{Error, ErrorKind, Result};
use crate::model::Module;
use crate::modpath::{self, STDLIB_MODULE_PATH};
use crate::version;

/// Validate a module submission before any storage I/O
///
/// Checks every structural rule and reports all violations in one
/// `InvalidArgument` error, so a caller fixing a rejected submission sees
/// the complete list at once rather than one failure per attempt:
///
/// 1. Version is non-empty
/// 2. Module path is non-empty
/// 3. Module path satisfies path syntax (skipped for the standard library
///    sentinel path)
/// 4. Version is canonical semver (also skipped for the standard library)
/// 5. At least one package
/// 6. Commit time is set (the Unix epoch is the unset sentinel)
///
/// # Errors
/// Returns a single `InvalidArgument` error whose message joins every
/// violated rule.
pub fn validate_module(module: &Module) -> Result<()> {
    let mut reasons: Vec<String> = Vec::new();

    if module.version.is_empty() {
        reasons.push("no specified version".to_string());
    }
    if module.module_path.is_empty() {
        reasons.push("no module path".to_string());
    }
    if module.module_path != STDLIB_MODULE_PATH {
        if let Err(e) = modpath::check_module_path(&module.module_path) {
            reasons.push(format!("invalid module path ({})", e));
        }
        if !version::is_valid(&module.version) {
            reasons.push("version is not valid semver".to_string());
        }
    }
    if module.packages.is_empty() {
        reasons.push("no packages".to_string());
    }
    if !module.has_commit_time() {
        reasons.push("empty commit time".to_string());
    }

    if reasons.is_empty() {
        return Ok(());
    }
    Err(Error::new(ErrorKind::InvalidArgument)
        .with_op("validate_module")
        .with_module(module.module_path.clone(), module.version.clone())
        .with_message(reasons.join(", ")))
}
