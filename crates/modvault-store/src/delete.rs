//! Module deletion
//!
//! Standalone administrative delete, also used by the upsert to clear any
//! prior record of a module version before rewriting it.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use modvault_core::errors::{Error, ErrorKind};
use rusqlite::Connection;

/// Delete the module with the given path and version
///
/// Cascading foreign keys remove every dependent row: licenses, packages,
/// imports, and the directory tree. Latest-import edges are left in place
/// for the next latest-version ingestion to replace, and version states
/// belong to the fetch pipeline, so neither is touched here.
pub fn delete_module(conn: &Connection, module_path: &str, version: &str) -> Result<()> {
    let deleted = conn
        .execute(
            "DELETE FROM modules WHERE module_path = ?1 AND version = ?2",
            [module_path, version],
        )
        .map_err(|e| {
            Error::new(ErrorKind::Storage)
                .with_op("delete_module")
                .with_module(module_path.to_string(), version.to_string())
                .with_message(format!("Failed to delete module: {}", e))
        })?;

    tracing::debug!(
        module_path = %module_path,
        version = %version,
        rows = deleted,
        "Deleted module"
    );

    Ok(())
}
