//! Latest-version decision
//!
//! Determines whether an incoming version is the most recent one for its
//! module path.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use modvault_core::errors::{Error, ErrorKind};
use rusqlite::{Connection, OptionalExtension};

/// Decide whether `version` is the latest for `module_path`
///
/// Releases outrank prereleases and pseudo-versions; within a rank the
/// sortable version encoding decides. The query sees whatever module rows
/// the surrounding transaction sees, so the caller controls whether the
/// incoming row itself participates; with no rows at all the incoming
/// version is trivially latest.
pub fn is_latest_version(conn: &Connection, module_path: &str, version: &str) -> Result<bool> {
    let top: Option<String> = conn
        .query_row(
            "SELECT version
             FROM modules
             WHERE module_path = ?1
             ORDER BY version_type = 'release' DESC, sort_version DESC
             LIMIT 1",
            [module_path],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| {
            Error::new(ErrorKind::Storage)
                .with_op("is_latest_version")
                .with_module(module_path.to_string(), version.to_string())
                .with_message(format!("Failed to query latest version: {}", e))
        })?;

    match top {
        None => Ok(true),
        Some(top) => Ok(top == version),
    }
}
