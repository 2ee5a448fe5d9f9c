//! Search indexing seam and the alternative-path guard
//!
//! The engine never builds search documents itself; it hands successfully
//! persisted modules to a [`SearchIndexer`], and skips that handoff when a
//! newer version of the module path was recorded as an alternative path.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use modvault_core::errors::{Error, ErrorKind};
use modvault_core::model::Module;
use modvault_core::version;
use rusqlite::{Connection, OptionalExtension};

/// Status code recorded for a version whose module path was declared an
/// alternative to a different canonical path
pub const STATUS_ALTERNATIVE_MODULE_PATH: i64 = 491;

/// Receives successfully persisted modules for search indexing
pub trait SearchIndexer {
    fn upsert_search_documents(&self, module: &Module) -> Result<()>;
}

/// Indexer that does nothing, for callers that persist without search
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndexer;

impl SearchIndexer for NoopIndexer {
    fn upsert_search_documents(&self, _module: &Module) -> Result<()> {
        Ok(())
    }
}

/// Check whether a newer version of this module path was recorded as an
/// alternative module path
///
/// "Newer" compares sortable version encodings, so a release outranks
/// nothing here; the comparison is purely version order. Equal or older
/// alternative rows do not suppress indexing.
pub fn has_newer_alternative(conn: &Connection, module_path: &str, version: &str) -> Result<bool> {
    let sort_version = version::for_sorting(version);

    let found: Option<i64> = conn
        .query_row(
            "SELECT 1
             FROM module_version_states
             WHERE module_path = ?1
               AND sort_version > ?2
               AND status = ?3
             LIMIT 1",
            rusqlite::params![module_path, sort_version, STATUS_ALTERNATIVE_MODULE_PATH],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| {
            Error::new(ErrorKind::Storage)
                .with_op("has_newer_alternative")
                .with_module(module_path.to_string(), version.to_string())
                .with_message(format!("Failed to query version states: {}", e))
        })?;

    Ok(found.is_some())
}
