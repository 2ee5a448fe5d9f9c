//! Fetch-pipeline version states
//!
//! The fetch pipeline owns the per-version status codes; this writer lets
//! it (and operators, through the CLI) record them. The alternative-path
//! guard reads this table.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use modvault_core::errors::{Error, ErrorKind};
use modvault_core::version;
use rusqlite::Connection;

/// Record or update the fetch status for a module version
///
/// The sortable version encoding is stored alongside so status queries can
/// compare version order without parsing.
pub fn upsert_module_version_state(
    conn: &Connection,
    module_path: &str,
    version: &str,
    status: i64,
) -> Result<()> {
    let sort_version = version::for_sorting(version);
    let now = chrono::Utc::now().timestamp();

    conn.execute(
        "INSERT INTO module_version_states
             (module_path, version, sort_version, status, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (module_path, version) DO UPDATE SET
             sort_version = excluded.sort_version,
             status = excluded.status,
             updated_at = excluded.updated_at",
        rusqlite::params![module_path, version, sort_version, status, now],
    )
    .map_err(|e| {
        Error::new(ErrorKind::Storage)
            .with_op("upsert_module_version_state")
            .with_module(module_path.to_string(), version.to_string())
            .with_message(format!("Failed to record version state: {}", e))
    })?;

    tracing::debug!(
        module_path = %module_path,
        version = %version,
        status = status,
        "Recorded module version state"
    );

    Ok(())
}
