//! Conflict-tolerant bulk inserts
//!
//! Shared policy for every table writer: no-op on empty input, flat
//! parameter lists, chunking under the host-parameter limit, an explicit
//! conflict policy, and optional RETURNING streaming for tables whose
//! generated keys feed dependent writers.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use modvault_core::errors::{Error, ErrorKind};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Transaction};

/// Host-parameter ceiling for one INSERT statement, comfortably below
/// SQLite's compiled-in limit
pub const MAX_PARAMS_PER_STATEMENT: usize = 900;

/// Conflict policy for a bulk insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Surface the constraint violation as an error
    Error,
    /// Silently drop exact duplicates
    DoNothing,
}

impl OnConflict {
    fn clause(self) -> &'static str {
        match self {
            OnConflict::Error => "",
            OnConflict::DoNothing => " ON CONFLICT DO NOTHING",
        }
    }
}

/// Bulk-insert rows into a table
///
/// `rows` is the flattened parameter list: every `columns.len()` values
/// form one logical row, already in column order.
pub fn bulk_insert(
    tx: &Transaction,
    table: &str,
    columns: &[&str],
    rows: &[Value],
    conflict: OnConflict,
) -> Result<()> {
    bulk_insert_returning(tx, table, columns, rows, conflict, None, |_| Ok(()))
}

/// Bulk-insert rows, streaming each RETURNING row to a closure
///
/// Used by writers whose generated keys feed dependent writers: the caller
/// builds its natural-key to id map inside `each_row`. With a `DoNothing`
/// conflict policy, rows dropped by a conflict are not returned.
pub fn bulk_insert_returning<F>(
    tx: &Transaction,
    table: &str,
    columns: &[&str],
    rows: &[Value],
    conflict: OnConflict,
    returning: Option<&[&str]>,
    mut each_row: F,
) -> Result<()>
where
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<()>,
{
    if rows.is_empty() {
        return Ok(());
    }
    if rows.len() % columns.len() != 0 {
        return Err(Error::new(ErrorKind::Internal)
            .with_op("bulk_insert")
            .with_message(format!(
                "{} values do not form whole {}-column rows for table {}",
                rows.len(),
                columns.len(),
                table
            )));
    }

    let rows_per_chunk = (MAX_PARAMS_PER_STATEMENT / columns.len()).max(1);
    let values_per_chunk = rows_per_chunk * columns.len();

    for chunk in rows.chunks(values_per_chunk) {
        let sql = build_insert_sql(
            table,
            columns,
            chunk.len() / columns.len(),
            conflict,
            returning,
        );
        let mut stmt = tx.prepare(&sql).map_err(|e| {
            Error::new(ErrorKind::Storage)
                .with_op("bulk_insert")
                .with_message(format!("Failed to prepare insert into {}: {}", table, e))
        })?;

        if returning.is_none() {
            stmt.execute(params_from_iter(chunk.iter())).map_err(|e| {
                Error::new(ErrorKind::Storage)
                    .with_op("bulk_insert")
                    .with_message(format!("Failed to insert into {}: {}", table, e))
            })?;
        } else {
            let mut returned = stmt.query(params_from_iter(chunk.iter())).map_err(|e| {
                Error::new(ErrorKind::Storage)
                    .with_op("bulk_insert")
                    .with_message(format!("Failed to insert into {}: {}", table, e))
            })?;
            loop {
                let row = returned.next().map_err(|e| {
                    Error::new(ErrorKind::Storage)
                        .with_op("bulk_insert")
                        .with_message(format!("Failed to read returned row from {}: {}", table, e))
                })?;
                match row {
                    Some(row) => each_row(row).map_err(|e| {
                        Error::new(ErrorKind::Storage)
                            .with_op("bulk_insert")
                            .with_message(format!("Failed to scan returned row from {}: {}", table, e))
                    })?,
                    None => break,
                }
            }
        }
    }

    Ok(())
}

fn build_insert_sql(
    table: &str,
    columns: &[&str],
    row_count: usize,
    conflict: OnConflict,
    returning: Option<&[&str]>,
) -> String {
    let row_placeholders = format!("({})", vec!["?"; columns.len()].join(", "));
    let placeholders = vec![row_placeholders; row_count].join(", ");

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        table,
        columns.join(", "),
        placeholders
    );
    sql.push_str(conflict.clause());
    if let Some(cols) = returning {
        sql.push_str(" RETURNING ");
        sql.push_str(&cols.join(", "));
    }
    sql
}
