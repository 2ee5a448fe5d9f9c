//! Database connection management
//!
//! Provides utilities for opening, configuring, and transacting on SQLite
//! connections.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

/// Open a SQLite database at the given path
///
/// The returned connection is already configured; see [`configure`].
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Configure a connection
///
/// Foreign keys are off by default in SQLite and cascade deletion from
/// modules downward depends on them, so every connection must pass through
/// here. WAL lets readers proceed during a write, and the busy timeout
/// makes a second writer wait for the write lock instead of failing fast.
fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", 1)
        .map_err(from_rusqlite)?;
    // journal_mode reports the resulting mode back as a row
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .map_err(from_rusqlite)?;
    conn.pragma_update(None, "synchronous", "NORMAL")
        .map_err(from_rusqlite)?;
    conn.busy_timeout(Duration::from_secs(30))
        .map_err(from_rusqlite)?;
    Ok(())
}

/// Run a closure inside one immediate (write-locked) transaction
///
/// The write lock is taken when the transaction opens, not on first write,
/// so concurrent writers queue on the busy timeout and never deadlock on a
/// lock upgrade. Commits on Ok; the transaction guard rolls back on drop
/// for Err and panic alike.
pub fn transact<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;
    let value = f(&tx)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(value)
}
