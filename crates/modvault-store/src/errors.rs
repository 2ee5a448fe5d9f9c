//! Error handling for modvault-store
//!
//! Wraps the modvault-core Error with store-specific helpers

use modvault_core::errors::{Error, ErrorKind};

/// Result type alias using the core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> Error {
    Error::new(ErrorKind::Storage)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> Error {
    Error::new(ErrorKind::Internal)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> Error {
    Error::new(ErrorKind::Storage)
        .with_op("sqlite")
        .with_message(err.to_string())
}
