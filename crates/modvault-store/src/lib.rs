//! modvault Store - SQLite persistence for resolved module versions
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - The transactional delete-and-replace module upsert
//! - Latest-version and alternative-path decisions
//! - Conflict-tolerant bulk insert helpers
//! - Version-state recording for the fetch pipeline

pub mod bulk;
pub mod db;
pub mod delete;
pub mod errors;
pub mod latest;
pub mod migrations;
pub mod search;
pub mod upsert;
pub mod version_state;

// Re-export key types
pub use errors::Result;
