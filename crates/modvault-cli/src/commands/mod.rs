//! CLI command implementations

pub mod delete;
pub mod ingest;
pub mod mark_alternative;
pub mod migrate;
