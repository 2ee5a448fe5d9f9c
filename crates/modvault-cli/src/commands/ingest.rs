//! Ingest command
//!
//! Usage: modvault ingest <PATH> [--directories] [--db <PATH>]

use clap::Args;
use modvault_core::Module;
use modvault_store::search::NoopIndexer;
use modvault_store::upsert::{upsert_module, UpsertOptions};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Path to a resolved module description (JSON)
    pub path: PathBuf,

    /// Also persist the per-directory unit tables
    #[arg(long)]
    pub directories: bool,

    /// Path to the store database
    #[arg(long, default_value = "modvault.db")]
    pub db: String,
}

/// Execute ingest
pub fn execute(args: IngestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = modvault_store::db::open(&args.db)?;

    // A fresh --db path starts without a schema
    modvault_store::migrations::apply_migrations(&mut conn)?;

    println!("Ingesting {}...", args.path.display());

    let file = std::fs::File::open(&args.path)?;
    let mut module: Module = serde_json::from_reader(std::io::BufReader::new(file))?;

    let options = UpsertOptions {
        write_directory_tables: args.directories,
    };
    upsert_module(&mut conn, &mut module, &NoopIndexer, &options)?;

    println!("✓ Ingested {}@{}", module.module_path, module.version);

    Ok(())
}
