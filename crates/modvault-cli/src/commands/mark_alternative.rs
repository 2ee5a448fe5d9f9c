//! Mark-alternative command
//!
//! Usage: modvault mark-alternative <MODULE_PATH> <VERSION> [--db <PATH>]
//!
//! Records that the given version is served under an alternative module
//! path. Later ingestions of older versions under this path will still be
//! persisted but skipped for search indexing.

use clap::Args;
use modvault_store::search::STATUS_ALTERNATIVE_MODULE_PATH;
use modvault_store::version_state::upsert_module_version_state;

#[derive(Debug, Args)]
pub struct MarkAlternativeArgs {
    /// Module path the status applies to
    pub module_path: String,

    /// Version the status applies to
    pub version: String,

    /// Path to the store database
    #[arg(long, default_value = "modvault.db")]
    pub db: String,
}

/// Execute mark-alternative
pub fn execute(args: MarkAlternativeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = modvault_store::db::open(&args.db)?;

    upsert_module_version_state(
        &conn,
        &args.module_path,
        &args.version,
        STATUS_ALTERNATIVE_MODULE_PATH,
    )?;

    println!(
        "✓ Marked {}@{} as alternative (status {})",
        args.module_path, args.version, STATUS_ALTERNATIVE_MODULE_PATH
    );

    Ok(())
}
