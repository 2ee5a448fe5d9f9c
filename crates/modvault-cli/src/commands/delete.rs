//! Delete command
//!
//! Usage: modvault delete <MODULE_PATH> <VERSION> [--db <PATH>]

use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Module path to delete
    pub module_path: String,

    /// Version to delete
    pub version: String,

    /// Path to the store database
    #[arg(long, default_value = "modvault.db")]
    pub db: String,
}

/// Execute delete
pub fn execute(args: DeleteArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = modvault_store::db::open(&args.db)?;

    modvault_store::delete::delete_module(&conn, &args.module_path, &args.version)?;

    println!("✓ Deleted {}@{}", args.module_path, args.version);

    Ok(())
}
