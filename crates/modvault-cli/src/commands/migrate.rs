//! Migrate command
//!
//! Usage: modvault migrate [--db <PATH>]

use clap::Args;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Path to the store database
    #[arg(long, default_value = "modvault.db")]
    pub db: String,
}

/// Execute migrate
pub fn execute(args: MigrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = modvault_store::db::open(&args.db)?;
    modvault_store::migrations::apply_migrations(&mut conn)?;

    println!("✓ Migrations applied ({})", args.db);

    Ok(())
}
