//! ModVault CLI
//!
//! Command-line interface for ModVault

use clap::{Parser, Subcommand};
use modvault_core::logging::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "modvault")]
#[command(about = "ModVault - Module version persistence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply schema migrations to the store
    Migrate(commands::migrate::MigrateArgs),
    /// Ingest a resolved module description from a JSON file
    Ingest(commands::ingest::IngestArgs),
    /// Delete one module version from the store
    Delete(commands::delete::DeleteArgs),
    /// Record a version as served under an alternative module path
    MarkAlternative(commands::mark_alternative::MarkAlternativeArgs),
}

fn main() {
    logging::init(Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate(args) => commands::migrate::execute(args),
        Commands::Ingest(args) => commands::ingest::execute(args),
        Commands::Delete(args) => commands::delete::execute(args),
        Commands::MarkAlternative(args) => commands::mark_alternative::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
