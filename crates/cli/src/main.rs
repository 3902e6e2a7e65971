//! Tavola CLI - Database migrations and catalog seeding.
//!
//! # Usage
//!
//! ```bash
//! # Create the catalog database and bring the schema up to date
//! tavola migrate
//!
//! # Seed the catalog from a JSON file (atomic: all items or none)
//! tavola seed food.json
//! ```
//!
//! The database path comes from `TAVOLA_DATABASE_PATH` (default
//! `tavola.db`) or the `--database` flag.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tavola")]
#[command(version, about = "Tavola CLI tools")]
struct Cli {
    /// Path to the SQLite catalog database.
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database if needed and run schema migrations
    Migrate,
    /// Seed the catalog from a JSON file of food items
    Seed {
        /// Path to a JSON array of food items
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let database = cli.database.unwrap_or_else(|| {
        std::env::var("TAVOLA_DATABASE_PATH")
            .map_or_else(|_| PathBuf::from("tavola.db"), PathBuf::from)
    });

    match cli.command {
        Commands::Migrate => commands::migrate::run(&database).await?,
        Commands::Seed { file } => commands::seed::run(&database, &file).await?,
    }
    Ok(())
}
