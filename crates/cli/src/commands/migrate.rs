//! Database migration command.

use std::path::Path;

use tracing::info;

/// Create the catalog database if needed and bring the schema up to date.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run(database: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %database.display(), "running catalog migrations");

    let pool = tavola_catalog::db::create_pool(database).await?;
    pool.close().await;

    info!("migrations complete");
    Ok(())
}
