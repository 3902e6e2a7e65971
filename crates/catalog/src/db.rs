//! Database connection management.
//!
//! The catalog lives in an embedded SQLite database. Opening a pool creates
//! the file if needed and runs the embedded migrations before any other
//! operation.

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open (or create) the catalog database at `path` and run migrations.
///
/// WAL journal mode keeps concurrent readers unblocked while a write is in
/// flight.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened or a migration
/// fails.
pub async fn create_pool(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    tracing::info!(path = %path.display(), "catalog database ready");

    Ok(pool)
}
