//! Seed the catalog from a JSON file.
//!
//! The file holds a JSON array of food items in the wire shape accepted by
//! `POST /foods/add`. Seeding reuses the store's atomic bulk insert, so a
//! bad item anywhere in the file leaves the catalog untouched.

use std::path::Path;

use tracing::{error, info};

use tavola_catalog::{FoodRepository, NewFood};

/// Load `file` into the catalog database at `database`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if any item fails
/// validation, or if the database is unavailable.
pub async fn run(database: &Path, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    info!(path = %file.display(), "loading food items from file");

    let content = tokio::fs::read_to_string(file).await?;
    let inputs: Vec<NewFood> = serde_json::from_str(&content)?;

    info!(count = inputs.len(), "parsed food items");

    let pool = tavola_catalog::db::create_pool(database).await?;
    let repo = FoodRepository::new(&pool);

    match repo.create_many(&inputs).await {
        Ok(foods) => {
            info!(count = foods.len(), "catalog seeded");
        }
        Err(e) => {
            error!("seeding failed, nothing was inserted: {e}");
            return Err(e.into());
        }
    }

    pool.close().await;
    Ok(())
}
