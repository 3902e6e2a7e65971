//! Food repository for database operations.
//!
//! All reads re-validate persisted values on the way out: a row whose id or
//! price no longer parses surfaces as `DataCorruption` instead of a
//! half-built [`Food`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use tavola_core::FoodId;

use crate::error::{CatalogError, Result};
use crate::models::{Food, NewFood};
use crate::validation::{self, ValidFood};

/// Database row for a food, decoded before domain validation.
#[derive(sqlx::FromRow)]
struct FoodRow {
    id: String,
    name: String,
    price: String,
    category: String,
    image: String,
    description: Option<String>,
    in_stock: Option<bool>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FoodRow> for Food {
    type Error = CatalogError;

    fn try_from(row: FoodRow) -> Result<Self> {
        let id = FoodId::parse(&row.id)
            .map_err(|e| CatalogError::DataCorruption(format!("invalid id in database: {e}")))?;
        let price = row.price.parse::<Decimal>().map_err(|e| {
            CatalogError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id,
            name: row.name,
            price,
            category: row.category,
            image: row.image,
            description: row.description,
            in_stock: row.in_stock,
            created_at: row.created_at,
        })
    }
}

const SELECT_FOOD: &str = "SELECT id, name, price, category, image, description, in_stock, \
                           created_at FROM foods";

/// Repository for food catalog operations.
pub struct FoodRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FoodRepository<'a> {
    /// Create a new food repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all foods in creation order.
    ///
    /// An empty catalog is a valid, non-error result.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the query fails.
    pub async fn list(&self) -> Result<Vec<Food>> {
        let rows: Vec<FoodRow> =
            sqlx::query_as(&format!("{SELECT_FOOD} ORDER BY created_at ASC, id ASC"))
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(Food::try_from).collect()
    }

    /// Get a food by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no food matches `id`.
    pub async fn get(&self, id: FoodId) -> Result<Food> {
        let row: Option<FoodRow> = sqlx::query_as(&format!("{SELECT_FOOD} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool)
            .await?;

        row.map_or(Err(CatalogError::NotFound), Food::try_from)
    }

    /// Validate and persist a single food.
    ///
    /// Assigns a fresh ID and creation timestamp; returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if required fields are missing or
    /// malformed; nothing is persisted in that case.
    pub async fn create(&self, input: &NewFood) -> Result<Food> {
        let valid = validation::validate(input)?;
        let food = valid.into_food(FoodId::generate(), Utc::now());

        insert_food(self.pool, &food).await?;

        tracing::debug!(id = %food.id, name = %food.name, "food created");
        Ok(food)
    }

    /// Validate and persist a batch of foods, all-or-nothing.
    ///
    /// Every item is validated before anything touches the database, and the
    /// inserts run in a single transaction: a failure at any point leaves
    /// the catalog untouched.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` naming the offending item index
    /// and field set if any item is invalid.
    pub async fn create_many(&self, inputs: &[NewFood]) -> Result<Vec<Food>> {
        let valid = validation::validate_batch(inputs)?;

        let now = Utc::now();
        let foods: Vec<Food> = valid
            .into_iter()
            .map(|v: ValidFood| v.into_food(FoodId::generate(), now))
            .collect();

        let mut tx = self.pool.begin().await?;
        for food in &foods {
            insert_food(&mut *tx, food).await?;
        }
        tx.commit().await?;

        tracing::debug!(count = foods.len(), "foods created in bulk");
        Ok(foods)
    }

    /// Delete a food by ID.
    ///
    /// Deleting an already-deleted ID reports `NotFound` again rather than
    /// succeeding silently.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no food matches `id`.
    pub async fn delete(&self, id: FoodId) -> Result<()> {
        let result = sqlx::query("DELETE FROM foods WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound);
        }

        tracing::debug!(id = %id, "food deleted");
        Ok(())
    }

    /// Number of foods in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the query fails.
    pub async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods")
            .fetch_one(self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

/// Insert one fully-validated food. Runs against either the pool or an open
/// transaction so single and bulk creation share the same write path.
async fn insert_food<'e, E>(executor: E, food: &Food) -> Result<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        "INSERT INTO foods (id, name, price, category, image, description, in_stock, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(food.id.to_string())
    .bind(&food.name)
    .bind(food.price.to_string())
    .bind(&food.category)
    .bind(&food.image)
    .bind(food.description.as_deref())
    .bind(food.in_stock)
    .bind(food.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn temp_pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = db::create_pool(&dir.path().join("catalog.db"))
            .await
            .expect("pool");
        (dir, pool)
    }

    fn burger() -> NewFood {
        NewFood::new("Veg Burger", "5.5".parse().expect("decimal"), "Burger")
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);

        let created = repo.create(&burger()).await.expect("create");
        assert_eq!(created.name, "Veg Burger");
        assert_eq!(created.price, "5.5".parse().expect("decimal"));

        let listed = repo.list().await.expect("list");
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);

        let a = repo.create(&burger()).await.expect("create a");
        let b = repo.create(&burger()).await.expect("create b");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn invalid_input_persists_nothing() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);

        let err = repo.create(&NewFood::default()).await.expect_err("invalid");
        match err {
            CatalogError::Validation(invalid) => {
                assert_eq!(invalid.fields, vec!["name", "price", "category"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(repo.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn bulk_create_is_atomic() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);

        let mut batch = vec![burger(); 5];
        batch[2] = NewFood::default();

        let err = repo.create_many(&batch).await.expect_err("invalid batch");
        match err {
            CatalogError::Validation(invalid) => assert_eq!(invalid.index, Some(2)),
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(repo.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn bulk_create_persists_all_when_valid() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);

        let created = repo
            .create_many(&[burger(), burger(), burger()])
            .await
            .expect("bulk create");
        assert_eq!(created.len(), 3);
        assert_eq!(repo.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);

        let err = repo.get(FoodId::generate()).await.expect_err("missing");
        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn double_delete_reports_not_found() {
        let (_dir, pool) = temp_pool().await;
        let repo = FoodRepository::new(&pool);

        let food = repo.create(&burger()).await.expect("create");
        repo.delete(food.id).await.expect("first delete");

        let err = repo.get(food.id).await.expect_err("gone");
        assert!(matches!(err, CatalogError::NotFound));

        let err = repo.delete(food.id).await.expect_err("second delete");
        assert!(matches!(err, CatalogError::NotFound));
    }
}
