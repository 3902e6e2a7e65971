//! Integration tests for Tavola.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tavola-integration-tests
//! ```
//!
//! Most tests run fully in-process: [`TestContext::new`] opens a throwaway
//! SQLite database, serves the storefront router on an ephemeral port and
//! hands back a `reqwest` client pointed at it. The `live_server` tests are
//! `#[ignore]`d and expect an already-running storefront (set
//! `TAVOLA_BASE_URL` to override the default `http://localhost:4000`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use sqlx::SqlitePool;

use tavola_storefront::config::StorefrontConfig;
use tavola_storefront::routes;
use tavola_storefront::state::AppState;

/// A storefront instance serving a throwaway catalog.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub pool: SqlitePool,
    _dir: tempfile::TempDir,
}

impl TestContext {
    /// Boot a storefront on an ephemeral port over a fresh database.
    ///
    /// # Panics
    ///
    /// Panics on any setup failure; these tests cannot proceed without a
    /// working server.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_path = dir.path().join("catalog.db");

        let pool = tavola_catalog::db::create_pool(&database_path)
            .await
            .expect("Failed to open catalog database");

        let config = StorefrontConfig {
            database_path,
            host: "127.0.0.1".parse().expect("loopback address"),
            port: 0,
        };
        let state = AppState::new(config, pool.clone());

        let app = Router::new().merge(routes::routes()).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("test server failed");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            pool,
            _dir: dir,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Wire-shaped food item with the three required fields.
#[must_use]
pub fn food_json(name: &str, price: f64, category: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "price": price,
        "category": category,
    })
}
