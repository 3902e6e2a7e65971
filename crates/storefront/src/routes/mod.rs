//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health          - Liveness check
//! GET    /health/ready    - Readiness check (verifies database)
//!
//! # Foods
//! GET    /foods           - List catalog
//! GET    /foods/{id}      - Food detail
//! POST   /foods           - Create food
//! POST   /foods/add       - Bulk create (atomic)
//! DELETE /foods/{id}      - Delete food
//! ```

pub mod foods;

use axum::Router;

use crate::state::AppState;

/// Build the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new().merge(foods::router())
}
