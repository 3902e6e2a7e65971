//! Food catalog route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use tracing::instrument;

use tavola_catalog::{Food, FoodRepository, NewFood};
use tavola_core::FoodId;

use crate::error::{ApiError, Result};
use crate::extract::ApiJson;
use crate::state::AppState;

/// Build the foods router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list).post(create))
        .route("/foods/add", post(create_many))
        .route("/foods/{id}", get(show).delete(remove))
}

/// An unparseable ID can never name a record, so it reads as missing.
fn parse_id(raw: &str) -> Result<FoodId> {
    FoodId::parse(raw).map_err(|_| ApiError::NotFound("food".to_owned()))
}

/// List all foods.
///
/// GET /foods
#[instrument(skip(state))]
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Food>>> {
    let foods = FoodRepository::new(state.pool())
        .list()
        .await
        .map_err(ApiError::listing)?;

    Ok(Json(foods))
}

/// Get a single food.
///
/// GET /foods/{id}
#[instrument(skip(state))]
async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Food>> {
    let id = parse_id(&id)?;
    let food = FoodRepository::new(state.pool()).get(id).await?;

    Ok(Json(food))
}

/// Create a food.
///
/// POST /foods
#[instrument(skip(state, input))]
async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewFood>,
) -> Result<(StatusCode, Json<Food>)> {
    let food = FoodRepository::new(state.pool()).create(&input).await?;

    tracing::info!(id = %food.id, name = %food.name, "food created");
    Ok((StatusCode::CREATED, Json(food)))
}

/// Create a batch of foods, all-or-nothing.
///
/// POST /foods/add
#[instrument(skip(state, inputs))]
async fn create_many(
    State(state): State<AppState>,
    ApiJson(inputs): ApiJson<Vec<NewFood>>,
) -> Result<(StatusCode, Json<Vec<Food>>)> {
    let foods = FoodRepository::new(state.pool()).create_many(&inputs).await?;

    tracing::info!(count = foods.len(), "foods created in bulk");
    Ok((StatusCode::CREATED, Json(foods)))
}

/// Delete a food.
///
/// DELETE /foods/{id}
#[instrument(skip(state))]
async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    FoodRepository::new(state.pool()).delete(id).await?;

    tracing::info!(id = %id, "food deleted");
    Ok(StatusCode::NO_CONTENT)
}
