//! Manufacturer API handlers.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

use super::category::CreateLookup;
use crate::error::ApiResult;
use crate::state::AppState;
use dukaan_core::validation::validate_lookup_name;
use dukaan_core::Manufacturer;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list).post(create))
}

/// GET /api/manufacturers
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Manufacturer>>> {
    let manufacturers = state.db.manufacturers().list().await?;
    Ok(Json(manufacturers))
}

/// POST /api/manufacturers
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateLookup>,
) -> ApiResult<Json<Manufacturer>> {
    debug!(name = %payload.name, "create_manufacturer");

    validate_lookup_name("name", &payload.name)?;
    let manufacturer = state.db.manufacturers().insert(&payload.name).await?;

    Ok(Json(manufacturer))
}
