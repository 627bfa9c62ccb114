//! Category API handlers.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;
use dukaan_core::validation::validate_lookup_name;
use dukaan_core::Category;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list).post(create))
}

#[derive(Debug, Deserialize)]
pub struct CreateLookup {
    pub name: String,
}

/// GET /api/categories
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.db.categories().list().await?;
    Ok(Json(categories))
}

/// POST /api/categories
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateLookup>,
) -> ApiResult<Json<Category>> {
    debug!(name = %payload.name, "create_category");

    validate_lookup_name("name", &payload.name)?;
    let category = state.db.categories().insert(&payload.name).await?;

    Ok(Json(category))
}
