//! Health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /api/health
async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    if !state.db.health_check().await {
        return Err(ApiError::internal("Database unavailable"));
    }

    Ok(Json(HealthResponse { status: "ok" }))
}
