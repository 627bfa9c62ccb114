//! Router assembly.
//!
//! Each handler module exposes a small `routes()` builder; everything is
//! nested under `/api`. CORS is wide open: the frontend is served from the
//! same LAN box and there is no authentication to protect.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{category, health, manufacturer, product, sale, transfer};
use crate::state::AppState;

/// Builds the fully configured application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest("/api/categories", category::routes())
        .nest("/api/manufacturers", manufacturer::routes())
        .nest("/api/products", product::routes())
        .nest("/api/sales", sale::routes())
        .nest("/api/transfer", transfer::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
