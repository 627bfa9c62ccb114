//! Product API handlers.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use dukaan_core::validation::{validate_barcode, validate_price_paise, validate_stock_level};
use dukaan_core::{NewProduct, Product, ProductDetail, ProductFilter};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{barcode}", get(get_by_barcode))
        .route("/{barcode}/quantity", patch(set_quantity))
}

/// Query parameters for listing and export share one shape.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub q: Option<String>,
    pub category_id: Option<String>,
    pub manufacturer_id: Option<String>,
}

impl From<ProductListQuery> for ProductFilter {
    fn from(query: ProductListQuery) -> Self {
        ProductFilter {
            q: query.q,
            category_id: query.category_id,
            manufacturer_id: query.manufacturer_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuantityPatch {
    quantity: i64,
}

/// GET /api/products
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Json<Vec<ProductDetail>>> {
    let products = state.db.products().list(&query.into()).await?;
    Ok(Json(products))
}

/// GET /api/products/{barcode}
///
/// The billing screen resolves scanned/typed barcodes here; an unknown
/// barcode is a 404 the screen turns into a toast.
async fn get_by_barcode(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> ApiResult<Json<ProductDetail>> {
    validate_barcode(&barcode)?;

    let product = state
        .db
        .products()
        .get_by_barcode(&barcode)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &barcode))?;

    Ok(Json(product))
}

/// POST /api/products
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<Json<Product>> {
    debug!(barcode = %payload.barcode, "create_product");

    validate_barcode(&payload.barcode)?;
    validate_stock_level(payload.quantity)?;
    validate_price_paise("cost_price", payload.cost_price_paise)?;
    validate_price_paise("sale_price", payload.sale_price_paise)?;

    let product = state.db.products().insert(&payload).await?;

    info!(barcode = %product.barcode, "Product created");
    Ok(Json(product))
}

/// PATCH /api/products/{barcode}/quantity
///
/// Absolute restock correction; sale flows adjust stock by deltas on
/// their own.
async fn set_quantity(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Json(payload): Json<QuantityPatch>,
) -> ApiResult<Json<ProductDetail>> {
    validate_barcode(&barcode)?;
    validate_stock_level(payload.quantity)?;

    state
        .db
        .products()
        .set_quantity(&barcode, payload.quantity)
        .await?;

    let product = state
        .db
        .products()
        .get_by_barcode(&barcode)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &barcode))?;

    info!(barcode = %barcode, quantity = payload.quantity, "Stock level set");
    Ok(Json(product))
}
