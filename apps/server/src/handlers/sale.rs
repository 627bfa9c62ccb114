//! Sale API handlers: creation, report listing, receipt fetch, edit,
//! delete.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use dukaan_core::validation::{validate_new_sale, validate_sale_update};
use dukaan_core::{tz, NewSale, Sale, SaleFilter, SaleItem, SaleType, SaleUpdate, SaleWithItems};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete_sale))
}

// =============================================================================
// DTOs
// =============================================================================

/// Query parameters for the sales report and export.
#[derive(Debug, Default, Deserialize)]
pub struct SaleListQuery {
    /// Exact store-timezone day (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sale_type: Option<SaleType>,
    /// Substring over customer name or mobile
    pub q: Option<String>,
}

impl From<SaleListQuery> for SaleFilter {
    fn from(query: SaleListQuery) -> Self {
        SaleFilter {
            date: query.date,
            from: query.from,
            to: query.to,
            sale_type: query.sale_type,
            search: query.q,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSaleResponse {
    id: String,
    number: String,
    sale_date: String,
    sale_date_local: String,
}

/// A sale header with its store-local display date.
#[derive(Debug, Serialize)]
struct SaleRow {
    #[serde(flatten)]
    sale: Sale,
    sale_date_local: String,
}

impl From<Sale> for SaleRow {
    fn from(sale: Sale) -> Self {
        let sale_date_local = tz::format_local(sale.sale_date);
        SaleRow {
            sale,
            sale_date_local,
        }
    }
}

/// Receipt payload: header, local date, and line items.
#[derive(Debug, Serialize)]
struct SaleDetail {
    #[serde(flatten)]
    sale: Sale,
    sale_date_local: String,
    items: Vec<SaleItem>,
}

impl From<SaleWithItems> for SaleDetail {
    fn from(full: SaleWithItems) -> Self {
        let sale_date_local = tz::format_local(full.sale.sale_date);
        SaleDetail {
            sale: full.sale,
            sale_date_local,
            items: full.items,
        }
    }
}

#[derive(Debug, Serialize)]
struct DeleteSaleResponse {
    id: String,
    deleted: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/sales
async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewSale>,
) -> ApiResult<Json<CreateSaleResponse>> {
    debug!(sale_type = ?payload.sale_type, items = payload.items.len(), "create_sale");

    validate_new_sale(&payload)?;

    let sale = state.db.sales().create(&payload).await?;

    info!(number = %sale.number, "Sale recorded");
    Ok(Json(CreateSaleResponse {
        id: sale.id,
        number: sale.number,
        sale_date: sale.sale_date.to_rfc3339(),
        sale_date_local: tz::format_local(sale.sale_date),
    }))
}

/// GET /api/sales
async fn list(
    State(state): State<AppState>,
    Query(query): Query<SaleListQuery>,
) -> ApiResult<Json<Vec<SaleRow>>> {
    let sales = state.db.sales().list(&query.into()).await?;
    Ok(Json(sales.into_iter().map(SaleRow::from).collect()))
}

/// GET /api/sales/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SaleDetail>> {
    let full = state
        .db
        .sales()
        .get_with_items(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", &id))?;

    Ok(Json(full.into()))
}

/// PUT /api/sales/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SaleUpdate>,
) -> ApiResult<Json<SaleDetail>> {
    debug!(id = %id, items = payload.items.len(), "update_sale");

    validate_sale_update(&payload)?;

    let full = state.db.sales().update(&id, &payload).await?;

    info!(number = %full.sale.number, "Sale updated");
    Ok(Json(full.into()))
}

/// DELETE /api/sales/{id}
async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteSaleResponse>> {
    state.db.sales().delete(&id).await?;

    info!(id = %id, "Sale deleted");
    Ok(Json(DeleteSaleResponse { id, deleted: true }))
}
