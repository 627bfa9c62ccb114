//! Excel import/export handlers.
//!
//! Import: multipart upload of a product sheet; missing lookups are
//! created, products are upserted by barcode, and row failures are
//! reported without aborting the batch.
//! Export: the currently filtered product or sale set as an `.xlsx`
//! download.

use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, info};

use super::product::ProductListQuery;
use super::sale::SaleListQuery;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::xlsx::{self, ImportRow, RowError};
use dukaan_core::validation::{
    validate_barcode, validate_lookup_name, validate_price_paise, validate_stock_level,
};
use dukaan_core::NewProduct;

/// Uploaded workbooks are small; 10 MiB is generous for a catalog sheet.
const IMPORT_BODY_LIMIT: usize = 10 * 1024 * 1024;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/import",
            post(import).layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route("/export/products", get(export_products))
        .route("/export/sales", get(export_sales))
}

/// Batch outcome returned to the import screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportReport {
    total_rows: usize,
    imported: usize,
    failed: usize,
    errors: Vec<RowError>,
}

/// POST /api/transfer/import
async fn import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportReport>> {
    let mut file_bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid upload: {}", e)))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if is_file && file_bytes.is_none() {
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Invalid upload: {}", e)))?,
            );
        }
    }

    let data = file_bytes.ok_or_else(|| ApiError::validation("No file uploaded"))?;
    debug!(bytes = data.len(), "Parsing uploaded product sheet");

    let parsed =
        xlsx::parse_product_sheet(&data).map_err(|e| ApiError::validation(e.to_string()))?;

    let mut errors = parsed.errors;
    let mut imported = 0;

    for row in &parsed.rows {
        match apply_row(&state, row).await {
            Ok(()) => imported += 1,
            Err(e) => errors.push(RowError {
                row: row.row,
                message: e.message,
            }),
        }
    }

    errors.sort_by_key(|e| e.row);

    info!(
        total = parsed.total_rows,
        imported,
        failed = errors.len(),
        "Product import finished"
    );

    Ok(Json(ImportReport {
        total_rows: parsed.total_rows,
        imported,
        failed: errors.len(),
        errors,
    }))
}

/// Applies one parsed row: validates, creates missing lookups, upserts
/// the product by barcode.
async fn apply_row(state: &AppState, row: &ImportRow) -> Result<(), ApiError> {
    validate_barcode(&row.barcode)?;
    validate_lookup_name("category", &row.category)?;
    validate_lookup_name("manufacturer", &row.manufacturer)?;
    validate_stock_level(row.quantity)?;
    validate_price_paise("cost_price", row.cost_price_paise)?;
    validate_price_paise("sale_price", row.sale_price_paise)?;

    let category = state.db.categories().get_or_create(&row.category).await?;
    let manufacturer = state
        .db
        .manufacturers()
        .get_or_create(&row.manufacturer)
        .await?;

    state
        .db
        .products()
        .upsert_by_barcode(&NewProduct {
            barcode: row.barcode.clone(),
            category_id: category.id,
            manufacturer_id: manufacturer.id,
            quantity: row.quantity,
            cost_price_paise: row.cost_price_paise,
            sale_price_paise: row.sale_price_paise,
        })
        .await?;

    Ok(())
}

/// GET /api/transfer/export/products
///
/// Same filters as the product list, streamed as a file download.
async fn export_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<impl IntoResponse> {
    let products = state.db.products().list(&query.into()).await?;
    let bytes =
        xlsx::products_workbook(&products).map_err(|e| ApiError::internal(e.to_string()))?;

    info!(count = products.len(), "Exported product sheet");
    Ok(attachment("products.xlsx", bytes))
}

/// GET /api/transfer/export/sales
///
/// Same filters as the sales report, streamed as a file download.
async fn export_sales(
    State(state): State<AppState>,
    Query(query): Query<SaleListQuery>,
) -> ApiResult<impl IntoResponse> {
    let sales = state.db.sales().list(&query.into()).await?;
    let bytes = xlsx::sales_workbook(&sales).map_err(|e| ApiError::internal(e.to_string()))?;

    info!(count = sales.len(), "Exported sales sheet");
    Ok(attachment("sales.xlsx", bytes))
}

fn attachment(filename: &str, bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
}
