//! # Sale Repository
//!
//! Database operations for sales and sale items — the one part of the
//! system with multi-step consistency requirements.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                │
//! │                                                                     │
//! │  1. CREATE                                                          │
//! │     └── create() → draw number, insert sale + items,                │
//! │                    decrement stock per item          [one txn]      │
//! │                                                                     │
//! │  2. EDIT                                                            │
//! │     └── update() → restore stock for old items, replace             │
//! │                    items wholesale, decrement for new [one txn]     │
//! │                                                                     │
//! │  3. DELETE                                                          │
//! │     └── delete() → restore stock, remove items + sale [one txn]     │
//! │                                                                     │
//! │  Invariant: product quantity always equals originally stocked       │
//! │  quantity minus the sum of still-active sale item quantities.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Numbering
//! Bill and estimate numbers come from the `sale_counters` table,
//! incremented inside the creation transaction. Deleting a sale never
//! releases its number, so numbers are strictly increasing per type.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dukaan_core::validation::{final_amount_paise, normalize_customer_name};
use dukaan_core::{
    tz, NewSale, Sale, SaleFilter, SaleItem, SaleItemInput, SaleType, SaleUpdate, SaleWithItems,
};

const SALE_SELECT: &str = "
    SELECT
        id, sale_type, number, number_seq,
        customer_name, customer_mobile, payment_mode, remarks,
        total_amount_paise, total_discount_paise, final_amount_paise,
        sale_date, created_at, updated_at
    FROM sales
";

const ITEM_SELECT: &str = "
    SELECT id, sale_id, product_id, category_name,
           sale_price_paise, quantity, final_price_paise
    FROM sale_items
";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Creates a sale: draws the next number for its type, persists the
    /// sale and all item rows, and decrements each referenced product's
    /// stock — atomically.
    ///
    /// The caller validates the payload first; this method only checks
    /// referential facts (unknown product ids fail the transaction).
    /// There is deliberately no stock-availability check.
    pub async fn create(&self, input: &NewSale) -> DbResult<Sale> {
        let mut tx = self.pool.begin().await?;

        let seq = next_number_seq(&mut tx, input.sale_type).await?;
        let number = input.sale_type.format_number(seq);
        let now = Utc::now();

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            sale_type: input.sale_type,
            number: number.clone(),
            number_seq: seq,
            customer_name: normalize_customer_name(input.customer_name.as_deref()),
            customer_mobile: clean_optional(input.customer_mobile.as_deref()),
            payment_mode: input.payment_mode,
            remarks: clean_optional(input.remarks.as_deref()),
            total_amount_paise: input.total_amount_paise,
            total_discount_paise: input.total_discount_paise,
            final_amount_paise: final_amount_paise(
                input.total_amount_paise,
                input.total_discount_paise,
            ),
            sale_date: now,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %sale.id, number = %sale.number, "Inserting sale");

        sqlx::query(
            "INSERT INTO sales (
                id, sale_type, number, number_seq,
                customer_name, customer_mobile, payment_mode, remarks,
                total_amount_paise, total_discount_paise, final_amount_paise,
                sale_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .bind(&sale.id)
        .bind(sale.sale_type)
        .bind(&sale.number)
        .bind(sale.number_seq)
        .bind(&sale.customer_name)
        .bind(&sale.customer_mobile)
        .bind(sale.payment_mode)
        .bind(&sale.remarks)
        .bind(sale.total_amount_paise)
        .bind(sale.total_discount_paise)
        .bind(sale.final_amount_paise)
        .bind(sale.sale_date)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in &input.items {
            insert_item(&mut tx, &sale.id, item).await?;
            adjust_stock(&mut tx, &item.product_id, -item.quantity).await?;
        }

        tx.commit().await?;

        info!(
            id = %sale.id,
            number = %sale.number,
            items = input.items.len(),
            final_amount = %sale.final_amount(),
            "Sale created"
        );

        Ok(sale)
    }

    /// Edits a sale with a diff-free replace: restores stock for every
    /// existing item, deletes them, inserts the replacement list, and
    /// decrements stock for each new item — atomically.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - unknown sale id (terminal to the caller)
    pub async fn update(&self, id: &str, update: &SaleUpdate) -> DbResult<SaleWithItems> {
        let mut tx = self.pool.begin().await?;

        let sale = fetch_sale(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        // Add back everything the sale had deducted before touching
        // anything else, so stock never drifts.
        let old_items = fetch_items(&mut tx, id).await?;
        for item in &old_items {
            adjust_stock(&mut tx, &item.product_id, item.quantity).await?;
        }

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(update.items.len());
        for item in &update.items {
            items.push(insert_item(&mut tx, id, item).await?);
            adjust_stock(&mut tx, &item.product_id, -item.quantity).await?;
        }

        let now = Utc::now();
        let updated = Sale {
            customer_name: normalize_customer_name(update.customer_name.as_deref()),
            customer_mobile: clean_optional(update.customer_mobile.as_deref()),
            payment_mode: update.payment_mode,
            remarks: clean_optional(update.remarks.as_deref()),
            total_amount_paise: update.total_amount_paise,
            total_discount_paise: update.total_discount_paise,
            final_amount_paise: final_amount_paise(
                update.total_amount_paise,
                update.total_discount_paise,
            ),
            updated_at: now,
            ..sale
        };

        sqlx::query(
            "UPDATE sales SET
                customer_name = ?2,
                customer_mobile = ?3,
                payment_mode = ?4,
                remarks = ?5,
                total_amount_paise = ?6,
                total_discount_paise = ?7,
                final_amount_paise = ?8,
                updated_at = ?9
            WHERE id = ?1",
        )
        .bind(id)
        .bind(&updated.customer_name)
        .bind(&updated.customer_mobile)
        .bind(updated.payment_mode)
        .bind(&updated.remarks)
        .bind(updated.total_amount_paise)
        .bind(updated.total_discount_paise)
        .bind(updated.final_amount_paise)
        .bind(updated.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(id = %id, number = %updated.number, items = items.len(), "Sale updated");

        Ok(SaleWithItems {
            sale: updated,
            items,
        })
    }

    /// Deletes a sale and its items, restoring product stock for every
    /// removed item — atomically.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - unknown sale id
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let sale = fetch_sale(&mut tx, id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        let items = fetch_items(&mut tx, id).await?;
        for item in &items {
            adjust_stock(&mut tx, &item.product_id, item.quantity).await?;
        }

        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(id = %id, number = %sale.number, items = items.len(), "Sale deleted");

        Ok(())
    }

    /// Gets a sale header by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sql = format!("{} WHERE id = ?1", SALE_SELECT);
        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Gets a sale with its items (receipt payload).
    pub async fn get_with_items(&self, id: &str) -> DbResult<Option<SaleWithItems>> {
        let Some(sale) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let sql = format!("{} WHERE sale_id = ?1 ORDER BY rowid", ITEM_SELECT);
        let items = sqlx::query_as::<_, SaleItem>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(SaleWithItems { sale, items }))
    }

    /// Lists sales for the report, newest first.
    ///
    /// ## Filters
    /// - `date` - exact store-timezone day (wins over `from`/`to`)
    /// - `from` / `to` - inclusive store-timezone day range
    /// - `sale_type` - bills or estimates only
    /// - `search` - substring over customer name OR mobile; a search
    ///   term bypasses any active date filter and matches the full set
    pub async fn list(&self, filter: &SaleFilter) -> DbResult<Vec<Sale>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SALE_SELECT);
        qb.push(" WHERE 1=1 ");

        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (customer_name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR customer_mobile LIKE ")
                .push_bind(pattern)
                .push(") ");
        } else if let Some(date) = filter.date {
            let (start, end) = tz::day_bounds_utc(date);
            qb.push(" AND sale_date >= ").push_bind(start);
            qb.push(" AND sale_date < ").push_bind(end);
        } else {
            if let Some(from) = filter.from {
                let (start, _) = tz::day_bounds_utc(from);
                qb.push(" AND sale_date >= ").push_bind(start);
            }
            if let Some(to) = filter.to {
                let (_, end) = tz::day_bounds_utc(to);
                qb.push(" AND sale_date < ").push_bind(end);
            }
        }

        if let Some(sale_type) = filter.sale_type {
            qb.push(" AND sale_type = ").push_bind(sale_type);
        }

        qb.push(" ORDER BY sale_date DESC ");

        let sales = qb.build_query_as::<Sale>().fetch_all(&self.pool).await?;

        debug!(count = sales.len(), "Listed sales");
        Ok(sales)
    }
}

// =============================================================================
// Transaction Helpers
// =============================================================================

/// Draws the next sale number for a type from `sale_counters`.
///
/// Runs inside the creation transaction, so a rolled-back sale does not
/// advance the counter, and a committed one can never share a number.
async fn next_number_seq(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    sale_type: SaleType,
) -> DbResult<i64> {
    let seq: Option<i64> = sqlx::query_scalar(
        "UPDATE sale_counters SET next_seq = next_seq + 1
         WHERE sale_type = ?1
         RETURNING next_seq",
    )
    .bind(sale_type)
    .fetch_optional(&mut **tx)
    .await?;

    seq.ok_or_else(|| {
        DbError::Internal(format!("sale counter missing for {}", sale_type.as_str()))
    })
}

/// Inserts one line item, snapshotting the product's current category name.
///
/// ## Returns
/// * `Err(DbError::NotFound)` - unknown product id
async fn insert_item(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    sale_id: &str,
    item: &SaleItemInput,
) -> DbResult<SaleItem> {
    let category_name: Option<String> = sqlx::query_scalar(
        "SELECT c.name
         FROM products p
         INNER JOIN categories c ON c.id = p.category_id
         WHERE p.id = ?1",
    )
    .bind(&item.product_id)
    .fetch_optional(&mut **tx)
    .await?;

    let category_name =
        category_name.ok_or_else(|| DbError::not_found("Product", &item.product_id))?;

    let row = SaleItem {
        id: Uuid::new_v4().to_string(),
        sale_id: sale_id.to_string(),
        product_id: item.product_id.clone(),
        category_name,
        sale_price_paise: item.sale_price_paise,
        quantity: item.quantity,
        final_price_paise: item.final_price_paise,
    };

    sqlx::query(
        "INSERT INTO sale_items (
            id, sale_id, product_id, category_name,
            sale_price_paise, quantity, final_price_paise
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&row.id)
    .bind(&row.sale_id)
    .bind(&row.product_id)
    .bind(&row.category_name)
    .bind(row.sale_price_paise)
    .bind(row.quantity)
    .bind(row.final_price_paise)
    .execute(&mut **tx)
    .await?;

    Ok(row)
}

/// Applies a stock delta (negative for sales, positive for restoration).
async fn adjust_stock(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    product_id: &str,
    delta: i64,
) -> DbResult<()> {
    let now = Utc::now();

    let result = sqlx::query(
        "UPDATE products SET quantity = quantity + ?2, updated_at = ?3 WHERE id = ?1",
    )
    .bind(product_id)
    .bind(delta)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Product", product_id));
    }

    Ok(())
}

async fn fetch_sale(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    id: &str,
) -> DbResult<Option<Sale>> {
    let sql = format!("{} WHERE id = ?1", SALE_SELECT);
    let sale = sqlx::query_as::<_, Sale>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(sale)
}

async fn fetch_items(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    sale_id: &str,
) -> DbResult<Vec<SaleItem>> {
    let sql = format!("{} WHERE sale_id = ?1 ORDER BY rowid", ITEM_SELECT);
    let items = sqlx::query_as::<_, SaleItem>(&sql)
        .bind(sale_id)
        .fetch_all(&mut **tx)
        .await?;

    Ok(items)
}

/// Trims an optional field; blank becomes None.
fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;
    use dukaan_core::{NewProduct, PaymentMode};

    struct Fixture {
        db: Database,
        p1: String,
        p2: String,
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db.categories().insert("Grocery").await.unwrap();
        let manufacturer = db.manufacturers().insert("Amul").await.unwrap();

        let mut ids = Vec::new();
        for barcode in ["55012345", "55012346"] {
            let product = db
                .products()
                .insert(&NewProduct {
                    barcode: barcode.to_string(),
                    category_id: category.id.clone(),
                    manufacturer_id: manufacturer.id.clone(),
                    quantity: 10,
                    cost_price_paise: 800,
                    sale_price_paise: 1000,
                })
                .await
                .unwrap();
            ids.push(product.id);
        }

        let p2 = ids.pop().unwrap();
        let p1 = ids.pop().unwrap();
        Fixture { db, p1, p2 }
    }

    fn item(product_id: &str, qty: i64) -> SaleItemInput {
        SaleItemInput {
            product_id: product_id.to_string(),
            quantity: qty,
            sale_price_paise: 1000,
            final_price_paise: 1000 * qty,
        }
    }

    fn new_sale(sale_type: SaleType, items: Vec<SaleItemInput>) -> NewSale {
        let total: i64 = items.iter().map(|i| i.final_price_paise).sum();
        NewSale {
            sale_type,
            customer_name: None,
            customer_mobile: None,
            payment_mode: Some(PaymentMode::Cash),
            remarks: None,
            total_amount_paise: total,
            total_discount_paise: 0,
            items,
        }
    }

    async fn stock(db: &Database, product_id: &str) -> i64 {
        db.products()
            .get_by_id(product_id)
            .await
            .unwrap()
            .unwrap()
            .quantity
    }

    #[tokio::test]
    async fn test_create_decrements_stock_per_item() {
        let f = fixture().await;

        let sale = f
            .db
            .sales()
            .create(&new_sale(
                SaleType::Bill,
                vec![item(&f.p1, 3), item(&f.p2, 2)],
            ))
            .await
            .unwrap();

        assert_eq!(sale.number, "BILL-0001");
        assert_eq!(sale.customer_name, "Walk In Customer");
        assert_eq!(stock(&f.db, &f.p1).await, 7);
        assert_eq!(stock(&f.db, &f.p2).await, 8);
    }

    #[tokio::test]
    async fn test_final_amount_recomputed_from_discount() {
        let f = fixture().await;

        let mut input = new_sale(SaleType::Bill, vec![item(&f.p1, 5)]);
        input.total_discount_paise = 500;

        let sale = f.db.sales().create(&input).await.unwrap();
        assert_eq!(sale.total_amount_paise, 5000);
        assert_eq!(sale.final_amount_paise, 4500);
        assert_eq!(
            sale.final_amount_paise,
            sale.total_amount_paise - sale.total_discount_paise
        );
    }

    #[tokio::test]
    async fn test_numbers_increase_per_type_and_are_never_reused() {
        let f = fixture().await;
        let sales = f.db.sales();

        let b1 = sales
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();
        let e1 = sales
            .create(&new_sale(SaleType::Estimate, vec![item(&f.p1, 1)]))
            .await
            .unwrap();
        let b2 = sales
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();

        assert_eq!(b1.number, "BILL-0001");
        assert_eq!(e1.number, "EST-0001");
        assert_eq!(b2.number, "BILL-0002");

        // Deleting the latest bill must not release its number
        sales.delete(&b2.id).await.unwrap();
        let b3 = sales
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();
        assert_eq!(b3.number, "BILL-0003");
    }

    #[tokio::test]
    async fn test_edit_restores_before_applying() {
        let f = fixture().await;
        let sales = f.db.sales();

        let sale = sales
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 3)]))
            .await
            .unwrap();
        assert_eq!(stock(&f.db, &f.p1).await, 7);

        // Replace: p1 ×3 → p1 ×1 + p2 ×2
        let updated = sales
            .update(
                &sale.id,
                &SaleUpdate {
                    customer_name: Some("Asha".to_string()),
                    customer_mobile: None,
                    payment_mode: Some(PaymentMode::Upi),
                    remarks: None,
                    total_amount_paise: 3000,
                    total_discount_paise: 0,
                    items: vec![item(&f.p1, 1), item(&f.p2, 2)],
                },
            )
            .await
            .unwrap();

        assert_eq!(stock(&f.db, &f.p1).await, 9);
        assert_eq!(stock(&f.db, &f.p2).await, 8);
        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.sale.customer_name, "Asha");
        // Type and number never change on edit
        assert_eq!(updated.sale.number, sale.number);
        assert_eq!(updated.sale.sale_type, SaleType::Bill);
    }

    #[tokio::test]
    async fn test_edit_unknown_sale_is_not_found() {
        let f = fixture().await;

        let err = f
            .db
            .sales()
            .update(
                "no-such-sale",
                &SaleUpdate {
                    customer_name: None,
                    customer_mobile: None,
                    payment_mode: None,
                    remarks: None,
                    total_amount_paise: 0,
                    total_discount_paise: 0,
                    items: vec![item(&f.p1, 1)],
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_with_unknown_product_rolls_back() {
        let f = fixture().await;

        let err = f
            .db
            .sales()
            .create(&new_sale(
                SaleType::Bill,
                vec![item(&f.p1, 2), item("no-such-product", 1)],
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // The whole transaction rolled back: no sale, no stock change,
        // and the counter was not advanced
        assert_eq!(stock(&f.db, &f.p1).await, 10);
        assert!(f
            .db
            .sales()
            .list(&SaleFilter::default())
            .await
            .unwrap()
            .is_empty());
        let next = f
            .db
            .sales()
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();
        assert_eq!(next.number, "BILL-0001");
    }

    #[tokio::test]
    async fn test_delete_restores_all_stock() {
        let f = fixture().await;
        let sales = f.db.sales();

        let sale = sales
            .create(&new_sale(
                SaleType::Estimate,
                vec![item(&f.p1, 4), item(&f.p2, 6)],
            ))
            .await
            .unwrap();
        assert_eq!(stock(&f.db, &f.p1).await, 6);
        assert_eq!(stock(&f.db, &f.p2).await, 4);

        sales.delete(&sale.id).await.unwrap();

        assert_eq!(stock(&f.db, &f.p1).await, 10);
        assert_eq!(stock(&f.db, &f.p2).await, 10);
        assert!(sales.get_with_items(&sale.id).await.unwrap().is_none());

        let err = sales.delete(&sale.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_with_items_snapshots_category() {
        let f = fixture().await;

        let sale = f
            .db
            .sales()
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();

        let full = f
            .db
            .sales()
            .get_with_items(&sale.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(full.items.len(), 1);
        assert_eq!(full.items[0].category_name, "Grocery");
        assert_eq!(full.items[0].final_price_paise, 1000);
    }

    async fn backdate(db: &Database, sale_id: &str, instant: chrono::DateTime<Utc>) {
        sqlx::query("UPDATE sales SET sale_date = ?1 WHERE id = ?2")
            .bind(instant)
            .bind(sale_id)
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_filter_by_exact_date_and_search() {
        let f = fixture().await;
        let sales = f.db.sales();

        let mut input = new_sale(SaleType::Bill, vec![item(&f.p1, 1)]);
        input.customer_name = Some("Asha Traders".to_string());
        input.customer_mobile = Some("9876543210".to_string());
        let recent = sales.create(&input).await.unwrap();

        let old = sales
            .create(&new_sale(SaleType::Estimate, vec![item(&f.p2, 1)]))
            .await
            .unwrap();

        // Move the estimate to a known earlier local day
        let earlier = Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).single().unwrap();
        backdate(&f.db, &old.id, earlier).await;

        // Exact-date filter returns only sales on that store-local day
        let on_day = sales
            .list(&SaleFilter {
                date: Some(tz::local_date(earlier)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].id, old.id);

        // Type filter
        let bills = sales
            .list(&SaleFilter {
                sale_type: Some(SaleType::Bill),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].id, recent.id);

        // Search hits name or mobile
        for needle in ["Asha", "98765"] {
            let found = sales
                .list(&SaleFilter {
                    search: Some(needle.to_string()),
                    ..Default::default()
                })
                .await
                .unwrap();
            assert_eq!(found.len(), 1, "search {:?}", needle);
            assert_eq!(found[0].id, recent.id);
        }

        // A search term bypasses the date filter: the match comes back
        // even though it is not on the filtered day
        let found = sales
            .list(&SaleFilter {
                date: Some(tz::local_date(earlier)),
                search: Some("Asha".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, recent.id);
    }

    #[tokio::test]
    async fn test_filter_by_date_range() {
        let f = fixture().await;
        let sales = f.db.sales();

        let s1 = sales
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();
        let s2 = sales
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();
        let s3 = sales
            .create(&new_sale(SaleType::Bill, vec![item(&f.p1, 1)]))
            .await
            .unwrap();

        let day1 = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).single().unwrap();
        let day5 = Utc.with_ymd_and_hms(2024, 6, 5, 10, 0, 0).single().unwrap();
        let day9 = Utc.with_ymd_and_hms(2024, 6, 9, 10, 0, 0).single().unwrap();
        backdate(&f.db, &s1.id, day1).await;
        backdate(&f.db, &s2.id, day5).await;
        backdate(&f.db, &s3.id, day9).await;

        let in_range = sales
            .list(&SaleFilter {
                from: Some(tz::local_date(day1)),
                to: Some(tz::local_date(day5)),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<&str> = in_range.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec![s2.id.as_str(), s1.id.as_str()]);
    }
}
