//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Filtered listing joined with lookup names (report + export)
//! - By-barcode lookup (the billing screen scans/types barcodes)
//! - Upsert by barcode (spreadsheet import)
//! - Absolute stock correction (restock screen)
//!
//! Stock *deltas* from the sale lifecycle are applied inside the sale
//! repository's transactions, not here.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dukaan_core::{NewProduct, Product, ProductDetail, ProductFilter};

const DETAIL_SELECT: &str = "
    SELECT
        p.id,
        p.barcode,
        p.category_id,
        c.name AS category_name,
        p.manufacturer_id,
        m.name AS manufacturer_name,
        p.quantity,
        p.cost_price_paise,
        p.sale_price_paise,
        p.created_at,
        p.updated_at
    FROM products p
    INNER JOIN categories c ON c.id = p.category_id
    INNER JOIN manufacturers m ON m.id = p.manufacturer_id
";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products joined with their lookup names, newest first.
    ///
    /// ## Filters
    /// - `q` - substring match on barcode
    /// - `category_id` / `manufacturer_id` - exact match
    pub async fn list(&self, filter: &ProductFilter) -> DbResult<Vec<ProductDetail>> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(DETAIL_SELECT);
        qb.push(" WHERE 1=1 ");

        if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            qb.push(" AND p.barcode LIKE ").push_bind(format!("%{}%", q));
        }
        if let Some(category_id) = &filter.category_id {
            qb.push(" AND p.category_id = ").push_bind(category_id);
        }
        if let Some(manufacturer_id) = &filter.manufacturer_id {
            qb.push(" AND p.manufacturer_id = ").push_bind(manufacturer_id);
        }

        qb.push(" ORDER BY p.created_at DESC ");

        let products = qb
            .build_query_as::<ProductDetail>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its barcode, with lookup names.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductDetail))` - product found
    /// * `Ok(None)` - unknown barcode
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<ProductDetail>> {
        let sql = format!("{} WHERE p.barcode = ?1", DETAIL_SELECT);
        let product = sqlx::query_as::<_, ProductDetail>(&sql)
            .bind(barcode.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product row by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, barcode, category_id, manufacturer_id, quantity,
                    cost_price_paise, sale_price_paise, created_at, updated_at
             FROM products
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - barcode already exists
    /// * `Err(DbError::ForeignKeyViolation)` - unknown category/manufacturer
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        debug!(barcode = %new.barcode, "Inserting product");

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            barcode: new.barcode.trim().to_string(),
            category_id: new.category_id.clone(),
            manufacturer_id: new.manufacturer_id.clone(),
            quantity: new.quantity,
            cost_price_paise: new.cost_price_paise,
            sale_price_paise: new.sale_price_paise,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO products (
                id, barcode, category_id, manufacturer_id, quantity,
                cost_price_paise, sale_price_paise, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&product.id)
        .bind(&product.barcode)
        .bind(&product.category_id)
        .bind(&product.manufacturer_id)
        .bind(product.quantity)
        .bind(product.cost_price_paise)
        .bind(product.sale_price_paise)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("barcode", &product.barcode),
            other => other,
        })?;

        Ok(product)
    }

    /// Inserts or overwrites a product by barcode (import path).
    ///
    /// An existing barcode gets its lookups, prices, and quantity replaced:
    /// the imported sheet is the stock-take source of truth.
    pub async fn upsert_by_barcode(&self, new: &NewProduct) -> DbResult<()> {
        debug!(barcode = %new.barcode, "Upserting product");

        let now = Utc::now();

        sqlx::query(
            "INSERT INTO products (
                id, barcode, category_id, manufacturer_id, quantity,
                cost_price_paise, sale_price_paise, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            ON CONFLICT (barcode) DO UPDATE SET
                category_id = excluded.category_id,
                manufacturer_id = excluded.manufacturer_id,
                quantity = excluded.quantity,
                cost_price_paise = excluded.cost_price_paise,
                sale_price_paise = excluded.sale_price_paise,
                updated_at = excluded.updated_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(new.barcode.trim())
        .bind(&new.category_id)
        .bind(&new.manufacturer_id)
        .bind(new.quantity)
        .bind(new.cost_price_paise)
        .bind(new.sale_price_paise)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Sets a product's stock level to an absolute value (restock screen).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - unknown barcode
    pub async fn set_quantity(&self, barcode: &str, quantity: i64) -> DbResult<()> {
        debug!(barcode = %barcode, quantity = %quantity, "Setting stock level");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET quantity = ?2, updated_at = ?3 WHERE barcode = ?1",
        )
        .bind(barcode.trim())
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", barcode));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn seeded_db() -> (Database, String, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db.categories().insert("Grocery").await.unwrap();
        let manufacturer = db.manufacturers().insert("Amul").await.unwrap();
        (db, category.id, manufacturer.id)
    }

    fn new_product(barcode: &str, category_id: &str, manufacturer_id: &str) -> NewProduct {
        NewProduct {
            barcode: barcode.to_string(),
            category_id: category_id.to_string(),
            manufacturer_id: manufacturer_id.to_string(),
            quantity: 10,
            cost_price_paise: 800,
            sale_price_paise: 1000,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_by_barcode() {
        let (db, cat, man) = seeded_db().await;

        db.products()
            .insert(&new_product("55012345", &cat, &man))
            .await
            .unwrap();

        let found = db.products().get_by_barcode("55012345").await.unwrap();
        let found = found.expect("product should exist");
        assert_eq!(found.category_name, "Grocery");
        assert_eq!(found.manufacturer_name, "Amul");
        assert_eq!(found.quantity, 10);

        assert!(db
            .products()
            .get_by_barcode("99999999")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_barcode_rejected() {
        let (db, cat, man) = seeded_db().await;

        db.products()
            .insert(&new_product("55012345", &cat, &man))
            .await
            .unwrap();
        let err = db
            .products()
            .insert(&new_product("55012345", &cat, &man))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing() {
        let (db, cat, man) = seeded_db().await;

        db.products()
            .insert(&new_product("55012345", &cat, &man))
            .await
            .unwrap();

        let mut updated = new_product("55012345", &cat, &man);
        updated.quantity = 42;
        updated.sale_price_paise = 1200;
        db.products().upsert_by_barcode(&updated).await.unwrap();

        let found = db
            .products()
            .get_by_barcode("55012345")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.quantity, 42);
        assert_eq!(found.sale_price_paise, 1200);
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_set_quantity() {
        let (db, cat, man) = seeded_db().await;

        db.products()
            .insert(&new_product("55012345", &cat, &man))
            .await
            .unwrap();

        db.products().set_quantity("55012345", 99).await.unwrap();
        let found = db
            .products()
            .get_by_barcode("55012345")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.quantity, 99);

        let err = db.products().set_quantity("00000000", 5).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (db, cat, man) = seeded_db().await;
        let other_cat = db.categories().insert("Beverages").await.unwrap();

        db.products()
            .insert(&new_product("55012345", &cat, &man))
            .await
            .unwrap();
        db.products()
            .insert(&new_product("66012345", &other_cat.id, &man))
            .await
            .unwrap();

        let all = db.products().list(&ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let by_barcode = db
            .products()
            .list(&ProductFilter {
                q: Some("550".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_barcode.len(), 1);
        assert_eq!(by_barcode[0].barcode, "55012345");

        let by_category = db
            .products()
            .list(&ProductFilter {
                category_id: Some(other_cat.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].category_name, "Beverages");
    }
}
