//! # Lookup Repositories
//!
//! Categories and manufacturers are simple named lookup entities, unique by
//! name, created ad hoc from the UI or during spreadsheet import. The two
//! repositories are the same shape, so they share this file.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dukaan_core::{Category, Manufacturer};

/// Repository for category operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories, name ascending.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(&self, name: &str) -> DbResult<Category> {
        let name = name.trim();
        debug!(name = %name, "Inserting category");

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO categories (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(category.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate("category", name),
                other => other,
            })?;

        Ok(category)
    }

    /// Gets a category by name, creating it if missing (import path).
    pub async fn get_or_create(&self, name: &str) -> DbResult<Category> {
        let name = name.trim();

        // INSERT OR IGNORE then SELECT keeps this race-free within the
        // single-writer database
        sqlx::query("INSERT OR IGNORE INTO categories (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(Uuid::new_v4().to_string())
            .bind(name)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE name = ?1",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }
}

/// Repository for manufacturer operations.
#[derive(Debug, Clone)]
pub struct ManufacturerRepository {
    pool: SqlitePool,
}

impl ManufacturerRepository {
    /// Creates a new ManufacturerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ManufacturerRepository { pool }
    }

    /// Lists all manufacturers, name ascending.
    pub async fn list(&self) -> DbResult<Vec<Manufacturer>> {
        let manufacturers = sqlx::query_as::<_, Manufacturer>(
            "SELECT id, name, created_at FROM manufacturers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(manufacturers)
    }

    /// Gets a manufacturer by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Manufacturer>> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "SELECT id, name, created_at FROM manufacturers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(manufacturer)
    }

    /// Inserts a new manufacturer.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - name already exists
    pub async fn insert(&self, name: &str) -> DbResult<Manufacturer> {
        let name = name.trim();
        debug!(name = %name, "Inserting manufacturer");

        let manufacturer = Manufacturer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO manufacturers (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&manufacturer.id)
            .bind(&manufacturer.name)
            .bind(manufacturer.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate("manufacturer", name),
                other => other,
            })?;

        Ok(manufacturer)
    }

    /// Gets a manufacturer by name, creating it if missing (import path).
    pub async fn get_or_create(&self, name: &str) -> DbResult<Manufacturer> {
        let name = name.trim();

        sqlx::query(
            "INSERT OR IGNORE INTO manufacturers (id, name, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "SELECT id, name, created_at FROM manufacturers WHERE name = ?1",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(manufacturer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
