//! # dukaan-db: Database Layer for Dukaan POS
//!
//! This crate provides database access for the Dukaan POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Dukaan POS Data Flow                          │
//! │                                                                     │
//! │  HTTP handler (create_sale)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    dukaan-db (THIS CRATE)                     │  │
//! │  │                                                               │  │
//! │  │   ┌─────────────┐   ┌────────────────┐   ┌──────────────┐    │  │
//! │  │   │  Database   │   │  Repositories  │   │  Migrations  │    │  │
//! │  │   │  (pool.rs)  │   │  (sale.rs,     │   │  (embedded)  │    │  │
//! │  │   │             │◄──│   product.rs,  │   │ 001_init.sql │    │  │
//! │  │   │ SqlitePool  │   │   lookup.rs)   │   │              │    │  │
//! │  │   └─────────────┘   └────────────────┘   └──────────────┘    │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (./dukaan.db, WAL mode)                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sale, product, lookups)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dukaan_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/dukaan.db");
//! let db = Database::new(config).await?;
//!
//! let products = db.products().list(&Default::default()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::lookup::{CategoryRepository, ManufacturerRepository};
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
