//! # Repository Module
//!
//! Database repository implementations for Dukaan POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                       │
//! │       │  db.sales().create(&new_sale)                               │
//! │       ▼                                                             │
//! │  SaleRepository                                                     │
//! │  ├── create(&self, sale)      ← one transaction per lifecycle op    │
//! │  ├── update(&self, id, edit)                                        │
//! │  ├── delete(&self, id)                                              │
//! │  └── list(&self, filter)                                            │
//! │       │  SQL                                                        │
//! │       ▼                                                             │
//! │  SQLite database                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`lookup::CategoryRepository`] / [`lookup::ManufacturerRepository`] -
//!   named lookup entities
//! - [`product::ProductRepository`] - catalog CRUD and stock corrections
//! - [`sale::SaleRepository`] - the sale lifecycle (create/edit/delete with
//!   inventory reconciliation) and the filtered report

pub mod lookup;
pub mod product;
pub mod sale;
