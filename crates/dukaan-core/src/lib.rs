//! # dukaan-core: Pure Business Logic for Dukaan POS
//!
//! This crate is the **heart** of Dukaan POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Dukaan POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                  Browser (billing / report pages)             │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │ HTTP + JSON                       │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                  dukaan-server (axum handlers)                │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                  │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │               ★ dukaan-core (THIS CRATE) ★                    │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐      │ │
//! │  │   │  types  │  │  money  │  │   tz    │  │ validation │      │ │
//! │  │   │ Product │  │  Money  │  │  IST    │  │   rules    │      │ │
//! │  │   │  Sale   │  │  paise  │  │ bounds  │  │   checks   │      │ │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘      │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                  │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                  dukaan-db (SQLite layer)                     │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleItem, lookups)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`tz`] - Fixed store timezone helpers (Asia/Kolkata)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod tz;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer name recorded when the billing screen leaves the field blank.
pub const WALK_IN_CUSTOMER: &str = "Walk In Customer";

/// Barcodes are exactly this many ASCII digits.
pub const BARCODE_LEN: usize = 8;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-entry (e.g. typing 10000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 9999;

/// Maximum line items in a single sale.
pub const MAX_SALE_ITEMS: usize = 200;
