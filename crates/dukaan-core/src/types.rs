//! # Domain Types
//!
//! Core domain types used throughout Dukaan POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │   Product     │   │     Sale      │   │   SaleItem    │         │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │         │
//! │  │ id (UUID)     │   │ id (UUID)     │   │ id (UUID)     │         │
//! │  │ barcode (biz) │   │ number (biz)  │   │ sale_id (FK)  │         │
//! │  │ quantity      │   │ totals        │   │ category_name │         │
//! │  │ prices        │   │ sale_date     │   │ line total    │         │
//! │  └───────────────┘   └───────────────┘   └───────────────┘         │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐         │
//! │  │  Category     │   │ Manufacturer  │   │   SaleType    │         │
//! │  │  name lookup  │   │  name lookup  │   │ Bill/Estimate │         │
//! │  └───────────────┘   └───────────────┘   └───────────────┘         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Entities have:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (barcode, sale number) - human-readable, shown on screens

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Sale Type
// =============================================================================

/// Whether a sale is a finalized bill or a quotation.
///
/// Both kinds deduct inventory; an estimate ("Estimate/Challan") simply
/// prints without GST framing and carries an `EST-` number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum SaleType {
    /// Finalized sale with a GST-style receipt.
    Bill,
    /// Quotation record that still deducts inventory.
    Estimate,
}

impl SaleType {
    /// Prefix used in generated sale numbers.
    pub const fn number_prefix(&self) -> &'static str {
        match self {
            SaleType::Bill => "BILL",
            SaleType::Estimate => "EST",
        }
    }

    /// Formats a counter value as a human-readable number, e.g. `BILL-0042`.
    pub fn format_number(&self, seq: i64) -> String {
        format!("{}-{:04}", self.number_prefix(), seq)
    }

    /// Lowercase database/API value.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleType::Bill => "bill",
            SaleType::Estimate => "estimate",
        }
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// How the customer paid. Optional on a sale (estimates usually omit it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Upi,
}

// =============================================================================
// Lookup Entities
// =============================================================================

/// A product category, unique by name. Created ad hoc from the UI or import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A product manufacturer, unique by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Manufacturer {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product, identified on screens by its 8-digit barcode.
///
/// Quantity is mutated only through sale creation/edit/deletion, the
/// restock correction endpoint, and spreadsheet import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// 8-digit barcode - business identifier, unique.
    pub barcode: String,

    /// Owning category.
    pub category_id: String,

    /// Owning manufacturer.
    pub manufacturer_id: String,

    /// Units in stock. May go negative: the server never blocks a sale
    /// on stock, the billing screen warns client-side only.
    pub quantity: i64,

    /// Purchase cost per unit, in paise.
    pub cost_price_paise: i64,

    /// Selling price per unit, in paise.
    pub sale_price_paise: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as Money.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_paise(self.sale_price_paise)
    }

    /// Returns the cost price as Money.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_paise(self.cost_price_paise)
    }
}

/// A product joined with its lookup names, as listed and exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductDetail {
    pub id: String,
    pub barcode: String,
    pub category_id: String,
    pub category_name: String,
    pub manufacturer_id: String,
    pub manufacturer_name: String,
    pub quantity: i64,
    pub cost_price_paise: i64,
    pub sale_price_paise: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for product creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub barcode: String,
    pub category_id: String,
    pub manufacturer_id: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub cost_price_paise: i64,
    #[serde(default)]
    pub sale_price_paise: i64,
}

/// Optional filters for product listing and export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Substring match on barcode.
    pub q: Option<String>,
    pub category_id: Option<String>,
    pub manufacturer_id: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A bill or estimate header.
///
/// `number` is the human-readable business identifier (`BILL-0001`,
/// `EST-0001`); `number_seq` is the integer it was drawn from. Numbers are
/// strictly increasing per type and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub sale_type: SaleType,
    pub number: String,
    pub number_seq: i64,
    pub customer_name: String,
    pub customer_mobile: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    pub remarks: Option<String>,
    /// Pre-discount total, in paise.
    pub total_amount_paise: i64,
    /// Whole-bill discount, in paise.
    pub total_discount_paise: i64,
    /// Post-discount total. Always `total_amount - total_discount`.
    pub final_amount_paise: i64,
    /// Instant of sale (UTC). Shown and date-filtered in the store timezone.
    pub sale_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the post-discount total as Money.
    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_paise(self.final_amount_paise)
    }
}

/// A line item in a sale.
///
/// The category name and the unit price are frozen at time of sale, so
/// receipts stay stable when the catalog changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Category name at time of sale (frozen).
    pub category_name: String,
    /// Unit sale price in paise at time of sale (frozen).
    pub sale_price_paise: i64,
    /// Units sold.
    pub quantity: i64,
    /// Line total in paise (unit price × quantity, after any line discount).
    pub final_price_paise: i64,
}

/// A sale header together with its line items (receipt payload).
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Sale Inputs
// =============================================================================

/// One submitted line item: product reference plus the billing screen's
/// computed unit price and line total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemInput {
    pub product_id: String,
    pub quantity: i64,
    pub sale_price_paise: i64,
    pub final_price_paise: i64,
}

/// Payload for sale creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub sale_type: SaleType,
    /// Blank/omitted becomes [`crate::WALK_IN_CUSTOMER`].
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    pub remarks: Option<String>,
    pub total_amount_paise: i64,
    pub total_discount_paise: i64,
    pub items: Vec<SaleItemInput>,
}

/// Payload for sale edit: a diff-free replacement of items and totals.
/// The sale's type and number never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub payment_mode: Option<PaymentMode>,
    pub remarks: Option<String>,
    pub total_amount_paise: i64,
    pub total_discount_paise: i64,
    pub items: Vec<SaleItemInput>,
}

/// Filters for the sales report and export.
///
/// `date` wins over `from`/`to` when both are supplied. A non-empty
/// `search` bypasses the date filters entirely and matches the full set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleFilter {
    /// Exact store-timezone day.
    pub date: Option<NaiveDate>,
    /// Inclusive store-timezone day range start.
    pub from: Option<NaiveDate>,
    /// Inclusive store-timezone day range end.
    pub to: Option<NaiveDate>,
    pub sale_type: Option<SaleType>,
    /// Substring over customer name or mobile number.
    pub search: Option<String>,
}

impl SaleFilter {
    /// True when no filter is active (plain newest-first report).
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.sale_type.is_none()
            && self.search.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(SaleType::Bill.format_number(1), "BILL-0001");
        assert_eq!(SaleType::Estimate.format_number(42), "EST-0042");
        // Counter keeps going past four digits rather than wrapping
        assert_eq!(SaleType::Bill.format_number(12345), "BILL-12345");
    }

    #[test]
    fn test_sale_type_serde() {
        assert_eq!(serde_json::to_string(&SaleType::Bill).unwrap(), "\"bill\"");
        let parsed: SaleType = serde_json::from_str("\"estimate\"").unwrap();
        assert_eq!(parsed, SaleType::Estimate);
    }

    #[test]
    fn test_payment_mode_serde() {
        assert_eq!(serde_json::to_string(&PaymentMode::Upi).unwrap(), "\"upi\"");
        let parsed: PaymentMode = serde_json::from_str("\"cash\"").unwrap();
        assert_eq!(parsed, PaymentMode::Cash);
    }

    #[test]
    fn test_empty_filter() {
        assert!(SaleFilter::default().is_empty());

        let filter = SaleFilter {
            search: Some("98".to_string()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
