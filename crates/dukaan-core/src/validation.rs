//! # Validation Module
//!
//! Input validation for Dukaan POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Browser forms                                             │
//! │  ├── Basic format checks, stock warnings (advisory only)            │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: HTTP handler (Rust)                                       │
//! │  ├── Type validation (deserialization)                              │
//! │  └── THIS MODULE: business rule validation                          │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL / UNIQUE / foreign key constraints                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, ValidationError};
use crate::types::{NewSale, SaleItemInput, SaleUpdate};
use crate::{BARCODE_LEN, MAX_ITEM_QUANTITY, MAX_SALE_ITEMS, WALK_IN_CUSTOMER};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product barcode.
///
/// ## Rules
/// - Must not be empty
/// - Exactly 8 ASCII digits
///
/// ## Example
/// ```rust
/// use dukaan_core::validation::validate_barcode;
///
/// assert!(validate_barcode("55012345").is_ok());
/// assert!(validate_barcode("").is_err());
/// assert!(validate_barcode("5501234").is_err());
/// assert!(validate_barcode("55O12345").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() != BARCODE_LEN || !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: format!("must be exactly {} digits", BARCODE_LEN),
        });
    }

    Ok(())
}

/// Validates a lookup (category/manufacturer) name.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 100 characters
pub fn validate_lookup_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a customer mobile number.
///
/// ## Rules
/// - Digits only (after stripping spaces and a leading `+`)
/// - 6 to 15 digits
pub fn validate_mobile(mobile: &str) -> ValidationResult<()> {
    let digits: String = mobile
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_mobile".to_string(),
        });
    }

    if digits.len() < 6 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "customer_mobile".to_string(),
            reason: "must be 6-15 digits".to_string(),
        });
    }

    Ok(())
}

/// Normalizes an optional customer name: blank or missing becomes
/// [`WALK_IN_CUSTOMER`].
pub fn normalize_customer_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => WALK_IN_CUSTOMER.to_string(),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an absolute stock level (restock correction).
///
/// Zero is allowed; only the sale flows may push stock negative.
pub fn validate_stock_level(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_price_paise(field: &str, paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Sale Payload Validators
// =============================================================================

/// Computes the post-discount amount the server stores.
///
/// The billing screen submits its own final amount, but the stored value is
/// always recomputed so `final = total - discount` holds for every
/// accepted sale.
#[inline]
pub const fn final_amount_paise(total_amount_paise: i64, total_discount_paise: i64) -> i64 {
    total_amount_paise - total_discount_paise
}

/// Validates a sale creation payload.
pub fn validate_new_sale(sale: &NewSale) -> Result<(), CoreError> {
    validate_sale_common(
        sale.customer_mobile.as_deref(),
        sale.total_amount_paise,
        sale.total_discount_paise,
        &sale.items,
    )
}

/// Validates a sale edit payload.
pub fn validate_sale_update(update: &SaleUpdate) -> Result<(), CoreError> {
    validate_sale_common(
        update.customer_mobile.as_deref(),
        update.total_amount_paise,
        update.total_discount_paise,
        &update.items,
    )
}

fn validate_sale_common(
    mobile: Option<&str>,
    total_amount_paise: i64,
    total_discount_paise: i64,
    items: &[SaleItemInput],
) -> Result<(), CoreError> {
    if items.is_empty() {
        return Err(CoreError::EmptySale);
    }

    if items.len() > MAX_SALE_ITEMS {
        return Err(CoreError::SaleTooLarge {
            max: MAX_SALE_ITEMS,
        });
    }

    if let Some(mobile) = mobile {
        if !mobile.trim().is_empty() {
            validate_mobile(mobile)?;
        }
    }

    validate_price_paise("total_amount", total_amount_paise)?;
    validate_price_paise("total_discount", total_discount_paise)?;

    for item in items {
        if item.product_id.trim().is_empty() {
            return Err(CoreError::Validation(ValidationError::Required {
                field: "product_id".to_string(),
            }));
        }
        validate_quantity(item.quantity)?;
        validate_price_paise("sale_price", item.sale_price_paise)?;
        validate_price_paise("final_price", item.final_price_paise)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleType;

    fn item(qty: i64) -> SaleItemInput {
        SaleItemInput {
            product_id: "p-1".to_string(),
            quantity: qty,
            sale_price_paise: 500,
            final_price_paise: 500 * qty,
        }
    }

    fn new_sale(items: Vec<SaleItemInput>) -> NewSale {
        NewSale {
            sale_type: SaleType::Bill,
            customer_name: None,
            customer_mobile: None,
            payment_mode: None,
            remarks: None,
            total_amount_paise: 1000,
            total_discount_paise: 0,
            items,
        }
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("55012345").is_ok());
        assert!(validate_barcode(" 55012345 ").is_ok());

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("1234567").is_err());
        assert!(validate_barcode("123456789").is_err());
        assert!(validate_barcode("12a45678").is_err());
    }

    #[test]
    fn test_validate_lookup_name() {
        assert!(validate_lookup_name("name", "Grocery").is_ok());
        assert!(validate_lookup_name("name", "").is_err());
        assert!(validate_lookup_name("name", &"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("9876543210").is_ok());
        assert!(validate_mobile("+91 98765 43210").is_ok());
        assert!(validate_mobile("12345").is_err());
        assert!(validate_mobile("not-a-number").is_err());
    }

    #[test]
    fn test_normalize_customer_name() {
        assert_eq!(normalize_customer_name(None), WALK_IN_CUSTOMER);
        assert_eq!(normalize_customer_name(Some("  ")), WALK_IN_CUSTOMER);
        assert_eq!(normalize_customer_name(Some("Asha")), "Asha");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10000).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(50).is_ok());
        assert!(validate_stock_level(-1).is_err());
    }

    #[test]
    fn test_final_amount() {
        assert_eq!(final_amount_paise(25000, 1500), 23500);
        assert_eq!(final_amount_paise(1000, 0), 1000);
    }

    #[test]
    fn test_validate_new_sale_requires_items() {
        let sale = new_sale(vec![]);
        assert!(matches!(
            validate_new_sale(&sale),
            Err(CoreError::EmptySale)
        ));
    }

    #[test]
    fn test_validate_new_sale_ok() {
        let sale = new_sale(vec![item(2)]);
        assert!(validate_new_sale(&sale).is_ok());
    }

    #[test]
    fn test_validate_new_sale_bad_quantity() {
        let sale = new_sale(vec![item(0)]);
        assert!(validate_new_sale(&sale).is_err());
    }

    #[test]
    fn test_validate_new_sale_blank_mobile_ok() {
        let mut sale = new_sale(vec![item(1)]);
        sale.customer_mobile = Some("   ".to_string());
        assert!(validate_new_sale(&sale).is_ok());
    }
}
