//! # Error Types
//!
//! Domain-specific error types for dukaan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  dukaan-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                       │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  dukaan-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  HTTP API errors (in server)                                        │
//! │  └── ApiError         - What the browser sees (JSON + status)       │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → toast     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They are caught and translated to user-facing messages at the API layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product carries the given barcode.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Sale id doesn't exist (or was deleted).
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Category id doesn't exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Manufacturer id doesn't exist.
    #[error("Manufacturer not found: {0}")]
    ManufacturerNotFound(String),

    /// A sale must carry at least one line item.
    #[error("A sale requires at least one item")]
    EmptySale,

    /// Line item count exceeds the maximum.
    #[error("A sale cannot have more than {max} items")]
    SaleTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. non-digit barcode, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate barcode, duplicate category name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("55012345".to_string());
        assert_eq!(err.to_string(), "Product not found: 55012345");

        let err = CoreError::EmptySale;
        assert_eq!(err.to_string(), "A sale requires at least one item");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        assert_eq!(err.to_string(), "barcode is required");

        let err = ValidationError::Duplicate {
            field: "name".to_string(),
            value: "Grocery".to_string(),
        };
        assert_eq!(err.to_string(), "name 'Grocery' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "barcode".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
