//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Paise                                        │
//! │    ₹10.99 is stored as 1099 paise (i64)                             │
//! │    Every calculation is exact integer arithmetic                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The database, the line-item math, and the JSON API all carry paise.
//! Rupee decimals appear only at the spreadsheet boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest currency unit).
///
/// - **i64 (signed)**: allows negative values for discounts and corrections
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - Full serde support (serialized as a bare integer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Converts to a rupee decimal for spreadsheet cells.
    ///
    /// Display/export only. Never feed the result back into calculations.
    #[inline]
    pub fn to_rupee_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a rupee decimal (as found in spreadsheet cells) into paise.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupee_decimal(10.99).paise(), 1099);
    /// assert_eq!(Money::from_rupee_decimal(10.0).paise(), 1000);
    /// ```
    #[inline]
    pub fn from_rupee_decimal(rupees: f64) -> Self {
        Money((rupees * 100.0).round() as i64)
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity (line total = unit price × qty).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display for logs and receipts, e.g. `₹10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(1099)), "₹10.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);
    }

    #[test]
    fn test_discount_subtraction() {
        // final_amount = total_amount - total_discount
        let total = Money::from_paise(25000);
        let discount = Money::from_paise(1500);
        assert_eq!((total - discount).paise(), 23500);
    }

    #[test]
    fn test_rupee_decimal_round_trip() {
        assert_eq!(Money::from_rupee_decimal(10.99).paise(), 1099);
        assert_eq!(Money::from_rupee_decimal(0.05).paise(), 5);
        assert_eq!(Money::from_paise(1099).to_rupee_decimal(), 10.99);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.paise(), 897);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_paise(-100);
        assert!(negative.is_negative());
    }
}
