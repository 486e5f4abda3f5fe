//! # Price Module
//!
//! Provides the `Price` type for handling product prices exactly.
//!
//! ## Why Not Floating Point?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │    find_by_price(12.50) misses a row stored as 12.4999999...           │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal in memory, integer minor units on disk           │
//! │    "12.50" ──► Decimal(12.50) ──► 1250 (price_cents column)            │
//! │    1250 ──► Decimal(12.50) ──► "12.50"                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::price::Price;
//! use rust_decimal::Decimal;
//!
//! let price: Price = "12.50".parse().unwrap();
//! assert_eq!(price.cents(), 1250);
//! assert_eq!(price.amount(), Decimal::new(1250, 2));
//! assert_eq!(price.to_string(), "12.50");
//!
//! // "12.5" and "12.50" are the same price
//! assert_eq!(price, "12.5".parse().unwrap());
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::error::{DataValidationError, ValidationResult};

/// Number of fractional digits every price carries.
pub const PRICE_SCALE: u32 = 2;

// =============================================================================
// Price Type
// =============================================================================

/// A non-negative product price with exactly two fractional digits.
///
/// ## Design Decisions
/// - **i64 minor units**: equality and hashing are plain integer ops, and the
///   value maps 1:1 onto the `price_cents` column
/// - **Decimal at the edges**: callers build and read prices as
///   [`Decimal`], never as `f64`
/// - **Reject, don't round**: `12.345` is an error, so every accepted value
///   round-trips exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Creates a price from a decimal amount.
    ///
    /// ## Errors
    /// - negative amount
    /// - non-zero digits beyond [`PRICE_SCALE`]
    /// - amount too large to store
    pub fn new(amount: Decimal) -> ValidationResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DataValidationError::invalid_price(
                amount.to_string(),
                "must not be negative",
            ));
        }

        if amount.round_dp(PRICE_SCALE) != amount {
            return Err(DataValidationError::invalid_price(
                amount.to_string(),
                format!("must have at most {} decimal places", PRICE_SCALE),
            ));
        }

        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.to_i64())
            .ok_or_else(|| DataValidationError::invalid_price(amount.to_string(), "is too large"))?;

        Ok(Price(cents))
    }

    /// Creates a price from minor units (cents).
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::price::Price;
    ///
    /// let price = Price::from_cents(1099).unwrap();
    /// assert_eq!(price.to_string(), "10.99");
    /// assert!(Price::from_cents(-1).is_err());
    /// ```
    pub fn from_cents(cents: i64) -> ValidationResult<Self> {
        if cents < 0 {
            return Err(DataValidationError::invalid_price(
                cents.to_string(),
                "must not be negative",
            ));
        }
        Ok(Price(cents))
    }

    /// Returns the value in minor units (cents).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the exact decimal amount, always with two fractional digits.
    #[inline]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.0, PRICE_SCALE)
    }
}

/// Parses decimal text such as `"12.50"`, `"7"` or `"1.25e1"`.
///
/// The text goes straight to [`Decimal`]; it never passes through `f64`.
impl FromStr for Price {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let amount = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| DataValidationError::invalid_price(text, "not a decimal number"))?;
        Price::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DataValidationError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Price::new(amount)
    }
}

/// Shows the price with exactly two decimals, e.g. `12.50`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let price: Price = "12.50".parse().unwrap();
        assert_eq!(price.cents(), 1250);
        assert_eq!(price.to_string(), "12.50");

        let whole: Price = "7".parse().unwrap();
        assert_eq!(whole.to_string(), "7.00");
    }

    #[test]
    fn test_equal_values_with_different_scale() {
        let a: Price = "12.5".parse().unwrap();
        let b: Price = "12.50".parse().unwrap();
        let c = Price::new(Decimal::new(125, 1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_trailing_zeros_beyond_scale_are_accepted() {
        let price: Price = "3.1400".parse().unwrap();
        assert_eq!(price.cents(), 314);
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        let err = "12.345".parse::<Price>().unwrap_err();
        assert!(matches!(err, DataValidationError::InvalidPrice { .. }));
    }

    #[test]
    fn test_rejects_negative() {
        assert!("-1.00".parse::<Price>().is_err());
        assert!(Price::from_cents(-5).is_err());
        // Negative zero is still zero
        assert_eq!("-0.00".parse::<Price>().unwrap().cents(), 0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("twelve".parse::<Price>().is_err());
        assert!("".parse::<Price>().is_err());
    }

    #[test]
    fn test_scientific_notation() {
        let price: Price = "1.25e1".parse().unwrap();
        assert_eq!(price.cents(), 1250);
    }

    #[test]
    fn test_amount_round_trip() {
        let price = Price::from_cents(199_999).unwrap();
        assert_eq!(price.amount(), Decimal::new(199_999, 2));
        assert_eq!(Price::try_from(price.amount()).unwrap(), price);
    }
}
