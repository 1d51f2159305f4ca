//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog sends prices as JSON numbers: 109.95, 22.3, 55.99         │
//! │  Summing them as floats:                                               │
//! │    22.3 × 3 = 66.89999999999999  ❌ WRONG!                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Parse the decimal TEXT of the number straight into cents            │
//! │    2230 × 3 = 6690 cents = $66.90                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2u32;                   // $21.98
//! let total = price + Money::from_cents(500);   // $15.99
//!
//! // Parse catalog text without touching floating point
//! let parsed = Money::parse_decimal("109.95").unwrap();
//! assert_eq!(parsed.cents(), 10995);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences between totals can go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem.line_total ──► Cart.subtotal ──► Order.total
///       │
///       └──► Displayed as "$10.99" in the views
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal string ("109.95", "22.3", "7") into cents.
    ///
    /// ## Rounding
    /// Digits past the second decimal place round half up on the third
    /// digit: "0.125" → 13 cents, "0.124" → 12 cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("22.3").unwrap().cents(), 2230);
    /// assert_eq!(Money::parse_decimal("-5.5").unwrap().cents(), -550);
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidPrice {
            value: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("too large"))?
        };

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tens = digits.next().unwrap_or(0);
        let ones = digits.next().unwrap_or(0);
        let round_up = digits.next().map_or(false, |d| d >= 5);

        let cents = whole_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(tens * 10 + ones + i64::from(round_up)))
            .ok_or_else(|| invalid("too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units as a float, for the wire only.
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way the cart and checkout
/// screens print it ("$10.99").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates like `multiply_quantity`.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Catalog wire format
// =============================================================================

/// Serde adapter for prices sent as decimal JSON numbers in major units.
///
/// ## Usage
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub price: Money,
/// ```
///
/// Deserialization accepts integers, floats and numeric strings and
/// rejects negative values. Floats go through their shortest decimal
/// representation, so `109.95` becomes exactly 10995 cents.
pub mod decimal {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use super::Money;

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.as_major_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PriceVisitor)
    }

    struct PriceVisitor;

    impl PriceVisitor {
        fn non_negative<E: de::Error>(money: Money) -> Result<Money, E> {
            if money.is_negative() {
                Err(E::custom(format!("price must not be negative, got {money}")))
            } else {
                Ok(money)
            }
        }
    }

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative decimal price")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            i64::try_from(v)
                .ok()
                .and_then(|v| v.checked_mul(100))
                .map(Money::from_cents)
                .ok_or_else(|| E::custom("price too large"))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            let money = v
                .checked_mul(100)
                .map(Money::from_cents)
                .ok_or_else(|| E::custom("price too large"))?;
            Self::non_negative(money)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            if !v.is_finite() {
                return Err(E::custom("price must be finite"));
            }
            self.visit_str(&v.to_string())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
            let money = Money::parse_decimal(v).map_err(E::custom)?;
            Self::non_negative(money)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Priced {
        #[serde(with = "decimal")]
        price: Money,
    }

    fn price_of(json: &str) -> Result<Money, serde_json::Error> {
        serde_json::from_str::<Priced>(json).map(|p| p.price)
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3u32).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let one = Money::from_cents(1);

        assert_eq!((max + one).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - one).cents(), i64::MIN);

        let mut acc = max;
        acc += one;
        assert_eq!(acc, max);

        let total: Money = vec![max, one, one].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("109.95").unwrap().cents(), 10995);
        assert_eq!(Money::parse_decimal("22.3").unwrap().cents(), 2230);
        assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
        assert_eq!(Money::parse_decimal(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal("0.125").unwrap().cents(), 13);
        assert_eq!(Money::parse_decimal("0.124").unwrap().cents(), 12);
        assert_eq!(Money::parse_decimal(" 9.99 ").unwrap().cents(), 999);

        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".").is_err());
        assert!(Money::parse_decimal("1.2.3").is_err());
        assert!(Money::parse_decimal("12a").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    /// Float sums drift; summing cents parsed from the same numbers does not.
    #[test]
    fn test_float_prices_parse_exactly() {
        assert_eq!(price_of(r#"{"price": 22.3}"#).unwrap().cents(), 2230);
        assert_eq!(price_of(r#"{"price": 109.95}"#).unwrap().cents(), 10995);
        assert_eq!(price_of(r#"{"price": 0.1}"#).unwrap().cents(), 10);
        assert_eq!(price_of(r#"{"price": 64}"#).unwrap().cents(), 6400);
        assert_eq!(price_of(r#"{"price": "15.99"}"#).unwrap().cents(), 1599);

        let line = price_of(r#"{"price": 22.3}"#).unwrap() * 3u32;
        assert_eq!(line.cents(), 6690);
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(price_of(r#"{"price": -1}"#).is_err());
        assert!(price_of(r#"{"price": -0.5}"#).is_err());
        assert!(price_of(r#"{"price": "-3"}"#).is_err());
        assert!(price_of(r#"{"price": null}"#).is_err());
    }

    #[test]
    fn test_decimal_serializes_major_units() {
        #[derive(serde::Serialize)]
        struct Out {
            #[serde(with = "decimal")]
            price: Money,
        }
        let json = serde_json::to_string(&Out {
            price: Money::from_cents(1099),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":10.99}"#);
    }
}
