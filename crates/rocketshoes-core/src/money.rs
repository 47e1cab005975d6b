//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog API sends prices as JSON numbers:                          │
//! │    { "price": 139.9 }                                                   │
//! │                                                                         │
//! │  Summing those as floats drifts:                                        │
//! │    139.9 * 3 = 419.70000000000005  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    The float is converted ONCE at the wire boundary (decimal module)    │
//! │    13990 cents * 3 = 41970 cents                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocketshoes_core::money::Money;
//!
//! let price = Money::from_cents(13990); // R$ 139,90
//! let line = price * 3;
//! assert_eq!(line.cents(), 41970);
//! assert_eq!(line.to_string(), "R$ 419,70");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between totals may be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating arithmetic**: `+`, `-`, `*` and `sum` clamp at the i64
///   bounds instead of panicking on catalog prices that are out of range
/// - **Serde**: the derived form is plain cents; use [`decimal`] on fields
///   that travel as decimal numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as sent by the catalog API) to Money.
    ///
    /// Rounds to the nearest centavo, so `139.9` becomes `13990` even
    /// though its binary representation is `139.8999...`.
    pub fn from_decimal(value: f64) -> Self {
        Money((value * 100.0).round() as i64)
    }

    /// Returns the value as a decimal amount for the wire.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian Real format: `R$ 1.179,90`.
///
/// Thousands are grouped with `.` and centavos follow a `,`, matching what
/// the storefront shows next to every price.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.reais().abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.cents_part())
    }
}

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

/// Multiplication by a cart amount.
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Decimal Wire Format
// =============================================================================

/// Serde adapter for prices that travel as decimal JSON numbers.
///
/// ## Usage
/// ```rust,ignore
/// #[serde(with = "crate::money::decimal")]
/// pub price: Money,
/// ```
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("price must be a finite number"));
        }
        Ok(Money::from_decimal(value))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(17990);
        assert_eq!(money.cents(), 17990);
        assert_eq!(money.reais(), 179);
        assert_eq!(money.cents_part(), 90);
    }

    #[test]
    fn test_from_decimal_rounds_to_nearest_cent() {
        assert_eq!(Money::from_decimal(139.9).cents(), 13990);
        assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
        assert_eq!(Money::from_decimal(179.0).cents(), 17900);
    }

    #[test]
    fn test_display_brl() {
        assert_eq!(Money::from_cents(17990).to_string(), "R$ 179,90");
        assert_eq!(Money::from_cents(500).to_string(), "R$ 5,00");
        assert_eq!(Money::from_cents(117990).to_string(), "R$ 1.179,90");
        assert_eq!(Money::from_cents(123456789).to_string(), "R$ 1.234.567,89");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5,50");
        assert_eq!(Money::zero().to_string(), "R$ 0,00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);

        assert_eq!((huge * i32::MAX).cents(), i64::MAX);
        assert_eq!((huge * -3).cents(), i64::MIN);
        assert_eq!((huge + huge + huge).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);

        let total: Money = vec![huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
        }

        let parsed: Priced = serde_json::from_str(r#"{"price": 139.9}"#).unwrap();
        assert_eq!(parsed.price.cents(), 13990);

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"price":139.9}"#);

        // Integer JSON numbers are accepted too
        let whole: Priced = serde_json::from_str(r#"{"price": 200}"#).unwrap();
        assert_eq!(whole.price.cents(), 20000);
    }
}
