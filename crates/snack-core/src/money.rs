//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Binary floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  At the drawer, a shift of 200 movements summed as floats can report   │
//! │  a variance of R$ 0.0000001 against a perfectly counted drawer.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1890 + 550 = 2440 cents, every time                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Typed amounts ("18.90") enter through [`Money::from_str`] or
//! [`Money::from_decimal`], both backed by `rust_decimal`. Neither rounds:
//! an amount with more than two fractional digits is rejected.
//!
//! ## Usage
//! ```rust
//! use snack_core::money::Money;
//!
//! let burger = Money::from_cents(1890); // $18.90
//! let soda: Money = "5.50".parse().unwrap();
//!
//! let total = burger * 2 + soda;
//! assert_eq!(total.cents(), 4330);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: variances and differences can be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.unit_price ──► CartLine.line_total ──► Cart subtotal           │
/// │                                                    │                    │
/// │                                        − discount  ▼                    │
/// │                                               Sale.final_total          │
/// │                                                    │ (cash only)        │
/// │                                                    ▼                    │
/// │  opening float ──► CashMovement.amount ──► drawer balance ──► variance  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use snack_core::money::Money;
    ///
    /// let price = Money::from_cents(1890);
    /// assert_eq!(price.cents(), 1890);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * CENTS_PER_UNIT - minor)
        } else {
            Money(major * CENTS_PER_UNIT + minor)
        }
    }

    /// Converts an exact decimal amount into cents.
    ///
    /// ## Rules
    /// - At most two fractional digits after trailing zeros are dropped
    ///   (`18.900` is fine, `18.905` is not)
    /// - Must fit in `i64` cents
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use snack_core::money::Money;
    ///
    /// let amount = Decimal::new(1890, 2); // 18.90
    /// assert_eq!(Money::from_decimal(amount).unwrap().cents(), 1890);
    ///
    /// let too_precise = Decimal::new(18905, 3); // 18.905
    /// assert!(Money::from_decimal(too_precise).is_err());
    /// ```
    pub fn from_decimal(amount: Decimal) -> Result<Self, ValidationError> {
        let amount = amount.normalize();
        if amount.scale() > 2 {
            return Err(ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: "at most two decimal places are allowed".to_string(),
            });
        }

        amount
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: "amount is out of range".to_string(),
            })
    }

    /// Returns the amount as an exact two-place decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use snack_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1890).units(), 18);
    /// assert_eq!(Money::from_cents(-550).units(), -5);
    /// ```
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use snack_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(550);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 1650);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Addition that returns `None` instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use snack_core::money::Money;
    ///
    /// let a = Money::from_cents(1000);
    /// assert_eq!(a.checked_add(Money::from_cents(50)), Some(Money::from_cents(1050)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(a), None);
    /// ```
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtraction that returns `None` instead of overflowing.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiplication by a quantity that returns `None` instead of
    /// overflowing.
    #[inline]
    pub fn checked_mul(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Addition clamped to the `i64` cent range.
    #[inline]
    pub fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering. The register app formats amounts for display
/// with its configured currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let amount = Decimal::from_str(s).map_err(|_| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' is not a number", s),
        })?;

        Money::from_decimal(amount)
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Saturates at the `i64` cent bounds rather than wrapping. Report totals
/// over a long history stay ordered even when they can no longer be exact.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc.saturating_add(m))
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1890);
        assert_eq!(money.cents(), 1890);
        assert_eq!(money.units(), 18);
        assert_eq!(money.cents_part(), 90);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(18, 90).cents(), 1890);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1890)), "$18.90");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-2000)), "-$20.00");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-a).cents(), -1000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(250);
        assert_eq!(c.cents(), 1250);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(1890),
            Money::from_cents(550),
            Money::from_cents(350),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 2790);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!("18.90".parse::<Money>().unwrap().cents(), 1890);
        assert_eq!("500".parse::<Money>().unwrap().cents(), 50000);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!(" 7.90 ".parse::<Money>().unwrap().cents(), 790);
        assert_eq!("-20".parse::<Money>().unwrap().cents(), -2000);
        assert_eq!("3.500".parse::<Money>().unwrap().cents(), 350);
    }

    #[test]
    fn test_parse_rejects_rounding_and_garbage() {
        assert!(matches!(
            "18.905".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_decimal_conversion() {
        let money = Money::from_decimal(dec!(16.90)).unwrap();
        assert_eq!(money.cents(), 1690);
        assert_eq!(money.to_decimal(), dec!(16.90));
        assert!(Money::from_decimal(dec!(99999999999999999999)).is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        let one = Money::from_cents(1);

        assert_eq!(max.checked_add(one), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(one), None);
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(
            Money::from_cents(550).checked_mul(3),
            Some(Money::from_cents(1650))
        );
        assert_eq!(
            Money::from_cents(1000).checked_sub(Money::from_cents(250)),
            Some(Money::from_cents(750))
        );
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = vec![Money::from_cents(i64::MAX), Money::from_cents(100)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
    }

    /// Repeated float additions drift; cents never do.
    #[test]
    fn test_no_drift_over_many_additions() {
        let mut balance = Money::zero();
        for _ in 0..1000 {
            balance += Money::from_cents(10);
        }
        assert_eq!(balance, Money::from_cents(10_000));
    }
}
