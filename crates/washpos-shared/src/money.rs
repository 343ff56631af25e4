//! # Money Module
//!
//! Integer money for rupiah amounts, plus the basis-point discount rate.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:  0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!         │
//! │                                                                         │
//! │  OUR SOLUTION: whole-rupiah i64                                         │
//! │    IDR carries no minor unit, so the smallest currency unit is Rp1      │
//! │    and every price, subtotal, and discount is exact integer math        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Percentage discounts are held as basis points internally but serialize as
//! the `0..=1` fraction the stored documents already use, so existing data
//! round-trips unchanged.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts and corrections can go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as the plain number stored documents use
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole-rupiah amount.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw whole-rupiah amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
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

    /// Multiplies by a quantity, for line totals.
    ///
    /// ## Example
    /// ```rust
    /// use washpos_shared::money::Money;
    ///
    /// let unit_price = Money::new(10_000);
    /// assert_eq!(unit_price.times(2), Money::new(20_000));
    /// ```
    #[inline]
    pub const fn times(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage discount in basis points (1 bp = 0.01%).
///
/// Stored documents express the rate as a fraction in `0..=1`
/// (`percentageValue: 0.1` meaning 10%), so serde converts at the boundary
/// while all arithmetic stays in integer basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points (1000 = 10%).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a `0..=1` fraction.
    pub fn from_fraction(fraction: f64) -> Self {
        DiscountRate((fraction * 10_000.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a `0..=1` fraction (for the wire and display).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Applies the rate to an amount with integer rounding.
    ///
    /// ## Example
    /// ```rust
    /// use washpos_shared::money::{DiscountRate, Money};
    ///
    /// let subtotal = Money::new(25_000);
    /// let rate = DiscountRate::from_fraction(0.1);
    /// assert_eq!(rate.of(subtotal), Money::new(2_500));
    /// ```
    pub fn of(&self, amount: Money) -> Money {
        // i128 keeps large subtotals from overflowing mid-calculation.
        let portion = (amount.amount() as i128 * self.0 as i128 + 5_000) / 10_000;
        Money::new(portion as i64)
    }
}

impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.fraction())
    }
}

impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fraction = f64::deserialize(deserializer)?;
        if !fraction.is_finite() {
            return Err(D::Error::custom("discount rate must be a finite fraction"));
        }
        Ok(DiscountRate::from_fraction(fraction))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `Rp10.000` with dot grouping.
///
/// ## Note
/// This is debug-grade formatting. Locale-aware currency display belongs to
/// the client app.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }
        write!(f, "{sign}Rp{grouped}")
    }
}

/// Default money is zero.
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

/// Summation for subtotals over item lists.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
