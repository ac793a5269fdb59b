//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1299 * 0.9 * 3 = 3507.2999999999997  ❌ WRONG!                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    129900 * 90 * 3 / 100 = 350730 paise = ₹3,507.30                    │
//! │    Exactly one rounding step, at the end of the line                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_paise(129_900); // ₹1,299.00
//!
//! let doubled = price * 2;
//! let total = price + Money::from_paise(50);
//! assert_eq!(doubled.paise(), 259_800);
//! assert_eq!(total.to_string(), "₹1,299.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Paise per rupee.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic may pass through negatives (e.g. a
///   difference of totals); line prices themselves are never negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as a bare integer**: `{"unitPrice": 129900}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_paise(129_900);
    /// assert_eq!(price.paise(), 129_900);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(1299).paise(), 129_900);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * MINOR_PER_MAJOR)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_rupees_paise(-5, 50)` is -₹5.50.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * MINOR_PER_MAJOR - paise)
        } else {
            Money(rupees * MINOR_PER_MAJOR + paise)
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// Prices within `MAX_UNIT_PRICE` never reach saturation.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(249_900);
    /// assert_eq!(unit_price.multiply_quantity(3).paise(), 749_700);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a whole-percent discount to this amount.
    ///
    /// Rounds half away from zero, so ₹0.05 at 50% becomes ₹0.03.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_paise(1000);
    /// assert_eq!(price.apply_percent_discount(10).paise(), 900);
    /// ```
    pub fn apply_percent_discount(&self, percent: u8) -> Money {
        self.discounted_line_total(1, percent)
    }

    /// Price of `quantity` units at `percent` off, rounded once at the end.
    ///
    /// Computes `round((unit - unit * percent / 100) * quantity)` exactly:
    /// the intermediate product is kept in i128 and divided by 100 only
    /// after multiplying by the quantity. A result outside i64 saturates.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// // (1000 - 100) × 2
    /// let line = Money::from_paise(1000).discounted_line_total(2, 10);
    /// assert_eq!(line.paise(), 1800);
    ///
    /// // 333 × 0.85 = 283.05 → 283
    /// let line = Money::from_paise(333).discounted_line_total(1, 15);
    /// assert_eq!(line.paise(), 283);
    /// ```
    pub fn discounted_line_total(&self, quantity: i64, percent: u8) -> Money {
        let percent = i128::from(percent.min(100));
        let numerator = i128::from(self.0) * (100 - percent) * i128::from(quantity);
        let rounded = div_round_half_away(numerator, 100);
        let paise = i64::try_from(rounded)
            .unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX });
        Money::from_paise(paise)
    }

    /// Formats with Indian digit grouping after the given currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(-129_950).format_with_symbol("Rs. "), "-Rs. 1,299.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_indian(self.rupees().unsigned_abs()),
            self.paise_part()
        )
    }
}

/// Integer division rounding halves away from zero (`Math.round` for
/// non-negative inputs).
fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    }
}

/// Groups a non-negative integer with Indian digit grouping.
///
/// The last three digits form one group, then pairs: `12,34,567`.
///
/// ## Example
/// ```rust
/// use storefront_core::money::group_indian;
///
/// assert_eq!(group_indian(999), "999");
/// assert_eq!(group_indian(1299), "1,299");
/// assert_eq!(group_indian(1234567), "12,34,567");
/// ```
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Rupee display with Indian grouping: `₹1,29,900.50`.
///
/// Other symbols go through [`Money::format_with_symbol`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("₹"))
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Saturates at the i64 bounds instead of overflowing.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| Money(acc.0.saturating_add(m.0)))
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
