//! Money type for representing currency amounts
//!
//! Amounts are kept as whole cents in an `i64` so that ledger sums are exact.
//! Display is always two decimals; there is no notion of currency beyond the
//! symbol chosen in the settings.
//!
//! Single amounts are capped at [`Money::MAX`] so that ledger totals stay far
//! from the `i64` range; arithmetic saturates instead of overflowing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary amount stored as cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount a single entry may carry (in either direction)
    pub const MAX: Money = Money(i64::MAX / 1000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finance_tracker::models::Money;
    /// let amount = Money::from_cents(1050);
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Whether this amount is within [`Money::MAX`] of zero
    pub const fn is_within_limit(&self) -> bool {
        self.0 >= -Self::MAX.0 && self.0 <= Self::MAX.0
    }

    /// Multiply by a whole count (used for projections)
    pub const fn times(&self, count: i64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Average over `count` items, rounded half away from zero to the cent.
    /// Zero items average to zero.
    pub fn average(&self, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        let total = i128::from(self.0);
        let count = count as i128;
        let rounded = (total + total.signum() * (count / 2)) / count;
        // |rounded| <= |self.0|, so it always fits back into i64
        Self(rounded as i64)
    }

    /// This amount as a percentage of `total`; zero when `total` is zero
    pub fn percentage_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        self.0 as f64 / total.0 as f64 * 100.0
    }

    /// Parse a money amount from user input
    ///
    /// Accepts `"10.50"`, `"-10.50"`, `"$10.50"`, `"10"` and `"10.5"`.
    /// More than two decimal places is rejected rather than silently rounded.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(raw.to_string());

        let (negative, rest) = match raw.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, raw),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(raw.to_string()));
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            // digits only, so the sole failure left is overflow
            whole
                .parse()
                .map_err(|_| MoneyParseError::TooLarge(raw.to_string()))?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(|| MoneyParseError::TooLarge(raw.to_string()))?;
        if total > Self::MAX.0 {
            return Err(MoneyParseError::TooLarge(raw.to_string()));
        }

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol other than `$`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.units().abs(),
            self.cents_part()
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.format_with_symbol("$");
        f.pad(&rendered)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
            Self::TooPrecise(s) => {
                write!(f, "Amount '{}' has more than two decimal places", s)
            }
            Self::TooLarge(s) => write!(f, "Amount '{}' is too large", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
