//! Fixed-point percentage type
//!
//! Percentages are stored as integer thousandths of a percent so that
//! `33.333 + 33.333 + 33.334` is exactly `100` and `99.999` is exactly not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use super::money::{Money, MoneyParseError};

/// Thousandths of a percent in one whole percent
pub const THOUSANDTHS_PER_PERCENT: i64 = 1_000;

/// A percentage with three decimal places of precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(i64);

impl Percentage {
    /// Exactly one hundred percent
    pub const HUNDRED: Percentage = Percentage(100 * THOUSANDTHS_PER_PERCENT);

    /// Create a percentage from thousandths of a percent (`100_000` is 100%)
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Self(thousandths)
    }

    /// Create a percentage from a whole number of percent
    pub const fn from_whole(percent: i64) -> Self {
        Self(percent * THOUSANDTHS_PER_PERCENT)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn thousandths(&self) -> i64 {
        self.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add, returning `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }

    /// Compute this share of `amount`, rounding half away from zero to the cent
    ///
    /// # Examples
    /// ```
    /// use splitledger::models::{Money, Percentage};
    /// let share = Percentage::parse("12.5").unwrap().apply(Money::from_cents(1000));
    /// assert_eq!(share, Money::from_cents(125));
    /// ```
    pub fn apply(&self, amount: Money) -> Money {
        let num = amount.cents() as i128 * self.0 as i128;
        let den = Self::HUNDRED.0 as i128;
        let rounded = if num >= 0 {
            (num * 2 + den) / (2 * den)
        } else {
            (num * 2 - den) / (2 * den)
        };
        Money::from_cents(rounded as i64)
    }

    /// Parse a percentage such as "25", "33.33" or "12.125"
    ///
    /// A trailing `%` is allowed. More than three fractional digits is rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let body = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac.len() > 3 {
            return Err(MoneyParseError::TooPrecise(trimmed.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<3}", frac);
            padded.parse().map_err(|_| invalid())?
        };

        let total = whole
            .checked_mul(THOUSANDTHS_PER_PERCENT)
            .and_then(|t| t.checked_add(frac))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Percentage {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::iter::Sum for Percentage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Percentage::zero(), |acc, p| acc + p)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / THOUSANDTHS_PER_PERCENT;
        let frac = abs % THOUSANDTHS_PER_PERCENT;
        if frac == 0 {
            write!(f, "{}{}%", sign, whole)
        } else {
            let digits = format!("{:03}", frac);
            write!(f, "{}{}.{}%", sign, whole, digits.trim_end_matches('0'))
        }
    }
}
