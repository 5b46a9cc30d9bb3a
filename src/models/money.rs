//! Money type for representing currency amounts
//!
//! Backed by `rust_decimal::Decimal` so imported amounts like `-20.05` are
//! summed exactly. Reported figures are rounded to cents with
//! round-half-away-from-zero; every reported value is non-negative, so this
//! is plain half-up.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Neg, Sub};
use std::str::FromStr;

/// Decimal places kept in reported amounts
pub const CENT_PLACES: u32 = 2;

/// Largest absolute amount, in whole units, a single transaction may carry.
/// Sums over any realistic number of such amounts stay inside `Decimal`'s range.
pub const MAX_TRANSACTION_UNITS: i64 = 1_000_000_000_000_000;

/// A signed monetary amount, currency-agnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wrap a decimal amount
    pub const fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from whole cents
    ///
    /// # Examples
    /// ```
    /// use spendwatch::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CENT_PLACES))
    }

    /// Whether the amount fits the per-transaction bound
    pub fn within_transaction_bound(&self) -> bool {
        self.0.abs() <= Decimal::from(MAX_TRANSACTION_UNITS)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying decimal
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Round to cents, midpoints away from zero (`0.125` -> `0.13`)
    pub fn round_cents(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Lossy conversion for callers that need a float
    pub fn to_f64(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        self.0.to_f64().unwrap_or_default()
    }

    /// Parse an amount from a string
    ///
    /// Accepts plain decimals ("10.50", "-10.5", "1000") with an optional
    /// leading currency symbol ("$10.50", "-$10.50").
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, rest) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let value = Decimal::from_str(rest)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_cents().0)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Divide evenly across a positive count (days, periods)
impl Div<i64> for Money {
    type Output = Self;

    fn div(self, divisor: i64) -> Self {
        Self(self.0 / Decimal::from(divisor))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
