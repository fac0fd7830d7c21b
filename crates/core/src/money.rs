//! Fixed-point money in minor units.
//!
//! All monetary arithmetic in homeshare is exact integer arithmetic on cents. The only
//! place a value is ever rounded is [`Money::split_evenly`], which hands leftover cents
//! out one at a time so the parts always add back up to the whole.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Number of fractional digits carried by [`Money`].
pub const MINOR_DIGITS: u32 = 2;

const MINOR_PER_MAJOR: i64 = 100;

/// A signed amount of money in a single, implicit currency.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Self = Self(0);

    /// Amount expressed in minor units (cents).
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Whole major units (e.g. dollars).
    pub fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// Convert a decimal amount, rejecting sub-cent precision.
    pub fn from_decimal(value: Decimal) -> Result<Self, DomainError> {
        let scaled = value
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .ok_or_else(|| DomainError::validation(format!("amount {value} is out of range")))?;

        if !scaled.fract().is_zero() {
            return Err(DomainError::validation(format!(
                "amount {value} has more than {MINOR_DIGITS} fractional digits"
            )));
        }

        scaled
            .to_i64()
            .map(Self)
            .ok_or_else(|| DomainError::validation(format!("amount {value} is out of range")))
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MINOR_DIGITS)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sum of `amounts`, or `None` as soon as a partial sum leaves the `i64` range.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts.into_iter().try_fold(Self::ZERO, Self::checked_add)
    }

    /// Split into `parts` shares that sum exactly to `self`.
    ///
    /// Every share gets `self / parts`; the first `self % parts` shares get one extra
    /// minor unit. Returns `None` when `parts` is zero.
    pub fn split_evenly(self, parts: usize) -> Option<Vec<Money>> {
        if parts == 0 {
            return None;
        }

        let count = i64::try_from(parts).ok()?;
        let base = self.0 / count;
        let remainder = (self.0 % count).unsigned_abs() as usize;
        let step = self.0.signum();

        Some(
            (0..parts)
                .map(|idx| {
                    if idx < remainder {
                        Self(base + step)
                    } else {
                        Self(base)
                    }
                })
                .collect(),
        )
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_decimal(), f)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
