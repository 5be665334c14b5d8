//! Raw asset amount with checked arithmetic.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::Rounding;
use crate::error::ArithmeticError;

/// Largest reserve a constant-product pool may record (`2^112 − 1`).
///
/// Keeping reserves within 112 bits guarantees that the product of two
/// reserves, and the product of a reserve with a share supply, fit in a
/// 256-bit accumulator with room to spare.
pub const MAX_RESERVE: u128 = (1u128 << 112) - 1;

/// A raw asset amount in the asset's smallest unit.
///
/// `Amount` never interprets decimals.  All `u128` values are valid
/// amounts; arithmetic methods are checked and return `None` on overflow,
/// underflow or division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(67)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[must_use]
#[serde(transparent)]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Widens the amount into a 256-bit accumulator.
    #[must_use]
    pub fn to_u256(&self) -> U256 {
        U256::from(self.0)
    }

    /// Narrows a 256-bit value back into an `Amount`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if `value` does not fit in
    /// 128 bits.
    pub fn from_u256(value: U256) -> Result<Self, ArithmeticError> {
        u128::try_from(value)
            .map(Self)
            .map_err(|_| ArithmeticError::Overflow("amount exceeds 128 bits"))
    }

    /// Returns `true` if the amount fits the 112-bit reserve bound.
    #[must_use]
    pub const fn fits_reserve(&self) -> bool {
        self.0 <= MAX_RESERVE
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match crate::math::div_round(self.0, divisor.0, rounding) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
