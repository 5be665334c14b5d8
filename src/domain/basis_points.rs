//! Basis-point representation for percentages.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::ArithmeticError;
use crate::math::CheckedArithmetic;

/// Basis-point denominator (10 000 = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// All `u32` values can be stored; [`is_valid_percent`](Self::is_valid_percent)
/// tells whether the value makes sense as a percentage.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.apply(Amount::new(100), Rounding::Up), Ok(Amount::new(1)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// Computes `amount × self / 10 000` with explicit rounding.
    ///
    /// The product is formed in 256 bits, so only a result that does not
    /// fit an [`Amount`] fails.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the result exceeds 128 bits.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount, ArithmeticError> {
        amount.scale(u128::from(self.0), u128::from(BPS_DENOMINATOR), rounding)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
