//! Pool swap fee built on [`BasisPoints`].

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::{Amount, BPS_DENOMINATOR, BasisPoints, Rounding};
use crate::error::{AmmError, ArithmeticError};

/// Highest fee a pool accepts: 1 000 bp (10%).
pub const MAX_FEE_BPS: u32 = 1_000;

/// The swap fee charged on input, in basis points.
///
/// Any `BasisPoints` value can be wrapped; pools call
/// [`validate`](Self::validate) at construction to enforce the
/// `0..=1000` bp range.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, FeeTier, Rounding};
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.basis_points().get(), 30);
/// assert!(tier.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05%, stable pairs.
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30%, standard volatile pairs.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00%, exotic pairs.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Checks the `0..=1000` bp bound.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] above 1 000 bp.
    pub const fn validate(&self) -> Result<(), AmmError> {
        if self.0.get() > MAX_FEE_BPS {
            return Err(AmmError::InvalidFee("fee must not exceed 1000 bp"));
        }
        Ok(())
    }

    /// Computes the fee for `amount` in whole units.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the fee exceeds 128 bits.
    pub fn apply_to_amount(
        &self,
        amount: Amount,
        rounding: Rounding,
    ) -> Result<Amount, ArithmeticError> {
        self.0.apply(amount, rounding)
    }

    /// `amount × (10 000 − fee)`: the input net of fee, scaled by
    /// [`BPS_DENOMINATOR`] so the fractional part of the fee is kept.
    ///
    /// Pricing formulas divide by the matching `× 10 000` on their other
    /// side.
    #[must_use]
    pub fn net_input_scaled(&self, amount: Amount) -> U256 {
        let keep = BPS_DENOMINATOR.saturating_sub(self.0.get());
        amount.to_u256() * U256::from(keep)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
