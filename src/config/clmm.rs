//! Configuration for concentrated-liquidity pools.

use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, SqrtPrice};
use crate::error::AmmError;
use crate::math::encode_sqrt_price;

/// Immutable parameters of a concentrated-liquidity pool.
///
/// The pool starts at `initial_sqrt_price` with no positions.
///
/// # Examples
///
/// ```
/// use pairswap::config::ClmmConfig;
/// use pairswap::domain::FeeTier;
///
/// // Start at price 4 (asset1 per asset0), i.e. sqrt price 2.
/// let cfg = ClmmConfig::from_ratio(FeeTier::TIER_0_30_PERCENT, 4, 1).expect("valid");
/// assert_eq!(cfg.initial_sqrt_price().get(), pairswap::math::Q96 * alloy_primitives::U256::from(2u8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClmmConfig {
    fee: FeeTier,
    initial_sqrt_price: SqrtPrice,
}

impl ClmmConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] above 1 000 bp.
    pub fn new(fee: FeeTier, initial_sqrt_price: SqrtPrice) -> Result<Self, AmmError> {
        let config = Self {
            fee,
            initial_sqrt_price,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a config whose starting price is `amount1 / amount0`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if the ratio is degenerate or its
    /// sqrt price is out of bounds, plus the errors of [`new`](Self::new).
    pub fn from_ratio(fee: FeeTier, amount1: u128, amount0: u128) -> Result<Self, AmmError> {
        let raw = encode_sqrt_price(amount1, amount0)
            .map_err(|_| AmmError::InvalidConfiguration("price ratio is not encodable"))?;
        let price = SqrtPrice::new(raw)
            .map_err(|_| AmmError::InvalidConfiguration("initial sqrt price out of bounds"))?;
        Self::new(fee, price)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] above 1 000 bp.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee.validate()
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Starting sqrt price.
    #[must_use]
    pub const fn initial_sqrt_price(&self) -> SqrtPrice {
        self.initial_sqrt_price
    }
}
