//! Square-root price in Q64.96 fixed point.

use core::fmt;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::AmmError;

/// Largest accepted sqrt price: `2^160 − 1`.
pub const MAX_SQRT_PRICE: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

/// `sqrt(asset1 / asset0)` scaled by `2^96`.
///
/// Always strictly positive and at most [`MAX_SQRT_PRICE`].  Range
/// bounds of concentrated positions are expressed in the same unit, so a
/// range `[lower, upper)` is simply a pair of `SqrtPrice` values.
///
/// # Examples
///
/// ```
/// use pairswap::domain::SqrtPrice;
/// use pairswap::math::Q96;
///
/// // Price 1:1
/// let one = SqrtPrice::new(Q96).expect("in bounds");
/// assert_eq!(one.get(), Q96);
/// assert!(SqrtPrice::new(alloy_primitives::U256::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "U256", into = "U256")]
pub struct SqrtPrice(U256);

impl SqrtPrice {
    /// The smallest representable sqrt price (one ulp).
    pub const MIN: Self = Self(U256::from_limbs([1, 0, 0, 0]));

    /// The largest accepted sqrt price.
    pub const MAX: Self = Self(MAX_SQRT_PRICE);

    /// Creates a bounds-checked `SqrtPrice`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRange`] if `value` is zero or above
    /// [`MAX_SQRT_PRICE`].
    pub fn new(value: U256) -> Result<Self, AmmError> {
        if value.is_zero() {
            return Err(AmmError::InvalidRange("sqrt price must be positive"));
        }
        if value > MAX_SQRT_PRICE {
            return Err(AmmError::InvalidRange("sqrt price exceeds 2^160 - 1"));
        }
        Ok(Self(value))
    }

    /// Convenience constructor from a `u128` raw value.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn from_raw(value: u128) -> Result<Self, AmmError> {
        Self::new(U256::from(value))
    }

    /// Returns the raw Q64.96 value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }
}

impl TryFrom<U256> for SqrtPrice {
    type Error = AmmError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SqrtPrice> for U256 {
    fn from(price: SqrtPrice) -> Self {
        price.0
    }
}

impl fmt::Display for SqrtPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SqrtPrice({})", self.0)
    }
}
