//! Concentrated liquidity position.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountId, Liquidity, SqrtPrice};
use crate::error::AmmError;

/// Half-open sqrt-price interval `[lower, upper)`.
///
/// # Invariants
///
/// - `lower < upper`, both within [`SqrtPrice`] bounds.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{PriceRange, SqrtPrice};
///
/// let lower = SqrtPrice::from_raw(100).expect("valid");
/// let upper = SqrtPrice::from_raw(200).expect("valid");
/// let range = PriceRange::new(lower, upper).expect("ordered");
/// assert!(range.contains(lower));
/// assert!(!range.contains(upper));
/// assert!(PriceRange::new(upper, lower).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    lower: SqrtPrice,
    upper: SqrtPrice,
}

#[derive(Deserialize)]
struct RawPriceRange {
    lower: SqrtPrice,
    upper: SqrtPrice,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = AmmError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

impl PriceRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRange`] if `lower >= upper`.
    pub fn new(lower: SqrtPrice, upper: SqrtPrice) -> Result<Self, AmmError> {
        if lower >= upper {
            return Err(AmmError::InvalidRange("lower bound must be below upper bound"));
        }
        Ok(Self { lower, upper })
    }

    /// Lower (inclusive) bound.
    #[must_use]
    pub const fn lower(&self) -> SqrtPrice {
        self.lower
    }

    /// Upper (exclusive) bound.
    #[must_use]
    pub const fn upper(&self) -> SqrtPrice {
        self.upper
    }

    /// `lower <= price < upper`.
    #[must_use]
    pub fn contains(&self, price: SqrtPrice) -> bool {
        self.lower <= price && price < self.upper
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower.get(), self.upper.get())
    }
}

/// Composite key of a position: owner plus range.
///
/// Ordered by owner, then lower, then upper, so positions of one owner are
/// contiguous in a `BTreeMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionKey {
    owner: AccountId,
    range: PriceRange,
}

impl PositionKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(owner: AccountId, range: PriceRange) -> Self {
        Self { owner, range }
    }

    /// The account that owns the position.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// The position's price range.
    #[must_use]
    pub const fn range(&self) -> PriceRange {
        self.range
    }
}

/// Liquidity deposited under one [`PositionKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    liquidity: Liquidity,
}

impl Position {
    /// Creates a position record.
    #[must_use]
    pub const fn new(liquidity: Liquidity) -> Self {
        Self { liquidity }
    }

    /// Liquidity held.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Returns `true` once all liquidity has been burned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.liquidity.is_zero()
    }

    /// Adds `delta` to the position.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic overflow if the sum exceeds `u128`.
    pub fn increase(&mut self, delta: Liquidity) -> Result<(), AmmError> {
        self.liquidity = self
            .liquidity
            .checked_add(&delta)
            .ok_or(crate::error::ArithmeticError::Overflow("position liquidity"))?;
        Ok(())
    }

    /// Removes `delta` from the position.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientPosition`] if `delta` exceeds the
    /// held liquidity.
    pub fn decrease(&mut self, delta: Liquidity) -> Result<(), AmmError> {
        self.liquidity = self.liquidity.checked_sub(&delta).ok_or(
            AmmError::InsufficientPosition {
                available: self.liquidity.get(),
                requested: delta.get(),
            },
        )?;
        Ok(())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(liquidity={})", self.liquidity)
    }
}
