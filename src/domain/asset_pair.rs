//! Canonically ordered pair of distinct assets.

use alloy_primitives::keccak256;
use serde::{Deserialize, Serialize};

use super::{AccountId, AssetId};
use crate::error::AmmError;

/// Domain separator mixed into derived pool accounts.
const POOL_ACCOUNT_SEED: &[u8] = b"pairswap/pool";

/// Side of a pair an asset sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The lower-ordered asset (asset0).
    Low,
    /// The higher-ordered asset (asset1).
    High,
}

/// An ordered pair of distinct assets, canonically sorted by identifier.
///
/// The canonical ordering guarantees `low < high`, so `(A, B)` and
/// `(B, A)` produce the same value and therefore address the same pool.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AssetId, AssetPair};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(b, a).expect("distinct assets");
/// assert_eq!(pair.low(), a);
/// assert_eq!(pair.high(), b);
/// assert_eq!(pair, AssetPair::new(a, b).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAssetPair")]
pub struct AssetPair {
    low: AssetId,
    high: AssetId,
}

/// Unvalidated wire form of [`AssetPair`].
#[derive(Deserialize)]
struct RawAssetPair {
    low: AssetId,
    high: AssetId,
}

impl TryFrom<RawAssetPair> for AssetPair {
    type Error = AmmError;

    fn try_from(raw: RawAssetPair) -> Result<Self, Self::Error> {
        let pair = Self::new(raw.low, raw.high)?;
        if pair.low != raw.low {
            return Err(AmmError::InvalidConfiguration("asset pair is not canonically ordered"));
        }
        Ok(pair)
    }
}

impl AssetPair {
    /// Creates a canonically-ordered `AssetPair`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both identifiers are equal.
    /// - [`AmmError::ZeroAddress`] if either identifier is the null asset.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> Result<Self, AmmError> {
        if asset_a == asset_b {
            return Err(AmmError::IdenticalAssets);
        }
        let (low, high) = sort_assets(asset_a, asset_b);
        // After sorting only `low` can be the all-zero identifier.
        if low.is_zero() {
            return Err(AmmError::ZeroAddress);
        }
        Ok(Self { low, high })
    }

    /// Returns the lower asset (asset0).
    #[must_use]
    pub const fn low(&self) -> AssetId {
        self.low
    }

    /// Returns the higher asset (asset1).
    #[must_use]
    pub const fn high(&self) -> AssetId {
        self.high
    }

    /// Returns `true` if `asset` is part of this pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.low == *asset || self.high == *asset
    }

    /// Returns which side of the pair `asset` is on.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `asset` is not in the pair.
    pub fn side_of(&self, asset: &AssetId) -> Result<Side, AmmError> {
        if *asset == self.low {
            Ok(Side::Low)
        } else if *asset == self.high {
            Ok(Side::High)
        } else {
            Err(AmmError::InvalidToken("asset is not part of this pair"))
        }
    }

    /// Returns the counterpart of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId, AmmError> {
        match self.side_of(asset)? {
            Side::Low => Ok(self.high),
            Side::High => Ok(self.low),
        }
    }

    /// Deterministic ledger account for the pool serving this pair.
    #[must_use]
    pub fn pool_account(&self) -> AccountId {
        let mut preimage = Vec::with_capacity(POOL_ACCOUNT_SEED.len() + 64);
        preimage.extend_from_slice(POOL_ACCOUNT_SEED);
        preimage.extend_from_slice(self.low.as_bytes());
        preimage.extend_from_slice(self.high.as_bytes());
        AccountId::from_bytes(keccak256(&preimage).0)
    }
}

/// Orders two asset identifiers as `(low, high)`.
///
/// Equal inputs come back unchanged; [`AssetPair::new`] is the validating
/// entry point.
#[must_use]
pub fn sort_assets(asset_a: AssetId, asset_b: AssetId) -> (AssetId, AssetId) {
    if asset_a < asset_b {
        (asset_a, asset_b)
    } else {
        (asset_b, asset_a)
    }
}
