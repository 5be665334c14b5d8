//! Chain-agnostic identifiers for assets and accounts.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a fungible asset on the external ledger.
///
/// Wraps a fixed-size `[u8; 32]`.  Identifiers are totally ordered
/// (lexicographically), which is what [`AssetPair`](super::AssetPair)
/// uses to pick a canonical orientation.  The all-zero identifier is the
/// null asset and is rejected wherever a pool asset is expected.
///
/// # Examples
///
/// ```
/// use pairswap::domain::AssetId;
///
/// let lo = AssetId::from_bytes([1u8; 32]);
/// let hi = AssetId::from_bytes([2u8; 32]);
/// assert!(lo < hi);
/// assert!(AssetId::ZERO.is_zero());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// The null asset.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` for the null asset.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", alloy_primitives::hex::encode_prefixed(self.0))
    }
}

/// Identifier of a ledger account: a user, a pool, or the burn account.
///
/// The all-zero account is the burn account; liquidity shares minted to
/// it are locked forever.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// The burn account.
    pub const BURN: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", alloy_primitives::hex::encode_prefixed(self.0))
    }
}
