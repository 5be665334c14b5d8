//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pairswap::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BasisPoints, CallContext, FeeTier, Liquidity, PriceRange,
    Rounding, SqrtPrice, SwapOutcome, SwapRequest, Timestamp,
};

pub use crate::traits::{FromConfig, SwapPool};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{AmmConfig, ClmmConfig, ConstantProductConfig, DepositPolicy};

pub use crate::error::{AmmError, Result};

pub use crate::ledger::{InMemoryLedger, Ledger};

pub use crate::events::{PoolEvent, RegistryEvent};

#[cfg(feature = "clmm")]
pub use crate::pools::ClmmPool;
#[cfg(feature = "constant-product")]
pub use crate::pools::ConstantProductPool;
pub use crate::pools::PoolBox;

pub use crate::registry::{PoolHandle, PoolRegistry};
