//! Enum dispatch wrapper for all pool types.
//!
//! [`PoolBox`] wraps every concrete pool behind a single enum so the
//! registry can store pools of different kinds in one arena.  Each variant
//! is feature-gated to match its pool type.

#[cfg(feature = "clmm")]
use super::clmm::ClmmPool;
#[cfg(feature = "constant-product")]
use super::constant_product::ConstantProductPool;

use crate::config::AmmConfig;
use crate::domain::{AccountId, Amount, AssetId, AssetPair, CallContext, FeeTier, SwapOutcome, SwapRequest};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::ledger::Ledger;
use crate::traits::{FromConfig, SwapPool};

/// Static-dispatch enum over the enabled pool kinds.
///
/// Implements [`SwapPool`] by delegating to the inner pool; kind-specific
/// operations are reached through [`as_constant_product_mut`] and
/// [`as_clmm_mut`].
///
/// [`as_constant_product_mut`]: PoolBox::as_constant_product_mut
/// [`as_clmm_mut`]: PoolBox::as_clmm_mut
#[derive(Debug)]
pub enum PoolBox {
    /// Constant-product pool (Uniswap V2 style).
    #[cfg(feature = "constant-product")]
    ConstantProduct(Box<ConstantProductPool>),

    /// Concentrated-liquidity pool (Uniswap V3 style).
    #[cfg(feature = "clmm")]
    Clmm(Box<ClmmPool>),
}

/// Delegates a method call to every enabled variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "constant-product")]
            PoolBox::ConstantProduct(p) => p.$method($($arg),*),
            #[cfg(feature = "clmm")]
            PoolBox::Clmm(p) => p.$method($($arg),*),
        }
    };
}

impl PoolBox {
    /// Short name of the pool kind, matching [`AmmConfig::kind`].
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "constant-product")]
            Self::ConstantProduct(_) => "constant_product",
            #[cfg(feature = "clmm")]
            Self::Clmm(_) => "clmm",
        }
    }

    /// The inner constant-product pool, if this is one.
    #[cfg(feature = "constant-product")]
    #[must_use]
    pub fn as_constant_product(&self) -> Option<&ConstantProductPool> {
        match self {
            Self::ConstantProduct(p) => Some(&**p),
            #[cfg(feature = "clmm")]
            Self::Clmm(_) => None,
        }
    }

    /// Mutable access to the inner constant-product pool.
    #[cfg(feature = "constant-product")]
    pub fn as_constant_product_mut(&mut self) -> Option<&mut ConstantProductPool> {
        match self {
            Self::ConstantProduct(p) => Some(&mut **p),
            #[cfg(feature = "clmm")]
            Self::Clmm(_) => None,
        }
    }

    /// The inner concentrated-liquidity pool, if this is one.
    #[cfg(feature = "clmm")]
    #[must_use]
    pub fn as_clmm(&self) -> Option<&ClmmPool> {
        match self {
            Self::Clmm(p) => Some(&**p),
            #[cfg(feature = "constant-product")]
            Self::ConstantProduct(_) => None,
        }
    }

    /// Mutable access to the inner concentrated-liquidity pool.
    #[cfg(feature = "clmm")]
    pub fn as_clmm_mut(&mut self) -> Option<&mut ClmmPool> {
        match self {
            Self::Clmm(p) => Some(&mut **p),
            #[cfg(feature = "constant-product")]
            Self::ConstantProduct(_) => None,
        }
    }
}

impl FromConfig<AmmConfig> for PoolBox {
    /// Validates `config` and builds the matching pool.
    ///
    /// Fails with [`AmmError::InvalidConfiguration`] when the requested
    /// kind's feature is disabled.
    fn from_config(pair: AssetPair, config: &AmmConfig) -> Result<Self, AmmError> {
        config.validate()?;
        match config {
            #[cfg(feature = "constant-product")]
            AmmConfig::ConstantProduct(cfg) => Ok(Self::ConstantProduct(Box::new(
                ConstantProductPool::from_config(pair, cfg)?,
            ))),
            #[cfg(feature = "clmm")]
            AmmConfig::Clmm(cfg) => Ok(Self::Clmm(Box::new(ClmmPool::from_config(pair, cfg)?))),
            #[allow(unreachable_patterns)]
            _ => Err(AmmError::InvalidConfiguration("pool kind not enabled in this build")),
        }
    }
}

impl SwapPool for PoolBox {
    fn asset_pair(&self) -> &AssetPair {
        delegate!(self, asset_pair())
    }

    fn account(&self) -> AccountId {
        delegate!(self, account())
    }

    fn fee_tier(&self) -> FeeTier {
        delegate!(self, fee_tier())
    }

    fn quote_exact_in(&self, token_in: AssetId, amount_in: Amount) -> Result<SwapOutcome, AmmError> {
        delegate!(self, quote_exact_in(token_in, amount_in))
    }

    fn swap_exact_in<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        request: &SwapRequest,
    ) -> Result<SwapOutcome, AmmError> {
        delegate!(self, swap_exact_in(ledger, ctx, request))
    }

    fn drain_events(&mut self) -> Vec<PoolEvent> {
        delegate!(self, drain_events())
    }
}
