//! Arena of pools keyed by canonical pair.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, TryLockError};

use serde::{Deserialize, Serialize};

use crate::config::AmmConfig;
use crate::domain::{AssetId, AssetPair};
use crate::error::AmmError;
use crate::events::RegistryEvent;
use crate::pools::PoolBox;
#[cfg(feature = "clmm")]
use crate::pools::ClmmPool;
#[cfg(feature = "constant-product")]
use crate::pools::ConstantProductPool;
use crate::traits::{FromConfig, SwapPool};

/// Stable index of a pool inside a [`PoolRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolHandle(usize);

impl PoolHandle {
    /// Arena index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl core::fmt::Display for PoolHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

/// Owns every pool and maps each canonical pair to at most one of them.
///
/// Pools sit behind their own [`Mutex`] and are reached through closures
/// ([`with_pool`](Self::with_pool) and friends).  Entry uses `try_lock`,
/// so an operation that calls back into a pool already in use fails with
/// [`AmmError::Locked`] instead of interleaving with it.
///
/// # Example
///
/// ```rust
/// use pairswap::config::{AmmConfig, ConstantProductConfig};
/// use pairswap::domain::AssetId;
/// use pairswap::registry::PoolRegistry;
///
/// let (a, b) = (AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]));
/// let mut registry = PoolRegistry::new();
/// let handle = registry
///     .create_pool(a, b, &AmmConfig::from(ConstantProductConfig::default()))
///     .expect("created");
/// assert_eq!(registry.pool_for(b, a), Some(handle));
/// ```
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: Vec<Mutex<PoolBox>>,
    pairs: Vec<AssetPair>,
    by_pair: HashMap<AssetPair, PoolHandle>,
    events: Vec<RegistryEvent>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pool for the pair `{asset_a, asset_b}`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] / [`AmmError::ZeroAddress`] for an
    ///   invalid pair.
    /// - [`AmmError::PairExists`] if the pair already has a pool.
    /// - Configuration validation errors.
    pub fn create_pool(
        &mut self,
        asset_a: AssetId,
        asset_b: AssetId,
        config: &AmmConfig,
    ) -> Result<PoolHandle, AmmError> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        if self.by_pair.contains_key(&pair) {
            return Err(AmmError::PairExists);
        }
        let pool = PoolBox::from_config(pair, config)?;
        let account = pool.account();
        let handle = PoolHandle(self.pools.len());

        self.pools.push(Mutex::new(pool));
        self.pairs.push(pair);
        self.by_pair.insert(pair, handle);
        tracing::info!(
            %handle,
            asset0 = %pair.low(),
            asset1 = %pair.high(),
            %account,
            kind = config.kind(),
            "pool created"
        );
        self.events.push(RegistryEvent::PoolCreated {
            pair,
            account,
            kind: config.kind().to_owned(),
            index: handle.index(),
        });
        Ok(handle)
    }

    /// The pool registered for `{asset_a, asset_b}`, in either order.
    #[must_use]
    pub fn pool_for(&self, asset_a: AssetId, asset_b: AssetId) -> Option<PoolHandle> {
        let pair = AssetPair::new(asset_a, asset_b).ok()?;
        self.by_pair.get(&pair).copied()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Handles of all pools in creation order.
    pub fn handles(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        (0..self.pools.len()).map(PoolHandle)
    }

    /// Canonical pair served by `handle`.
    #[must_use]
    pub fn pair_of(&self, handle: PoolHandle) -> Option<AssetPair> {
        self.pairs.get(handle.index()).copied()
    }

    /// Registry events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Removes and returns the recorded registry events.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        core::mem::take(&mut self.events)
    }

    /// Runs `op` with exclusive access to the pool behind `handle`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown handle.
    /// - [`AmmError::Locked`] if the pool is already in use.
    /// - Whatever `op` returns.
    pub fn with_pool<T, F>(&self, handle: PoolHandle, op: F) -> Result<T, AmmError>
    where
        F: FnOnce(&mut PoolBox) -> Result<T, AmmError>,
    {
        let mut guard = self.lock(handle)?;
        op(&mut guard)
    }

    /// Like [`with_pool`](Self::with_pool) for a constant-product pool.
    ///
    /// # Errors
    ///
    /// [`AmmError::WrongPoolKind`] if `handle` refers to another kind,
    /// plus the errors of [`with_pool`](Self::with_pool).
    #[cfg(feature = "constant-product")]
    pub fn with_constant_product<T, F>(&self, handle: PoolHandle, op: F) -> Result<T, AmmError>
    where
        F: FnOnce(&mut ConstantProductPool) -> Result<T, AmmError>,
    {
        self.with_pool(handle, |pool| {
            let pool = pool
                .as_constant_product_mut()
                .ok_or(AmmError::WrongPoolKind("constant_product"))?;
            op(pool)
        })
    }

    /// Like [`with_pool`](Self::with_pool) for a concentrated-liquidity pool.
    ///
    /// # Errors
    ///
    /// [`AmmError::WrongPoolKind`] if `handle` refers to another kind,
    /// plus the errors of [`with_pool`](Self::with_pool).
    #[cfg(feature = "clmm")]
    pub fn with_clmm<T, F>(&self, handle: PoolHandle, op: F) -> Result<T, AmmError>
    where
        F: FnOnce(&mut ClmmPool) -> Result<T, AmmError>,
    {
        self.with_pool(handle, |pool| {
            let pool = pool.as_clmm_mut().ok_or(AmmError::WrongPoolKind("clmm"))?;
            op(pool)
        })
    }

    fn lock(&self, handle: PoolHandle) -> Result<MutexGuard<'_, PoolBox>, AmmError> {
        let slot = self.pools.get(handle.index()).ok_or(AmmError::PoolNotFound)?;
        match slot.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => {
                tracing::warn!(%handle, "pool is busy, rejecting re-entrant access");
                Err(AmmError::Locked)
            }
            // pools commit last, so a poisoned pool holds committed state
            Err(TryLockError::Poisoned(poisoned)) => {
                tracing::warn!(%handle, "recovering pool from poisoned lock");
                Ok(poisoned.into_inner())
            }
        }
    }
}
