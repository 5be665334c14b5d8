//! Pool registry: one pool per canonical asset pair.
//!
//! [`PoolRegistry`] is an arena of pools addressed by [`PoolHandle`].  It
//! replaces any ambient global lookup: callers own the registry and pass
//! it (or a handle) to whoever needs a pool.
//!
//! ```text
//! create_pool(A, B, cfg) ──► AssetPair{low, high} ──► PoolBox::from_config
//!                                   │
//!                                   └──► by_pair[pair] = handle
//! ```
//!
//! # Feature Gating
//!
//! [`PoolRegistry::with_constant_product`] and [`PoolRegistry::with_clmm`]
//! exist only when their pool feature is enabled; creating a pool of a
//! disabled kind fails with
//! [`AmmError::InvalidConfiguration`](crate::error::AmmError::InvalidConfiguration).

mod pool_registry;

pub use pool_registry::{PoolHandle, PoolRegistry};
