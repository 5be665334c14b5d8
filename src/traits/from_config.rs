//! Construction of a pool from its configuration.
//!
//! Each pool implements `FromConfig<C>` for its own config struct, which
//! lets the registry build pools by matching on
//! [`AmmConfig`](crate::config::AmmConfig) without trait objects:
//!
//! ```text
//! AmmConfig::ConstantProduct(cfg) => ConstantProductPool::from_config(pair, &cfg)
//! AmmConfig::Clmm(cfg)            => ClmmPool::from_config(pair, &cfg)
//! ```

use crate::domain::AssetPair;
use crate::error::AmmError;

/// Builds a pool for `pair` from a configuration of type `C`.
///
/// Implementations validate the configuration; a pool that was returned
/// is in a valid empty state.
pub trait FromConfig<C> {
    /// Creates the pool.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidFee`] or [`AmmError::InvalidConfiguration`] when
    /// the configuration does not validate.
    fn from_config(pair: AssetPair, config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
