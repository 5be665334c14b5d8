//! Top-level pool configuration enum.
//!
//! [`AmmConfig`] is the declarative blueprint the registry consumes:
//!
//! ```text
//! match config {
//!     AmmConfig::ConstantProduct(cfg) => ConstantProductPool::new(pair, &cfg),
//!     AmmConfig::Clmm(cfg)            => ClmmPool::new(pair, &cfg),
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::{ClmmConfig, ConstantProductConfig};
use crate::error::AmmError;

/// Configuration for any supported pool kind.
///
/// Serialised with an internal `"kind"` tag:
///
/// ```
/// use pairswap::config::AmmConfig;
///
/// let cfg: AmmConfig = serde_json::from_str(r#"{ "kind": "constant_product", "fee": 30 }"#)
///     .expect("valid json");
/// assert!(cfg.is_constant_product());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AmmConfig {
    /// Constant-product pool.
    ConstantProduct(ConstantProductConfig),
    /// Concentrated-liquidity pool.
    Clmm(ClmmConfig),
}

impl AmmConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns the inner config's validation error.
    pub fn validate(&self) -> Result<(), AmmError> {
        match self {
            Self::ConstantProduct(cfg) => cfg.validate(),
            Self::Clmm(cfg) => cfg.validate(),
        }
    }

    /// Short name of the pool kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ConstantProduct(_) => "constant_product",
            Self::Clmm(_) => "clmm",
        }
    }

    /// Returns `true` for [`ConstantProduct`](Self::ConstantProduct).
    #[must_use]
    pub const fn is_constant_product(&self) -> bool {
        matches!(self, Self::ConstantProduct(_))
    }

    /// Returns `true` for [`Clmm`](Self::Clmm).
    #[must_use]
    pub const fn is_clmm(&self) -> bool {
        matches!(self, Self::Clmm(_))
    }
}

impl From<ConstantProductConfig> for AmmConfig {
    fn from(cfg: ConstantProductConfig) -> Self {
        Self::ConstantProduct(cfg)
    }
}

impl From<ClmmConfig> for AmmConfig {
    fn from(cfg: ClmmConfig) -> Self {
        Self::Clmm(cfg)
    }
}

impl core::fmt::Display for AmmConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConstantProduct(_) => write!(f, "ConstantProduct"),
            Self::Clmm(_) => write!(f, "Clmm"),
        }
    }
}
