//! Pool configuration.
//!
//! [`AmmConfig`] is the declarative blueprint for creating a pool; the
//! per-kind structs carry each pool's immutable parameters.  All of them
//! load from any `serde` format and are checked with `validate()` before a
//! pool is built.

mod amm_config;
mod clmm;
mod constant_product;

pub use amm_config::AmmConfig;
pub use clmm::ClmmConfig;
pub use constant_product::{ConstantProductConfig, DEFAULT_MINIMUM_LIQUIDITY, DepositPolicy};
