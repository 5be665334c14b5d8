//! Feature-gated pool implementations and the [`PoolBox`] dispatch enum.
//!
//! Each pool type is behind its own Cargo feature flag.  The [`PoolBox`]
//! enum provides static dispatch across all enabled pool types, letting
//! the registry keep heterogeneous pools without `dyn` trait objects.
//!
//! # Pool Types
//!
//! | Feature | Pool | Style |
//! |---------|------|-------|
//! | `constant-product` | [`ConstantProductPool`] | Uniswap V2 |
//! | `clmm` | [`ClmmPool`] | Uniswap V3, single active segment |

#[cfg(feature = "clmm")]
pub mod clmm;
#[cfg(feature = "constant-product")]
pub mod constant_product;

mod pool_box;

#[cfg(all(test, feature = "all-pools"))]
mod proptest_properties;

#[cfg(feature = "clmm")]
pub use clmm::{ClmmPool, PositionMinted};
#[cfg(feature = "constant-product")]
pub use constant_product::{ConstantProductPool, LiquidityMinted};
pub use pool_box::PoolBox;
