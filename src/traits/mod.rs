//! Trait seams between pools, the registry and callers.
//!
//! [`SwapPool`] is implemented by every pool kind and by the `PoolBox`
//! dispatch enum; [`FromConfig`] is how the registry constructs pools.

mod from_config;
mod swap_pool;

pub use from_config::FromConfig;
pub use swap_pool::SwapPool;
