//! # pairswap
//!
//! Two-asset AMM engine: exchange pools with deterministic fixed-point
//! pricing, liquidity provisioning, and a registry mapping each asset pair
//! to one pool.
//!
//! Two pool families are provided:
//!
//! - **Constant Product** (Uniswap v2 style), `constant-product` feature
//! - **Concentrated Liquidity** (Uniswap v3 style, single active segment),
//!   `clmm` feature
//!
//! All arithmetic is integer-only: amounts are `u128`, intermediates are
//! 256-bit, prices are Q64.96 square roots, and every rounding direction
//! is explicit and favours the pool.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `constant-product` | via `all-pools` | [`ConstantProductPool`](pools::ConstantProductPool) |
//! | `clmm` | via `all-pools` | [`ClmmPool`](pools::ClmmPool) |
//! | `all-pools` | yes | Enables both pool types |
//!
//! # Quick Start
//!
//! ```rust
//! use pairswap::config::{AmmConfig, ConstantProductConfig};
//! use pairswap::domain::{AccountId, Amount, AssetId, CallContext, Liquidity, SwapRequest, Timestamp};
//! use pairswap::ledger::InMemoryLedger;
//! use pairswap::registry::PoolRegistry;
//! use pairswap::traits::SwapPool;
//!
//! let (usdc, weth) = (AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]));
//! let alice = AccountId::from_bytes([0xa1; 32]);
//!
//! // 1. Register a pool
//! let mut registry = PoolRegistry::new();
//! let handle = registry
//!     .create_pool(usdc, weth, &AmmConfig::from(ConstantProductConfig::default()))
//!     .expect("pool created");
//!
//! // 2. Fund the caller and approve the pool account
//! let mut ledger = InMemoryLedger::new();
//! let pool_account = registry.with_pool(handle, |pool| Ok(pool.account())).expect("pool");
//! for asset in [usdc, weth] {
//!     ledger.mint(asset, alice, Amount::new(1_000_000));
//!     ledger.approve(asset, alice, pool_account, Amount::MAX);
//! }
//!
//! // 3. Provide liquidity and swap
//! let ctx = CallContext::new(alice, Timestamp::new(0));
//! let out = registry
//!     .with_constant_product(handle, |pool| {
//!         pool.add_liquidity(&mut ledger, &ctx, Amount::new(1_000), Amount::new(4_000), Liquidity::ZERO, None)?;
//!         pool.swap_exact_in(&mut ledger, &ctx, &SwapRequest::exact_in(usdc, Amount::new(100), alice))
//!     })
//!     .expect("swap succeeded");
//!
//! // 100 in at 30 bp nets 99.7: 4000 × 99.7 / 1099.7
//! assert_eq!(out.amount_out, Amount::new(362));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  AmmConfig + PoolRegistry + a Ledger
//! └──────┬───────┘
//!        │ create_pool / with_pool
//!        ▼
//! ┌──────────────┐
//! │   Registry    │  canonical pair → handle, per-pool try_lock
//! └──────┬───────┘
//!        │ PoolBox (enum dispatch)
//!        ▼
//! ┌──────────────┐
//! │    Pools      │  ConstantProduct, CLMM; atomic against the Ledger
//! └──────┬───────┘
//!        │ Q64.96 / 256-bit math
//!        ▼
//! ┌──────────────┐
//! │ Domain + Math │  Amount, Liquidity, SqrtPrice, mul_div, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`SqrtPrice`](domain::SqrtPrice), [`AssetPair`](domain::AssetPair), etc. |
//! | [`math`]   | 256-bit `mul_div`, integer square roots, liquidity/amount conversions |
//! | [`ledger`] | The [`Ledger`](ledger::Ledger) capability, rollback helper, in-memory ledger |
//! | [`traits`] | [`SwapPool`](traits::SwapPool) and [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Declarative pool blueprints: [`AmmConfig`](config::AmmConfig) and per-pool config structs |
//! | [`pools`]  | Feature-gated pool implementations and [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) arena keyed by canonical pair |
//! | [`events`] | Serialisable pool and registry event records |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
