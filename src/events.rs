//! Records emitted by pools and the registry.
//!
//! Pools append to an in-memory log that callers drain with
//! `drain_events()`; each record is also emitted through `tracing` at the
//! moment it is produced.  Every type here serialises with `serde`.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, AssetId, AssetPair, Liquidity, PriceRange};

/// State changes of a single pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PoolEvent {
    /// Liquidity shares issued by a constant-product pool.
    LiquidityMinted {
        /// Depositor.
        provider: AccountId,
        /// Asset0 received.
        amount0: Amount,
        /// Asset1 received.
        amount1: Amount,
        /// Shares credited to the provider.
        liquidity: Liquidity,
    },
    /// Liquidity shares redeemed from a constant-product pool.
    LiquidityBurned {
        /// Share holder.
        provider: AccountId,
        /// Receiver of the assets.
        recipient: AccountId,
        /// Asset0 paid.
        amount0: Amount,
        /// Asset1 paid.
        amount1: Amount,
        /// Shares burned.
        liquidity: Liquidity,
    },
    /// Liquidity added to a concentrated range position.
    PositionMinted {
        /// Position owner.
        owner: AccountId,
        /// Range of the position.
        range: PriceRange,
        /// Liquidity added.
        liquidity: Liquidity,
        /// Asset0 pulled.
        amount0: Amount,
        /// Asset1 pulled.
        amount1: Amount,
    },
    /// Liquidity removed from a concentrated range position.
    PositionBurned {
        /// Position owner.
        owner: AccountId,
        /// Receiver of the assets.
        recipient: AccountId,
        /// Range of the position.
        range: PriceRange,
        /// Liquidity removed.
        liquidity: Liquidity,
        /// Asset0 paid.
        amount0: Amount,
        /// Asset1 paid.
        amount1: Amount,
    },
    /// An executed exact-input swap.
    Swap {
        /// Trader.
        sender: AccountId,
        /// Output receiver.
        recipient: AccountId,
        /// Asset paid in.
        token_in: AssetId,
        /// Input received by the pool.
        amount_in: Amount,
        /// Fee taken from the input.
        fee: Amount,
        /// Output paid.
        amount_out: Amount,
        /// Pool state before and after.
        state: SwapState,
    },
    /// Reserves resynchronised to ledger balances.
    Sync {
        /// Asset0 reserve.
        reserve0: Amount,
        /// Asset1 reserve.
        reserve1: Amount,
    },
}

/// Pricing state around a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapState {
    /// Reserves of a constant-product pool.
    Reserves {
        /// `(reserve0, reserve1)` before the swap.
        before: (Amount, Amount),
        /// `(reserve0, reserve1)` after the swap.
        after: (Amount, Amount),
    },
    /// Sqrt price of a concentrated-liquidity pool.
    SqrtPrice {
        /// Q64.96 price before the swap.
        before: U256,
        /// Q64.96 price after the swap.
        after: U256,
        /// Active liquidity the swap ran against.
        liquidity: Liquidity,
    },
}

/// Registry-level records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A pool was registered.
    PoolCreated {
        /// Canonical pair.
        pair: AssetPair,
        /// Ledger account owned by the pool.
        account: AccountId,
        /// `"constant_product"` or `"clmm"`.
        kind: String,
        /// Arena index of the pool.
        index: usize,
    },
}
