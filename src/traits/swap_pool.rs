//! Behaviour shared by every pool kind.
//!
//! [`SwapPool`] covers what a router needs regardless of the pricing
//! curve: identity, fee, quoting and exact-input execution against a
//! [`Ledger`], plus the event log.
//!
//! # Fee deduction
//!
//! Every implementation takes the fee from the input the pool actually
//! received before pricing, without dropping the fractional part:
//!
//! ```text
//! net_input  = received × (10_000 − fee_bps) / 10_000   // kept exact
//! amount_out = curve(net_input)                         // rounded down
//! fee        = floor(received × fee_bps / 10_000)       // reported
//! ```
//!
//! Pools are dispatched through the `PoolBox` enum, so the trait has
//! generic methods and is not object safe.

use crate::domain::{AccountId, Amount, AssetId, AssetPair, CallContext, FeeTier, SwapOutcome, SwapRequest};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::ledger::Ledger;

/// Core trait for all pools.
pub trait SwapPool {
    /// The canonical pair served by the pool.
    fn asset_pair(&self) -> &AssetPair;

    /// Ledger account holding the pool's assets.
    fn account(&self) -> AccountId;

    /// Fee charged on swap input.
    fn fee_tier(&self) -> FeeTier;

    /// Prices an exact-input swap of `amount_in` without executing it.
    ///
    /// The quote assumes the pool receives the full `amount_in`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidToken`], [`AmmError::ZeroInput`],
    /// [`AmmError::NoOutput`] and the pool's state-exhaustion errors.
    fn quote_exact_in(&self, token_in: AssetId, amount_in: Amount) -> Result<SwapOutcome, AmmError>;

    /// Executes an exact-input swap.
    ///
    /// Atomic: on error neither the pool nor `ledger` is changed.
    ///
    /// # Errors
    ///
    /// [`AmmError::Expired`] past the deadline,
    /// [`AmmError::SlippageExceeded`] below the requested minimum, plus the
    /// errors of [`quote_exact_in`](Self::quote_exact_in) and ledger
    /// transfer failures.
    fn swap_exact_in<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        request: &SwapRequest,
    ) -> Result<SwapOutcome, AmmError>;

    /// Removes and returns every event recorded since the last drain.
    fn drain_events(&mut self) -> Vec<PoolEvent>;
}
