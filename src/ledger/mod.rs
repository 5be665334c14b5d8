//! The external asset ledger as seen by a pool.
//!
//! Pools never keep their own view of who holds what: every movement goes
//! through a [`Ledger`], and every reserve update is derived from balances
//! read back from it.  [`InMemoryLedger`] is a complete implementation used
//! by the tests and suitable for simulation.
//!
//! # Atomicity
//!
//! A pool operation may issue several transfers.  [`atomically`] wraps the
//! operation in a checkpoint so that a failure in any later step restores
//! every earlier transfer.

mod in_memory;

pub use in_memory::InMemoryLedger;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::{AmmError, LedgerError};

/// Balance queries and transfers over fungible assets.
pub trait Ledger {
    /// Opaque snapshot returned by [`checkpoint`](Self::checkpoint).
    type Checkpoint;

    /// Balance of `account` in `asset`.  Unknown accounts hold zero.
    fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`, acting as `from`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] or
    /// [`LedgerError::BalanceOverflow`].
    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Moves `amount` of `asset` from `from` to `to` on behalf of
    /// `spender`, consuming `from`'s allowance to `spender`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientAllowance`] in addition to the errors of
    /// [`transfer`](Self::transfer).
    fn transfer_from(
        &mut self,
        asset: AssetId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Captures the current state.
    fn checkpoint(&self) -> Self::Checkpoint;

    /// Restores a state captured by [`checkpoint`](Self::checkpoint).
    fn rollback(&mut self, checkpoint: Self::Checkpoint);
}

/// Runs `op` against `ledger`, restoring the ledger if `op` fails.
///
/// # Errors
///
/// Returns whatever `op` returns; the ledger is rolled back first.
pub fn atomically<L, T, F>(ledger: &mut L, op: F) -> Result<T, AmmError>
where
    L: Ledger,
    F: FnOnce(&mut L) -> Result<T, AmmError>,
{
    let checkpoint = ledger.checkpoint();
    match op(ledger) {
        Ok(value) => Ok(value),
        Err(err) => {
            ledger.rollback(checkpoint);
            tracing::warn!(%err, "operation failed, ledger rolled back");
            Err(err)
        }
    }
}

/// Pulls `amount` of `asset` from `from` into `pool` and returns what the
/// pool actually received, which is less than `amount` for assets that
/// charge a transfer fee.
///
/// # Errors
///
/// Propagates the ledger's transfer error.
pub fn pull_observed<L: Ledger>(
    ledger: &mut L,
    asset: AssetId,
    from: AccountId,
    pool: AccountId,
    amount: Amount,
) -> Result<Amount, AmmError> {
    let before = ledger.balance_of(asset, pool);
    ledger.transfer_from(asset, pool, from, pool, amount)?;
    let after = ledger.balance_of(asset, pool);
    let received = after
        .checked_sub(&before)
        .ok_or(crate::error::ArithmeticError::Underflow("pool balance decreased on deposit"))?;
    tracing::debug!(%asset, requested = %amount, %received, "observed deposit");
    Ok(received)
}
