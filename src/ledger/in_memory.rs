//! Reference ledger kept entirely in memory.

use std::collections::HashMap;

use super::Ledger;
use crate::domain::{AccountId, Amount, AssetId, BasisPoints, Rounding};
use crate::error::LedgerError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct State {
    balances: HashMap<(AssetId, AccountId), Amount>,
    allowances: HashMap<(AssetId, AccountId, AccountId), Amount>,
    supply: HashMap<AssetId, Amount>,
}

/// In-memory [`Ledger`] with allowances and optional fee-on-transfer assets.
///
/// An allowance of [`Amount::MAX`] is unlimited and never decremented.
/// For an asset with a transfer fee the sender is debited the full amount,
/// the recipient is credited `amount − floor(amount × fee / 10 000)` and the
/// difference is burned.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AccountId, Amount, AssetId};
/// use pairswap::ledger::{InMemoryLedger, Ledger};
///
/// let usd = AssetId::from_bytes([1u8; 32]);
/// let (alice, bob) = (AccountId::from_bytes([2u8; 32]), AccountId::from_bytes([3u8; 32]));
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.mint(usd, alice, Amount::new(100));
/// ledger.transfer(usd, alice, bob, Amount::new(30)).expect("funded");
/// assert_eq!(ledger.balance_of(usd, bob), Amount::new(30));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: State,
    transfer_fees: HashMap<AssetId, BasisPoints>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `asset` out of thin air for `account`.
    ///
    /// Saturates at `u128::MAX`; intended for test and simulation setup.
    pub fn mint(&mut self, asset: AssetId, account: AccountId, amount: Amount) {
        let balance = self.state.balances.entry((asset, account)).or_default();
        *balance = Amount::new(balance.get().saturating_add(amount.get()));
        let supply = self.state.supply.entry(asset).or_default();
        *supply = Amount::new(supply.get().saturating_add(amount.get()));
    }

    /// Sets the amount `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, asset: AssetId, owner: AccountId, spender: AccountId, amount: Amount) {
        self.state
            .allowances
            .insert((asset, owner, spender), amount);
    }

    /// Current allowance of `spender` over `owner`'s `asset`.
    #[must_use]
    pub fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> Amount {
        self.state
            .allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Makes `asset` burn `fee` of every transfer.
    pub fn set_transfer_fee(&mut self, asset: AssetId, fee: BasisPoints) {
        self.transfer_fees.insert(asset, fee);
    }

    /// Total amount of `asset` in existence.
    #[must_use]
    pub fn total_supply(&self, asset: AssetId) -> Amount {
        self.state.supply.get(&asset).copied().unwrap_or_default()
    }

    fn move_balance(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance_of(asset, from);
        let remaining = from_balance
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance)?;

        let fee = match self.transfer_fees.get(&asset) {
            Some(bps) => bps
                .apply(amount, Rounding::Down)
                .map_err(|_| LedgerError::BalanceOverflow)?,
            None => Amount::ZERO,
        };
        let credited = amount
            .checked_sub(&fee)
            .ok_or(LedgerError::InsufficientBalance)?;

        let updated = self
            .balance_of(asset, to)
            .checked_add(&credited)
            .ok_or(LedgerError::BalanceOverflow)?;

        // both sides validated, nothing written before this point
        self.state.balances.insert((asset, from), remaining);
        self.state.balances.insert((asset, to), updated);

        if !fee.is_zero() {
            let supply = self.state.supply.entry(asset).or_default();
            *supply = supply.checked_sub(&fee).unwrap_or_default();
        }
        Ok(())
    }
}

impl Ledger for InMemoryLedger {
    type Checkpoint = InMemoryCheckpoint;

    fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        self.state
            .balances
            .get(&(asset, account))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if from == to {
            return if self.balance_of(asset, from) >= amount {
                Ok(())
            } else {
                Err(LedgerError::InsufficientBalance)
            };
        }
        self.move_balance(asset, from, to, amount)
    }

    fn transfer_from(
        &mut self,
        asset: AssetId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let allowance = self.allowance(asset, from, spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance);
        }
        self.transfer(asset, from, to, amount)?;
        if allowance != Amount::MAX {
            self.state.allowances.insert(
                (asset, from, spender),
                Amount::new(allowance.get() - amount.get()),
            );
        }
        Ok(())
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        InMemoryCheckpoint(self.state.clone())
    }

    fn rollback(&mut self, checkpoint: Self::Checkpoint) {
        self.state = checkpoint.0;
    }
}

/// Snapshot of an [`InMemoryLedger`].
#[derive(Debug, Clone)]
pub struct InMemoryCheckpoint(State);
