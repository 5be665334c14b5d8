//! Exact-input swap request and its outcome.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, AssetId, Timestamp};

/// Parameters of an exact-input swap.
///
/// Built with [`SwapRequest::exact_in`] and refined with the `with_*`
/// methods.  Zero `amount_in` is accepted here and rejected by the pool
/// with [`ZeroInput`](crate::error::AmmError::ZeroInput).
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AccountId, Amount, AssetId, SwapRequest, Timestamp};
///
/// let trader = AccountId::from_bytes([9u8; 32]);
/// let req = SwapRequest::exact_in(AssetId::from_bytes([1u8; 32]), Amount::new(100), trader)
///     .with_min_amount_out(Amount::new(300))
///     .with_deadline(Timestamp::new(1_700_000_000));
/// assert_eq!(req.min_amount_out(), Amount::new(300));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapRequest {
    token_in: AssetId,
    amount_in: Amount,
    min_amount_out: Amount,
    recipient: AccountId,
    deadline: Option<Timestamp>,
}

impl SwapRequest {
    /// Swap `amount_in` of `token_in`, paying the output to `recipient`.
    /// No minimum output and no deadline.
    pub const fn exact_in(token_in: AssetId, amount_in: Amount, recipient: AccountId) -> Self {
        Self {
            token_in,
            amount_in,
            min_amount_out: Amount::ZERO,
            recipient,
            deadline: None,
        }
    }

    /// Sets the slippage floor.
    pub const fn with_min_amount_out(mut self, min_amount_out: Amount) -> Self {
        self.min_amount_out = min_amount_out;
        self
    }

    /// Sets the deadline.
    pub const fn with_deadline(mut self, deadline: Timestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Input asset.
    #[must_use]
    pub const fn token_in(&self) -> AssetId {
        self.token_in
    }

    /// Requested input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Minimum acceptable output.
    pub const fn min_amount_out(&self) -> Amount {
        self.min_amount_out
    }

    /// Output recipient.
    #[must_use]
    pub const fn recipient(&self) -> AccountId {
        self.recipient
    }

    /// Deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Timestamp> {
        self.deadline
    }
}

/// Result of an executed (or quoted) exact-input swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Asset paid in.
    pub token_in: AssetId,
    /// Asset paid out.
    pub token_out: AssetId,
    /// Input actually received by the pool.
    pub amount_in: Amount,
    /// Fee taken from the input.
    pub fee: Amount,
    /// Output delivered.
    pub amount_out: Amount,
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swap(in={}, fee={}, out={})",
            self.amount_in, self.fee, self.amount_out
        )
    }
}
