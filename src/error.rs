//! Unified error types for the pairswap engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Fixed-point failures surface as [`ArithmeticError`] and
//! ledger failures as [`LedgerError`]; both convert into `AmmError` via
//! `?`.
//!
//! Every variant maps to one [`ErrorCategory`], which tells the caller
//! whether retrying with adjusted input can succeed.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Failures of the fixed-point core.
///
/// These indicate a logic or bound-configuration bug.  The operation that
/// produced one is aborted without partial effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// A result exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
    /// A subtraction would have gone negative.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),
    /// Division by zero.
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    /// A post-condition of a pricing formula did not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),
}

/// Failures reported by a [`Ledger`](crate::ledger::Ledger) transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The sender does not hold enough of the asset.
    #[error("insufficient balance")]
    InsufficientBalance,
    /// The spender is not approved for the requested amount.
    #[error("insufficient allowance")]
    InsufficientAllowance,
    /// The recipient balance would overflow.
    #[error("balance overflow")]
    BalanceOverflow,
}

/// Coarse classification of an [`AmmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller error; safe to retry with corrected input.
    Precondition,
    /// Economic rejection; re-quote and retry.
    EconomicPolicy,
    /// Transient until someone supplies liquidity.
    StateExhaustion,
    /// Deadline passed; resubmit with a fresh deadline.
    Temporal,
    /// Pool busy with an in-flight operation.
    Concurrency,
    /// The external ledger refused a transfer.
    Transfer,
    /// Bug in the fixed-point core or its bounds.
    Fatal,
}

/// Error type returned by every fallible pool, registry and ledger-facing
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Range bounds are not `0 < lower < upper <= MAX`.
    #[error("invalid price range: {0}")]
    InvalidRange(&'static str),
    /// Both sides of a pair are the same asset.
    #[error("identical assets")]
    IdenticalAssets,
    /// The null identifier was supplied as an asset or as a liquidity
    /// provider.
    #[error("zero address")]
    ZeroAddress,
    /// The asset is not part of the pool pair.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),
    /// A required amount is zero.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),
    /// A swap was requested with zero input.
    #[error("zero swap input")]
    ZeroInput,
    /// Derived liquidity rounded down to zero.
    #[error("zero liquidity")]
    ZeroLiquidity,
    /// Deposit does not match the reserve ratio under the exact-ratio policy.
    #[error("deposit ratio does not match reserves")]
    RatioMismatch,
    /// Configuration rejected during validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// Fee outside the supported range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),
    /// A pool for this canonical pair already exists.
    #[error("pair already exists")]
    PairExists,
    /// The handle does not refer to a registered pool.
    #[error("pool not found")]
    PoolNotFound,
    /// The handle refers to a pool of a different kind.
    #[error("pool kind mismatch: expected {0}")]
    WrongPoolKind(&'static str),

    /// Output (or minted amount) below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutput,
    /// Swap output below the caller's minimum.
    #[error("slippage exceeded: out {actual}, minimum {minimum}")]
    SlippageExceeded {
        /// Computed output.
        actual: u128,
        /// Caller's minimum.
        minimum: u128,
    },
    /// Deposit too small to mint any share.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,
    /// Burn exceeds the stored position liquidity.
    #[error("insufficient position liquidity: have {available}, requested {requested}")]
    InsufficientPosition {
        /// Liquidity stored at the key.
        available: u128,
        /// Liquidity requested.
        requested: u128,
    },
    /// Caller holds fewer liquidity shares than it tries to redeem.
    #[error("insufficient liquidity shares")]
    InsufficientShares,
    /// The ledger delivered less than the pool requires.
    #[error("insufficient input delivered: required {required}, received {received}")]
    InsufficientInput {
        /// Amount implied by the operation.
        required: u128,
        /// Amount observed on the ledger.
        received: u128,
    },
    /// The pricing formula produced zero output.
    #[error("no output")]
    NoOutput,

    /// A reserve is zero.
    #[error("pool empty")]
    PoolEmpty,
    /// No liquidity is deployed at the current price.
    #[error("no active liquidity")]
    NoActiveLiquidity,
    /// No liquidity shares exist.
    #[error("no liquidity")]
    NoLiquidity,
    /// The swap would move the price past the active segment.
    #[error("active liquidity range exhausted")]
    RangeExhausted,

    /// The operation was invoked after its deadline.
    #[error("deadline expired: now {now}, deadline {deadline}")]
    Expired {
        /// Invocation time.
        now: u64,
        /// Caller's deadline.
        deadline: u64,
    },

    /// The pool is already executing an operation.
    #[error("pool locked")]
    Locked,

    /// A ledger transfer failed.
    #[error("transfer failed: {0}")]
    Transfer(#[from] LedgerError),

    /// Fixed-point failure.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl AmmError {
    /// Returns the taxonomy bucket of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRange(_)
            | Self::IdenticalAssets
            | Self::ZeroAddress
            | Self::InvalidToken(_)
            | Self::ZeroAmount(_)
            | Self::ZeroInput
            | Self::ZeroLiquidity
            | Self::RatioMismatch
            | Self::InvalidConfiguration(_)
            | Self::InvalidFee(_)
            | Self::PairExists
            | Self::PoolNotFound
            | Self::WrongPoolKind(_) => ErrorCategory::Precondition,
            Self::InsufficientOutput
            | Self::SlippageExceeded { .. }
            | Self::InsufficientLiquidityMinted
            | Self::InsufficientPosition { .. }
            | Self::InsufficientShares
            | Self::InsufficientInput { .. }
            | Self::NoOutput => ErrorCategory::EconomicPolicy,
            Self::PoolEmpty | Self::NoActiveLiquidity | Self::NoLiquidity | Self::RangeExhausted => {
                ErrorCategory::StateExhaustion
            }
            Self::Expired { .. } => ErrorCategory::Temporal,
            Self::Locked => ErrorCategory::Concurrency,
            Self::Transfer(_) => ErrorCategory::Transfer,
            Self::Arithmetic(_) => ErrorCategory::Fatal,
        }
    }

    /// Returns `true` unless the error is fatal.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Fatal)
    }
}
