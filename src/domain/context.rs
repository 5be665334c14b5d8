//! Invocation context: who is calling and when.

use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::AccountId;
use crate::error::AmmError;

/// Seconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from raw seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Raw seconds.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Reads the system clock.  A clock set before the epoch reads as zero.
    #[must_use]
    pub fn now() -> Self {
        Self(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs()),
        )
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// The caller of a pool operation and the instant it was invoked.
///
/// Every deadline check inside one operation uses the same `timestamp`.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AccountId, CallContext, Timestamp};
///
/// let ctx = CallContext::new(AccountId::from_bytes([7u8; 32]), Timestamp::new(1_000));
/// assert!(ctx.check_deadline(Some(Timestamp::new(1_000))).is_ok());
/// assert!(ctx.check_deadline(Some(Timestamp::new(999))).is_err());
/// assert!(ctx.check_deadline(None).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    caller: AccountId,
    timestamp: Timestamp,
}

impl CallContext {
    /// Creates a context with an explicit timestamp.
    #[must_use]
    pub const fn new(caller: AccountId, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }

    /// Creates a context stamped with the system clock.
    #[must_use]
    pub fn now(caller: AccountId) -> Self {
        Self::new(caller, Timestamp::now())
    }

    /// The invoking account.
    #[must_use]
    pub const fn caller(&self) -> AccountId {
        self.caller
    }

    /// The invocation time.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Fails once the invocation time is strictly after `deadline`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Expired`] when `timestamp > deadline`.
    pub const fn check_deadline(&self, deadline: Option<Timestamp>) -> Result<(), AmmError> {
        match deadline {
            Some(deadline) if self.timestamp.0 > deadline.0 => Err(AmmError::Expired {
                now: self.timestamp.0,
                deadline: deadline.0,
            }),
            _ => Ok(()),
        }
    }
}
