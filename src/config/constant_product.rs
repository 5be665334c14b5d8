//! Configuration for constant-product pools.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, FeeTier, Liquidity};
use crate::error::AmmError;

/// Shares permanently locked by the first deposit unless configured
/// otherwise.
pub const DEFAULT_MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);

/// How a deposit into a non-empty pool is reconciled with the reserve
/// ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    /// Reject deposits whose ratio differs from the reserves.
    ExactRatio,
    /// Trim the larger side to the reserve ratio and pull only what is
    /// needed.
    #[default]
    Optimal,
}

/// Immutable parameters of a constant-product pool (`x · y = k`).
///
/// # Defaults
///
/// | Field | Default |
/// |-------|---------|
/// | `fee` | 30 bp |
/// | `fee_recipient` | none, fees stay with liquidity providers |
/// | `minimum_liquidity` | 1 000 shares |
/// | `deposit_policy` | [`DepositPolicy::Optimal`] |
///
/// # Examples
///
/// ```
/// use pairswap::config::{ConstantProductConfig, DepositPolicy};
/// use pairswap::domain::{FeeTier, Liquidity};
///
/// let cfg = ConstantProductConfig::new(FeeTier::TIER_0_05_PERCENT)
///     .expect("fee in range")
///     .with_minimum_liquidity(Liquidity::ZERO)
///     .with_deposit_policy(DepositPolicy::ExactRatio);
/// assert_eq!(cfg.fee().basis_points().get(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantProductConfig {
    fee: FeeTier,
    fee_recipient: Option<AccountId>,
    minimum_liquidity: Liquidity,
    deposit_policy: DepositPolicy,
}

impl Default for ConstantProductConfig {
    fn default() -> Self {
        Self {
            fee: FeeTier::default(),
            fee_recipient: None,
            minimum_liquidity: DEFAULT_MINIMUM_LIQUIDITY,
            deposit_policy: DepositPolicy::default(),
        }
    }
}

impl ConstantProductConfig {
    /// Creates a config with `fee` and defaults elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] above 1 000 bp.
    pub fn new(fee: FeeTier) -> Result<Self, AmmError> {
        let config = Self {
            fee,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sends the swap fee to `recipient` instead of leaving it in the pool.
    #[must_use]
    pub const fn with_fee_recipient(mut self, recipient: AccountId) -> Self {
        self.fee_recipient = Some(recipient);
        self
    }

    /// Sets the number of shares locked on the first deposit.
    #[must_use]
    pub const fn with_minimum_liquidity(mut self, minimum_liquidity: Liquidity) -> Self {
        self.minimum_liquidity = minimum_liquidity;
        self
    }

    /// Sets the deposit policy.
    #[must_use]
    pub const fn with_deposit_policy(mut self, deposit_policy: DepositPolicy) -> Self {
        self.deposit_policy = deposit_policy;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidFee`] above 1 000 bp;
    /// [`AmmError::InvalidConfiguration`] if the fee recipient is the burn
    /// account.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee.validate()?;
        if self.fee_recipient == Some(AccountId::BURN) {
            return Err(AmmError::InvalidConfiguration(
                "fee recipient must not be the burn account",
            ));
        }
        Ok(())
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeTier {
        self.fee
    }

    /// Account receiving swap fees, if any.
    #[must_use]
    pub const fn fee_recipient(&self) -> Option<AccountId> {
        self.fee_recipient
    }

    /// Shares locked by the first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Liquidity {
        self.minimum_liquidity
    }

    /// Deposit policy for non-empty pools.
    #[must_use]
    pub const fn deposit_policy(&self) -> DepositPolicy {
        self.deposit_policy
    }
}
