//! Constant-product pool (Uniswap V2 style).
//!
//! The swap invariant is `x × y = k` over the two reserves.  Fees are
//! deducted from the input the pool actually received **before** the
//! pricing formula is applied.
//!
//! # Swap algorithm (asset `in` → asset `out`)
//!
//! 1. `received` = observed increase of the pool's `in` balance
//! 2. `net = received × (10 000 − fee_bps)`, kept scaled by 10 000 so a
//!    fraction of a unit of fee is still charged
//! 3. `amount_out = reserve_out × net / (reserve_in × 10 000 + net)` (floor)
//! 4. the reported fee is `floor(received × fee_bps / 10 000)`; only this
//!    whole part can be paid to a fee recipient, the fraction stays in
//!    the pool
//! 5. reserves resynchronise to the pool's ledger balances
//!
//! # Invariant
//!
//! `reserve0 × reserve1` after a swap is at least its value before: the
//! output is rounded down and the fee either stays in the pool or is paid
//! out of the input side only.

use std::collections::BTreeMap;

use alloy_primitives::U256;

use crate::config::{ConstantProductConfig, DepositPolicy};
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BPS_DENOMINATOR, CallContext, FeeTier, Liquidity,
    Rounding, Side, SwapOutcome, SwapRequest, Timestamp,
};
use crate::error::{AmmError, ArithmeticError};
use crate::events::{PoolEvent, SwapState};
use crate::ledger::{Ledger, atomically, pull_observed};
use crate::math::{CheckedArithmetic, Q96, integer_sqrt_u256, mul_div};
use crate::traits::{FromConfig, SwapPool};

/// Outcome of [`ConstantProductPool::add_liquidity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityMinted {
    /// Asset0 received by the pool.
    pub amount0: Amount,
    /// Asset1 received by the pool.
    pub amount1: Amount,
    /// Shares credited to the caller.
    pub liquidity: Liquidity,
}

/// A constant-product pool (`x · y = k`) with fungible liquidity shares.
///
/// # State
///
/// - `reserve0` / `reserve1`: last synchronised ledger balances of the
///   pool account, each within 112 bits
/// - `total_supply`: outstanding shares, including the locked minimum
/// - `shares`: per-holder share balances
/// - `fees0` / `fees1`: lifetime fee counters
///
/// # Example
///
/// ```rust
/// use pairswap::config::ConstantProductConfig;
/// use pairswap::domain::{AccountId, Amount, AssetId, AssetPair, CallContext, SwapRequest, Timestamp};
/// use pairswap::ledger::InMemoryLedger;
/// use pairswap::pools::ConstantProductPool;
/// use pairswap::traits::SwapPool;
///
/// let (a, b) = (AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]));
/// let pair = AssetPair::new(a, b).expect("distinct");
/// let mut pool = ConstantProductPool::new(pair, &ConstantProductConfig::default()).expect("valid");
///
/// let alice = AccountId::from_bytes([7u8; 32]);
/// let mut ledger = InMemoryLedger::new();
/// for asset in [a, b] {
///     ledger.mint(asset, alice, Amount::new(10_000));
///     ledger.approve(asset, alice, pool.account(), Amount::MAX);
/// }
///
/// let ctx = CallContext::new(alice, Timestamp::new(0));
/// let minted = pool
///     .add_liquidity(&mut ledger, &ctx, Amount::new(1_000), Amount::new(4_000), pairswap::domain::Liquidity::ZERO, None)
///     .expect("first deposit");
/// assert_eq!(minted.liquidity.get(), 1_000); // 2_000 minus the 1_000 locked
///
/// let out = pool
///     .swap_exact_in(&mut ledger, &ctx, &SwapRequest::exact_in(a, Amount::new(100), alice))
///     .expect("swap");
/// // net 99.7: 4000 × 99.7 / 1099.7
/// assert_eq!(out.amount_out, Amount::new(362));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    pair: AssetPair,
    account: AccountId,
    config: ConstantProductConfig,
    reserve0: Amount,
    reserve1: Amount,
    total_supply: Liquidity,
    shares: BTreeMap<AccountId, Liquidity>,
    fees0: Amount,
    fees1: Amount,
    events: Vec<PoolEvent>,
}

impl ConstantProductPool {
    /// Creates an empty pool for `pair`.
    ///
    /// # Errors
    ///
    /// Propagates [`ConstantProductConfig::validate`].
    pub fn new(pair: AssetPair, config: &ConstantProductConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            pair,
            account: pair.pool_account(),
            config: *config,
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            total_supply: Liquidity::ZERO,
            shares: BTreeMap::new(),
            fees0: Amount::ZERO,
            fees1: Amount::ZERO,
            events: Vec::new(),
        })
    }

    /// Current `(reserve0, reserve1)`.
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve0, self.reserve1)
    }

    /// Reserve of `asset`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidToken`] if `asset` is not in the pair.
    pub fn reserve_of(&self, asset: AssetId) -> Result<Amount, AmmError> {
        Ok(match self.pair.side_of(&asset)? {
            Side::Low => self.reserve0,
            Side::High => self.reserve1,
        })
    }

    /// Outstanding shares, including the locked minimum.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn share_balance(&self, holder: AccountId) -> Liquidity {
        self.shares.get(&holder).copied().unwrap_or_default()
    }

    /// Lifetime fees charged, per asset.
    pub const fn accumulated_fees(&self) -> (Amount, Amount) {
        (self.fees0, self.fees1)
    }

    /// The pool's configuration.
    #[must_use]
    pub const fn config(&self) -> &ConstantProductConfig {
        &self.config
    }

    /// `reserve0 × reserve1`.
    #[must_use]
    pub fn invariant(&self) -> U256 {
        self.reserve0.to_u256() * self.reserve1.to_u256()
    }

    /// Marginal price of `base` in units of the other asset, Q96-scaled:
    /// `reserve_quote × 2^96 / reserve_base`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidToken`] or [`AmmError::PoolEmpty`].
    pub fn spot_price(&self, base: AssetId) -> Result<U256, AmmError> {
        let (reserve_base, reserve_quote) = self.oriented_reserves(self.pair.side_of(&base)?);
        if reserve_base.is_zero() || reserve_quote.is_zero() {
            return Err(AmmError::PoolEmpty);
        }
        Ok(mul_div(reserve_quote.to_u256(), Q96, reserve_base.to_u256())?)
    }

    // -- liquidity ----------------------------------------------------------

    /// Deposits both assets and mints shares to the caller.
    ///
    /// The first deposit mints `floor(sqrt(amount0 × amount1))` shares, of
    /// which `minimum_liquidity` go to the burn account.  Later deposits
    /// are reconciled with the reserve ratio per the configured
    /// [`DepositPolicy`] and mint
    /// `min(amount0 × supply / reserve0, amount1 × supply / reserve1)`
    /// computed from what the ledger actually delivered.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past `deadline`.
    /// - [`AmmError::ZeroAddress`] if the caller is the burn account.
    /// - [`AmmError::ZeroAmount`] if either desired amount is zero.
    /// - [`AmmError::RatioMismatch`] under [`DepositPolicy::ExactRatio`].
    /// - [`AmmError::InsufficientLiquidityMinted`] if no share (or no share
    ///   beyond the locked minimum) would be minted.
    /// - [`AmmError::InsufficientOutput`] below `min_liquidity_out`.
    /// - Ledger transfer failures.
    pub fn add_liquidity<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        amount0_desired: Amount,
        amount1_desired: Amount,
        min_liquidity_out: Liquidity,
        deadline: Option<Timestamp>,
    ) -> Result<LiquidityMinted, AmmError> {
        atomically(ledger, |ledger| {
            self.add_liquidity_inner(
                ledger,
                ctx,
                amount0_desired,
                amount1_desired,
                min_liquidity_out,
                deadline,
            )
        })
    }

    fn add_liquidity_inner<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        amount0_desired: Amount,
        amount1_desired: Amount,
        min_liquidity_out: Liquidity,
        deadline: Option<Timestamp>,
    ) -> Result<LiquidityMinted, AmmError> {
        ctx.check_deadline(deadline)?;
        if amount0_desired.is_zero() || amount1_desired.is_zero() {
            return Err(AmmError::ZeroAmount("both desired amounts must be non-zero"));
        }

        let provider = ctx.caller();
        // the burn account holds the locked minimum
        if provider == AccountId::BURN {
            return Err(AmmError::ZeroAddress);
        }
        let (pull0, pull1) = self.deposit_amounts(amount0_desired, amount1_desired)?;
        let received0 = pull_observed(ledger, self.pair.low(), provider, self.account, pull0)?;
        let received1 = pull_observed(ledger, self.pair.high(), provider, self.account, pull1)?;

        let minimum = self.config.minimum_liquidity();
        let (liquidity, locked) = if self.total_supply.is_zero() {
            let root = Liquidity::from_u256(integer_sqrt_u256(
                received0.to_u256() * received1.to_u256(),
            ))?;
            if root <= minimum || root.is_zero() {
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            (root.safe_sub(&minimum)?, minimum)
        } else {
            let from0 = self.total_supply.scale(received0.get(), self.reserve0.get(), Rounding::Down)?;
            let from1 = self.total_supply.scale(received1.get(), self.reserve1.get(), Rounding::Down)?;
            (from0.min(from1), Liquidity::ZERO)
        };
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        if liquidity < min_liquidity_out {
            return Err(AmmError::InsufficientOutput);
        }

        let (balance0, balance1) = self.observed_balances(ledger)?;
        let total_supply = self.total_supply.safe_add(&liquidity)?.safe_add(&locked)?;
        let provider_shares = self.share_balance(provider).safe_add(&liquidity)?;

        // commit
        if !locked.is_zero() {
            self.shares.insert(AccountId::BURN, locked);
        }
        self.shares.insert(provider, provider_shares);
        self.total_supply = total_supply;
        tracing::info!(
            pool = %self.account,
            %provider,
            amount0 = %received0,
            amount1 = %received1,
            %liquidity,
            "liquidity added"
        );
        self.emit(PoolEvent::LiquidityMinted {
            provider,
            amount0: received0,
            amount1: received1,
            liquidity,
        });
        self.set_reserves(balance0, balance1);

        Ok(LiquidityMinted {
            amount0: received0,
            amount1: received1,
            liquidity,
        })
    }

    /// Amounts to pull for a deposit into the current pool.
    fn deposit_amounts(
        &self,
        amount0_desired: Amount,
        amount1_desired: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        if self.total_supply.is_zero() {
            return Ok((amount0_desired, amount1_desired));
        }
        if self.reserve0.is_zero() || self.reserve1.is_zero() {
            return Err(AmmError::PoolEmpty);
        }
        match self.config.deposit_policy() {
            DepositPolicy::ExactRatio => {
                let lhs = self.reserve0.to_u256() * amount1_desired.to_u256();
                let rhs = self.reserve1.to_u256() * amount0_desired.to_u256();
                if lhs != rhs {
                    return Err(AmmError::RatioMismatch);
                }
                Ok((amount0_desired, amount1_desired))
            }
            DepositPolicy::Optimal => {
                let amount1_optimal =
                    amount0_desired.scale(self.reserve1.get(), self.reserve0.get(), Rounding::Down)?;
                if amount1_optimal <= amount1_desired {
                    tracing::debug!(%amount0_desired, %amount1_optimal, "deposit trimmed on asset1");
                    return Ok((amount0_desired, amount1_optimal));
                }
                let amount0_optimal =
                    amount1_desired.scale(self.reserve0.get(), self.reserve1.get(), Rounding::Down)?;
                tracing::debug!(%amount0_optimal, %amount1_desired, "deposit trimmed on asset0");
                Ok((amount0_optimal, amount1_desired))
            }
        }
    }

    /// Burns the caller's shares and pays out the proportional reserves.
    ///
    /// Each asset pays `liquidity_in × reserve / total_supply`, rounded down.
    /// Balances donated since the last resync are not paid out; they join
    /// the reserves when the pool resynchronises afterwards.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] past `deadline`.
    /// - [`AmmError::ZeroAddress`] if the caller is the burn account.
    /// - [`AmmError::ZeroAmount`] for zero `liquidity_in`.
    /// - [`AmmError::NoLiquidity`] when no shares exist.
    /// - [`AmmError::InsufficientShares`] if the caller holds fewer shares.
    /// - [`AmmError::NoOutput`] if both payouts round to zero.
    /// - [`AmmError::InsufficientOutput`] below either minimum.
    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        liquidity_in: Liquidity,
        min_amount0: Amount,
        min_amount1: Amount,
        recipient: AccountId,
        deadline: Option<Timestamp>,
    ) -> Result<(Amount, Amount), AmmError> {
        atomically(ledger, |ledger| {
            ctx.check_deadline(deadline)?;
            if liquidity_in.is_zero() {
                return Err(AmmError::ZeroAmount("liquidity to remove must be non-zero"));
            }
            if self.total_supply.is_zero() {
                return Err(AmmError::NoLiquidity);
            }
            let provider = ctx.caller();
            if provider == AccountId::BURN {
                return Err(AmmError::ZeroAddress);
            }
            let held = self.share_balance(provider);
            if held < liquidity_in {
                return Err(AmmError::InsufficientShares);
            }

            let supply = self.total_supply.get();
            let amount0 = self.reserve0.scale(liquidity_in.get(), supply, Rounding::Down)?;
            let amount1 = self.reserve1.scale(liquidity_in.get(), supply, Rounding::Down)?;
            if amount0.is_zero() && amount1.is_zero() {
                return Err(AmmError::NoOutput);
            }
            if amount0 < min_amount0 || amount1 < min_amount1 {
                return Err(AmmError::InsufficientOutput);
            }

            ledger.transfer(self.pair.low(), self.account, recipient, amount0)?;
            ledger.transfer(self.pair.high(), self.account, recipient, amount1)?;
            let (new0, new1) = self.observed_balances(ledger)?;
            let total_supply = self.total_supply.safe_sub(&liquidity_in)?;
            let remaining = held.safe_sub(&liquidity_in)?;

            // commit
            if remaining.is_zero() {
                self.shares.remove(&provider);
            } else {
                self.shares.insert(provider, remaining);
            }
            self.total_supply = total_supply;
            tracing::info!(
                pool = %self.account,
                %provider,
                %recipient,
                %amount0,
                %amount1,
                liquidity = %liquidity_in,
                "liquidity removed"
            );
            self.emit(PoolEvent::LiquidityBurned {
                provider,
                recipient,
                amount0,
                amount1,
                liquidity: liquidity_in,
            });
            self.set_reserves(new0, new1);
            Ok((amount0, amount1))
        })
    }

    /// Forces the reserves to match the pool's ledger balances.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if a balance exceeds 112 bits.
    pub fn sync<L: Ledger>(&mut self, ledger: &L) -> Result<(), AmmError> {
        let (balance0, balance1) = self.observed_balances(ledger)?;
        self.set_reserves(balance0, balance1);
        Ok(())
    }

    // -- pricing ------------------------------------------------------------

    fn oriented_reserves(&self, side_in: Side) -> (Amount, Amount) {
        match side_in {
            Side::Low => (self.reserve0, self.reserve1),
            Side::High => (self.reserve1, self.reserve0),
        }
    }

    /// `(fee, amount_out)` for `received` of the `side_in` asset.
    fn price_exact_in(&self, side_in: Side, received: Amount) -> Result<(Amount, Amount), AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::PoolEmpty);
        }
        let fee = self.config.fee().apply_to_amount(received, Rounding::Down)?;
        let net = self.config.fee().net_input_scaled(received);
        let denominator = reserve_in.to_u256() * U256::from(BPS_DENOMINATOR) + net;
        let amount_out = Amount::from_u256(mul_div(reserve_out.to_u256(), net, denominator)?)?;
        if amount_out.is_zero() {
            return Err(AmmError::NoOutput);
        }
        Ok((fee, amount_out))
    }

    fn execute_swap<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        request: &SwapRequest,
    ) -> Result<SwapOutcome, AmmError> {
        ctx.check_deadline(request.deadline())?;
        let token_in = request.token_in();
        let side_in = self.pair.side_of(&token_in)?;
        let token_out = self.pair.other(&token_in)?;
        if request.amount_in().is_zero() {
            return Err(AmmError::ZeroInput);
        }
        if self.reserve0.is_zero() || self.reserve1.is_zero() {
            return Err(AmmError::PoolEmpty);
        }

        let before = self.reserves();
        let received = pull_observed(ledger, token_in, ctx.caller(), self.account, request.amount_in())?;
        let (fee, amount_out) = self.price_exact_in(side_in, received)?;
        if amount_out < request.min_amount_out() {
            return Err(AmmError::SlippageExceeded {
                actual: amount_out.get(),
                minimum: request.min_amount_out().get(),
            });
        }

        if let Some(fee_recipient) = self.config.fee_recipient() {
            if !fee.is_zero() {
                ledger.transfer(token_in, self.account, fee_recipient, fee)?;
            }
        }
        ledger.transfer(token_out, self.account, request.recipient(), amount_out)?;

        let after = self.observed_balances(ledger)?;
        let k_before = before.0.to_u256() * before.1.to_u256();
        let k_after = after.0.to_u256() * after.1.to_u256();
        if k_after < k_before {
            return Err(ArithmeticError::InvariantViolation("constant product decreased").into());
        }

        // commit
        match side_in {
            Side::Low => self.fees0 = self.fees0.safe_add(&fee)?,
            Side::High => self.fees1 = self.fees1.safe_add(&fee)?,
        }
        tracing::info!(
            pool = %self.account,
            sender = %ctx.caller(),
            %token_in,
            amount_in = %received,
            %fee,
            %amount_out,
            "swap executed"
        );
        self.emit(PoolEvent::Swap {
            sender: ctx.caller(),
            recipient: request.recipient(),
            token_in,
            amount_in: received,
            fee,
            amount_out,
            state: SwapState::Reserves { before, after },
        });
        self.set_reserves(after.0, after.1);

        Ok(SwapOutcome {
            token_in,
            token_out,
            amount_in: received,
            fee,
            amount_out,
        })
    }

    // -- bookkeeping --------------------------------------------------------

    fn observed_balances<L: Ledger>(&self, ledger: &L) -> Result<(Amount, Amount), AmmError> {
        let balance0 = ledger.balance_of(self.pair.low(), self.account);
        let balance1 = ledger.balance_of(self.pair.high(), self.account);
        if !balance0.fits_reserve() || !balance1.fits_reserve() {
            return Err(ArithmeticError::Overflow("reserve exceeds 112 bits").into());
        }
        Ok((balance0, balance1))
    }

    fn set_reserves(&mut self, reserve0: Amount, reserve1: Amount) {
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.emit(PoolEvent::Sync { reserve0, reserve1 });
    }

    fn emit(&mut self, event: PoolEvent) {
        tracing::debug!(pool = %self.account, ?event, "pool event");
        self.events.push(event);
    }
}

impl FromConfig<ConstantProductConfig> for ConstantProductPool {
    fn from_config(pair: AssetPair, config: &ConstantProductConfig) -> Result<Self, AmmError> {
        Self::new(pair, config)
    }
}

impl SwapPool for ConstantProductPool {
    fn asset_pair(&self) -> &AssetPair {
        &self.pair
    }

    fn account(&self) -> AccountId {
        self.account
    }

    fn fee_tier(&self) -> FeeTier {
        self.config.fee()
    }

    fn quote_exact_in(&self, token_in: AssetId, amount_in: Amount) -> Result<SwapOutcome, AmmError> {
        let side_in = self.pair.side_of(&token_in)?;
        if amount_in.is_zero() {
            return Err(AmmError::ZeroInput);
        }
        let (fee, amount_out) = self.price_exact_in(side_in, amount_in)?;
        tracing::debug!(%token_in, %amount_in, %fee, %amount_out, "quote");
        Ok(SwapOutcome {
            token_in,
            token_out: self.pair.other(&token_in)?,
            amount_in,
            fee,
            amount_out,
        })
    }

    fn swap_exact_in<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        request: &SwapRequest,
    ) -> Result<SwapOutcome, AmmError> {
        atomically(ledger, |ledger| self.execute_swap(ledger, ctx, request))
    }

    fn drain_events(&mut self) -> Vec<PoolEvent> {
        core::mem::take(&mut self.events)
    }
}
