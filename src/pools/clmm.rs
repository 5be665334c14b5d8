//! Concentrated-liquidity pool (Uniswap V3 style).
//!
//! Liquidity providers deposit into half-open sqrt-price ranges
//! `[lower, upper)`.  Within the current *active segment*, the interval
//! between the nearest position boundaries around the price, active
//! liquidity `L` is constant and the pool behaves as a constant-product
//! curve parameterised by `√P` and `L`.
//!
//! # Price convention
//!
//! `sqrt_price = sqrt(asset1 / asset0) × 2^96`.  Selling asset1 raises the
//! price, selling asset0 lowers it.
//!
//! # Swap algorithm
//!
//! 1. Deduct the fee from the observed input, keeping `net` scaled by
//!    10 000 so that a fraction of a unit of fee still counts.
//! 2. asset1 in: `p' = p + net × Q96 / L`, `out0 = L × (1/p − 1/p')`.
//! 3. asset0 in: `p' = ceil(L·Q96·p / (L·Q96 + net·p))`,
//!    `out1 = L × (p − p') / Q96`.
//!
//! In both updates the 10 000 scale is folded into the `L` side.
//! 4. If `p'` leaves the active segment the swap fails with
//!    [`AmmError::RangeExhausted`]; no boundary is ever crossed.
//!
//! Every rounding step favours the pool, so the pool's balances always
//! cover what its positions can withdraw.

use std::collections::BTreeMap;

use alloy_primitives::U256;

use crate::config::ClmmConfig;
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, BPS_DENOMINATOR, CallContext, FeeTier, Liquidity,
    Position, PositionKey, PriceRange, Rounding, Side, SqrtPrice, SwapOutcome, SwapRequest,
};
use crate::error::{AmmError, ArithmeticError};
use crate::events::{PoolEvent, SwapState};
use crate::ledger::{Ledger, atomically, pull_observed};
use crate::math::{
    CheckedArithmetic, Q96, amount0_for_liquidity, amount1_for_liquidity, amounts_for_liquidity,
    div_rounding_up, liquidity_for_amounts, mul_div, mul_div_q, mul_div_rounding_up, reciprocal_q,
};
use crate::traits::{FromConfig, SwapPool};

/// Outcome of [`ClmmPool::mint_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionMinted {
    /// Liquidity added to the position.
    pub liquidity: Liquidity,
    /// Asset0 pulled from the caller.
    pub amount0: Amount,
    /// Asset1 pulled from the caller.
    pub amount1: Amount,
}

/// Priced but not yet executed swap.
#[derive(Debug, Clone, Copy)]
struct SwapStep {
    fee: Amount,
    amount_out: Amount,
    next_price: SqrtPrice,
}

/// A concentrated-liquidity pool.
///
/// # State
///
/// - `sqrt_price`: the current Q64.96 sqrt price
/// - `active_liquidity`: sum of the liquidity of every position whose
///   range contains `sqrt_price`
/// - `positions`: `BTreeMap<PositionKey, Position>`, keyed by owner and
///   range; emptied positions are removed
/// - `fees0` / `fees1`: lifetime fee counters (fees stay in the pool)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClmmPool {
    pair: AssetPair,
    account: AccountId,
    config: ClmmConfig,
    sqrt_price: SqrtPrice,
    active_liquidity: Liquidity,
    positions: BTreeMap<PositionKey, Position>,
    fees0: Amount,
    fees1: Amount,
    events: Vec<PoolEvent>,
}

impl ClmmPool {
    /// Creates a pool at the configured initial price with no positions.
    ///
    /// # Errors
    ///
    /// Propagates [`ClmmConfig::validate`].
    pub fn new(pair: AssetPair, config: &ClmmConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            pair,
            account: pair.pool_account(),
            config: *config,
            sqrt_price: config.initial_sqrt_price(),
            active_liquidity: Liquidity::ZERO,
            positions: BTreeMap::new(),
            fees0: Amount::ZERO,
            fees1: Amount::ZERO,
            events: Vec::new(),
        })
    }

    /// Current sqrt price.
    #[must_use]
    pub const fn sqrt_price(&self) -> SqrtPrice {
        self.sqrt_price
    }

    /// `2^192 / sqrt_price`: the sqrt price of asset0 in units of asset1.
    ///
    /// # Errors
    ///
    /// Never fails for a bounded price; the signature mirrors the math core.
    pub fn inverse_sqrt_price(&self) -> Result<U256, AmmError> {
        Ok(reciprocal_q(self.sqrt_price.get())?)
    }

    /// Price of asset0 in asset1, Q96-scaled: `sqrt_price² / 2^96`.
    ///
    /// # Errors
    ///
    /// Never fails for a bounded price: `sqrt_price² / 2^96` stays below
    /// `2^224`.
    pub fn price(&self) -> Result<U256, AmmError> {
        Ok(mul_div_q(self.sqrt_price.get(), self.sqrt_price.get())?)
    }

    /// Liquidity of every position whose range contains the price.
    #[must_use]
    pub const fn active_liquidity(&self) -> Liquidity {
        self.active_liquidity
    }

    /// Lifetime fees charged, per asset.
    pub const fn accumulated_fees(&self) -> (Amount, Amount) {
        (self.fees0, self.fees1)
    }

    /// The pool's configuration.
    #[must_use]
    pub const fn config(&self) -> &ClmmConfig {
        &self.config
    }

    /// Position of `owner` over `[lower, upper)`, if any.
    #[must_use]
    pub fn position(&self, owner: AccountId, lower: SqrtPrice, upper: SqrtPrice) -> Option<Position> {
        let range = PriceRange::new(lower, upper).ok()?;
        self.positions.get(&PositionKey::new(owner, range)).copied()
    }

    /// All open positions in key order.
    pub fn positions(&self) -> impl Iterator<Item = (&PositionKey, &Position)> {
        self.positions.iter()
    }

    /// Bounds of the active segment: the greatest position boundary at or
    /// below the price and the least boundary strictly above it.
    ///
    /// Missing bounds default to [`SqrtPrice::MIN`] and [`SqrtPrice::MAX`].
    #[must_use]
    pub fn active_segment(&self) -> (SqrtPrice, SqrtPrice) {
        let p = self.sqrt_price;
        let mut lower = SqrtPrice::MIN;
        let mut upper = SqrtPrice::MAX;
        for key in self.positions.keys() {
            for bound in [key.range().lower(), key.range().upper()] {
                if bound <= p {
                    lower = lower.max(bound);
                } else {
                    upper = upper.min(bound);
                }
            }
        }
        (lower, upper)
    }

    // -- positions ----------------------------------------------------------

    /// Adds liquidity to the caller's position over `[lower, upper)`.
    ///
    /// The liquidity is the largest the desired amounts can back at the
    /// current price.  The amounts actually pulled are recomputed from that
    /// liquidity, rounded up, and never exceed the desired amounts.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if both desired amounts are zero.
    /// - [`AmmError::InvalidRange`] unless `lower < upper`.
    /// - [`AmmError::ZeroLiquidity`] if the liquidity rounds to zero.
    /// - [`AmmError::InsufficientInput`] if the ledger delivers less than
    ///   required.
    /// - Ledger transfer failures.
    pub fn mint_position<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        lower: SqrtPrice,
        upper: SqrtPrice,
        amount0_desired: Amount,
        amount1_desired: Amount,
    ) -> Result<PositionMinted, AmmError> {
        if amount0_desired.is_zero() && amount1_desired.is_zero() {
            return Err(AmmError::ZeroAmount("at least one desired amount must be non-zero"));
        }
        let range = PriceRange::new(lower, upper)?;
        let p = self.sqrt_price;
        let liquidity = liquidity_for_amounts(p, lower, upper, amount0_desired, amount1_desired)?;
        if liquidity.is_zero() {
            return Err(AmmError::ZeroLiquidity);
        }
        let (amount0, amount1) = amounts_for_liquidity(p, lower, upper, liquidity, Rounding::Up)?;
        if amount0 > amount0_desired || amount1 > amount1_desired {
            return Err(ArithmeticError::InvariantViolation("minted amounts exceed desired").into());
        }

        atomically(ledger, |ledger| {
            let owner = ctx.caller();
            for (asset, required) in [(self.pair.low(), amount0), (self.pair.high(), amount1)] {
                if required.is_zero() {
                    continue;
                }
                let received = pull_observed(ledger, asset, owner, self.account, required)?;
                if received < required {
                    return Err(AmmError::InsufficientInput {
                        required: required.get(),
                        received: received.get(),
                    });
                }
            }

            let key = PositionKey::new(owner, range);
            let mut position = self.positions.get(&key).copied().unwrap_or_default();
            position.increase(liquidity)?;
            let active_liquidity = if range.contains(p) {
                self.active_liquidity.safe_add(&liquidity)?
            } else {
                self.active_liquidity
            };

            // commit
            self.positions.insert(key, position);
            self.active_liquidity = active_liquidity;
            tracing::info!(
                pool = %self.account,
                %owner,
                %range,
                %liquidity,
                %amount0,
                %amount1,
                "position minted"
            );
            self.emit(PoolEvent::PositionMinted {
                owner,
                range,
                liquidity,
                amount0,
                amount1,
            });
            Ok(PositionMinted {
                liquidity,
                amount0,
                amount1,
            })
        })
    }

    /// Removes `liquidity` from the caller's position and pays the
    /// underlying amounts, rounded down, to `recipient`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidRange`] unless `lower < upper`.
    /// - [`AmmError::ZeroLiquidity`] for zero `liquidity`.
    /// - [`AmmError::InsufficientPosition`] if the position holds less.
    /// - Ledger transfer failures.
    pub fn burn_position<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        lower: SqrtPrice,
        upper: SqrtPrice,
        liquidity: Liquidity,
        recipient: AccountId,
    ) -> Result<(Amount, Amount), AmmError> {
        let range = PriceRange::new(lower, upper)?;
        if liquidity.is_zero() {
            return Err(AmmError::ZeroLiquidity);
        }
        let owner = ctx.caller();
        let key = PositionKey::new(owner, range);
        let mut position = self.positions.get(&key).copied().unwrap_or_default();
        position.decrease(liquidity)?;

        let p = self.sqrt_price;
        let (amount0, amount1) = amounts_for_liquidity(p, lower, upper, liquidity, Rounding::Down)?;
        let active_liquidity = if range.contains(p) {
            self.active_liquidity.safe_sub(&liquidity)?
        } else {
            self.active_liquidity
        };

        atomically(ledger, |ledger| {
            for (asset, amount) in [(self.pair.low(), amount0), (self.pair.high(), amount1)] {
                if !amount.is_zero() {
                    ledger.transfer(asset, self.account, recipient, amount)?;
                }
            }

            // commit
            if position.is_empty() {
                self.positions.remove(&key);
                tracing::debug!(pool = %self.account, %owner, %range, "position closed");
            } else {
                self.positions.insert(key, position);
            }
            self.active_liquidity = active_liquidity;
            tracing::info!(
                pool = %self.account,
                %owner,
                %recipient,
                %range,
                %liquidity,
                %amount0,
                %amount1,
                "position burned"
            );
            self.emit(PoolEvent::PositionBurned {
                owner,
                recipient,
                range,
                liquidity,
                amount0,
                amount1,
            });
            Ok((amount0, amount1))
        })
    }

    // -- pricing ------------------------------------------------------------

    fn price_exact_in(&self, side_in: Side, received: Amount) -> Result<SwapStep, AmmError> {
        let liquidity = self.active_liquidity;
        if liquidity.is_zero() {
            return Err(AmmError::NoActiveLiquidity);
        }
        let fee = self.config.fee().apply_to_amount(received, Rounding::Down)?;
        let net = self.config.fee().net_input_scaled(received);
        if net.is_zero() {
            return Err(AmmError::NoOutput);
        }
        let scaled_liquidity = liquidity.to_u256() * U256::from(BPS_DENOMINATOR);

        let p = self.sqrt_price.get();
        let (segment_lower, segment_upper) = self.active_segment();
        let (next_price, amount_out) = match side_in {
            Side::High => {
                let delta = mul_div(net, Q96, scaled_liquidity)?;
                let raw = p.checked_add(delta).ok_or(AmmError::RangeExhausted)?;
                if delta.is_zero() {
                    return Err(AmmError::NoOutput);
                }
                let next = SqrtPrice::new(raw).map_err(|_| AmmError::RangeExhausted)?;
                if next >= segment_upper {
                    return Err(AmmError::RangeExhausted);
                }
                (next, amount0_for_liquidity(self.sqrt_price, next, liquidity, Rounding::Down)?)
            }
            Side::Low => {
                let numerator: U256 = scaled_liquidity << 96;
                let raw = match net.checked_mul(p).and_then(|product| numerator.checked_add(product)) {
                    Some(denominator) => mul_div_rounding_up(numerator, p, denominator)?,
                    None => {
                        let denominator = (numerator / p)
                            .checked_add(net)
                            .ok_or(ArithmeticError::Overflow("sqrt price denominator"))?;
                        div_rounding_up(numerator, denominator)?
                    }
                };
                if raw == p {
                    return Err(AmmError::NoOutput);
                }
                let next = SqrtPrice::new(raw).map_err(|_| AmmError::RangeExhausted)?;
                if next < segment_lower {
                    return Err(AmmError::RangeExhausted);
                }
                (next, amount1_for_liquidity(next, self.sqrt_price, liquidity, Rounding::Down)?)
            }
        };
        if amount_out.is_zero() {
            return Err(AmmError::NoOutput);
        }
        Ok(SwapStep {
            fee,
            amount_out,
            next_price,
        })
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
        if self.active_liquidity.is_zero() {
            return Err(AmmError::NoActiveLiquidity);
        }

        let received = pull_observed(ledger, token_in, ctx.caller(), self.account, request.amount_in())?;
        let step = self.price_exact_in(side_in, received)?;
        if step.amount_out < request.min_amount_out() {
            return Err(AmmError::SlippageExceeded {
                actual: step.amount_out.get(),
                minimum: request.min_amount_out().get(),
            });
        }
        ledger.transfer(token_out, self.account, request.recipient(), step.amount_out)?;

        // commit
        match side_in {
            Side::Low => self.fees0 = self.fees0.safe_add(&step.fee)?,
            Side::High => self.fees1 = self.fees1.safe_add(&step.fee)?,
        }
        let before = self.sqrt_price;
        self.sqrt_price = step.next_price;
        tracing::info!(
            pool = %self.account,
            sender = %ctx.caller(),
            %token_in,
            amount_in = %received,
            fee = %step.fee,
            amount_out = %step.amount_out,
            sqrt_price = %step.next_price,
            "swap executed"
        );
        self.emit(PoolEvent::Swap {
            sender: ctx.caller(),
            recipient: request.recipient(),
            token_in,
            amount_in: received,
            fee: step.fee,
            amount_out: step.amount_out,
            state: SwapState::SqrtPrice {
                before: before.get(),
                after: step.next_price.get(),
                liquidity: self.active_liquidity,
            },
        });

        Ok(SwapOutcome {
            token_in,
            token_out,
            amount_in: received,
            fee: step.fee,
            amount_out: step.amount_out,
        })
    }

    fn emit(&mut self, event: PoolEvent) {
        tracing::debug!(pool = %self.account, ?event, "pool event");
        self.events.push(event);
    }
}

impl FromConfig<ClmmConfig> for ClmmPool {
    fn from_config(pair: AssetPair, config: &ClmmConfig) -> Result<Self, AmmError> {
        Self::new(pair, config)
    }
}

impl SwapPool for ClmmPool {
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
        let step = self.price_exact_in(side_in, amount_in)?;
        tracing::debug!(%token_in, %amount_in, fee = %step.fee, amount_out = %step.amount_out, "quote");
        Ok(SwapOutcome {
            token_in,
            token_out: self.pair.other(&token_in)?,
            amount_in,
            fee: step.fee,
            amount_out: step.amount_out,
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
