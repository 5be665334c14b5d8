//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Product non-decrease**: `reserve0 × reserve1` never falls across a
//!    constant-product swap.
//! 2. **Swap reversibility**: a round trip A→B→A returns at most the input.
//! 3. **Mint/burn round trip**: burning freshly minted shares or position
//!    liquidity never returns more than was deposited.
//! 4. **Canonical pair**: pair construction ignores argument order.
//! 5. **Integer sqrt floor**: `r² ≤ n < (r + 1)²`.
//! 6. **CLMM value conservation**: positions and traders together never
//!    withdraw more than entered the pool.

use alloy_primitives::U256;
use proptest::prelude::*;

use crate::config::{ClmmConfig, ConstantProductConfig};
use crate::domain::{
    AccountId, Amount, AssetId, AssetPair, CallContext, FeeTier, Liquidity, SqrtPrice, SwapRequest,
    Timestamp,
};
use crate::ledger::{InMemoryLedger, Ledger};
use crate::math::{Q96, integer_sqrt};
use crate::pools::{ClmmPool, ConstantProductPool};
use crate::traits::SwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset_a() -> AssetId {
    AssetId::from_bytes([1u8; 32])
}

fn asset_b() -> AssetId {
    AssetId::from_bytes([2u8; 32])
}

fn lp() -> AccountId {
    AccountId::from_bytes([0x11; 32])
}

fn trader() -> AccountId {
    AccountId::from_bytes([0x22; 32])
}

fn ctx(caller: AccountId) -> CallContext {
    CallContext::new(caller, Timestamp::new(0))
}

fn make_pair() -> AssetPair {
    let Ok(pair) = AssetPair::new(asset_a(), asset_b()) else {
        panic!("valid pair");
    };
    pair
}

fn funded_ledger(pool_account: AccountId) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    for holder in [lp(), trader()] {
        for asset in [asset_a(), asset_b()] {
            ledger.mint(asset, holder, Amount::new(1_000_000_000_000));
            ledger.approve(asset, holder, pool_account, Amount::MAX);
        }
    }
    ledger
}

fn make_cp(ra: u128, rb: u128) -> (ConstantProductPool, InMemoryLedger) {
    let Ok(mut pool) = ConstantProductPool::new(make_pair(), &ConstantProductConfig::default()) else {
        panic!("valid pool");
    };
    let mut ledger = funded_ledger(pool.account());
    let Ok(_) = pool.add_liquidity(
        &mut ledger,
        &ctx(lp()),
        Amount::new(ra),
        Amount::new(rb),
        Liquidity::ZERO,
        None,
    ) else {
        panic!("seed deposit");
    };
    (pool, ledger)
}

fn sqrt_price(num: u64, den: u64) -> SqrtPrice {
    let Ok(price) = SqrtPrice::new(Q96 * U256::from(num) / U256::from(den)) else {
        panic!("price in bounds");
    };
    price
}

/// Pool at price 1 with one position over `[1/2, 2)` (sqrt).
fn make_clmm(amount: u128, fee: FeeTier) -> (ClmmPool, InMemoryLedger) {
    let Ok(config) = ClmmConfig::new(fee, sqrt_price(1, 1)) else {
        panic!("valid config");
    };
    let Ok(mut pool) = ClmmPool::new(make_pair(), &config) else {
        panic!("valid pool");
    };
    let mut ledger = funded_ledger(pool.account());
    let Ok(_) = pool.mint_position(
        &mut ledger,
        &ctx(lp()),
        sqrt_price(1, 2),
        sqrt_price(2, 1),
        Amount::new(amount),
        Amount::new(amount),
    ) else {
        panic!("seed mint");
    };
    (pool, ledger)
}

fn swap_in<P: SwapPool>(
    pool: &mut P,
    ledger: &mut InMemoryLedger,
    token_in: AssetId,
    amount: u128,
) -> Option<Amount> {
    let request = SwapRequest::exact_in(token_in, Amount::new(amount), trader());
    pool.swap_exact_in(ledger, &ctx(trader()), &request)
        .ok()
        .map(|outcome| outcome.amount_out)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [10_000, 10_000_000].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    prop_oneof![
        Just(FeeTier::ZERO),
        Just(FeeTier::TIER_0_05_PERCENT),
        Just(FeeTier::TIER_0_30_PERCENT),
        Just(FeeTier::TIER_1_00_PERCENT),
    ]
}

fn asset_id_strategy() -> impl Strategy<Value = AssetId> {
    any::<[u8; 32]>().prop_map(AssetId::from_bytes)
}

// ---------------------------------------------------------------------------
// Constant product
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in prop::collection::vec((any::<bool>(), 1u128..=1_000_000u128), 1..8),
    ) {
        let (mut pool, mut ledger) = make_cp(ra, rb);
        for (a_to_b, amount) in swaps {
            let k_before = pool.invariant();
            let token_in = if a_to_b { asset_a() } else { asset_b() };
            let _ = swap_in(&mut pool, &mut ledger, token_in, amount);
            prop_assert!(pool.invariant() >= k_before);
        }
    }

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        divisor in 2u128..=1_000u128,
    ) {
        let amount = (ra / divisor).max(1);
        let (mut pool, mut ledger) = make_cp(ra, rb);
        let Some(received_b) = swap_in(&mut pool, &mut ledger, asset_a(), amount) else {
            return Ok(());
        };
        let Some(final_a) = swap_in(&mut pool, &mut ledger, asset_b(), received_b.get()) else {
            return Ok(());
        };
        prop_assert!(
            final_a.get() <= amount,
            "round trip gained value: {} > {}",
            final_a, amount
        );
    }

    #[test]
    fn prop_mint_then_burn_never_returns_more(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in 1u128..=5_000_000u128,
        db in 1u128..=5_000_000u128,
    ) {
        let (mut pool, mut ledger) = make_cp(ra, rb);
        let Ok(minted) = pool.add_liquidity(
            &mut ledger,
            &ctx(trader()),
            Amount::new(da),
            Amount::new(db),
            Liquidity::ZERO,
            None,
        ) else {
            return Ok(());
        };
        let Ok((out_a, out_b)) = pool.remove_liquidity(
            &mut ledger,
            &ctx(trader()),
            minted.liquidity,
            Amount::ZERO,
            Amount::ZERO,
            trader(),
            None,
        ) else {
            return Ok(());
        };
        prop_assert!(out_a <= minted.amount0);
        prop_assert!(out_b <= minted.amount1);
        prop_assert!(minted.amount0.get() <= da && minted.amount1.get() <= db);
    }

    #[test]
    fn prop_reserves_track_ledger(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=1_000_000u128,
    ) {
        let (mut pool, mut ledger) = make_cp(ra, rb);
        let _ = swap_in(&mut pool, &mut ledger, asset_b(), amount);
        let (r0, r1) = pool.reserves();
        prop_assert_eq!(r0, ledger.balance_of(asset_a(), pool.account()));
        prop_assert_eq!(r1, ledger.balance_of(asset_b(), pool.account()));
    }
}

// ---------------------------------------------------------------------------
// Pair canonicalisation and integer sqrt
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_pair_is_order_independent(a in asset_id_strategy(), b in asset_id_strategy()) {
        match (AssetPair::new(a, b), AssetPair::new(b, a)) {
            (Ok(ab), Ok(ba)) => {
                prop_assert_eq!(ab, ba);
                prop_assert!(ab.low() < ab.high());
                prop_assert_eq!(ab.pool_account(), ba.pool_account());
            }
            (Err(e1), Err(e2)) => prop_assert_eq!(e1, e2),
            _ => prop_assert!(false, "argument order changed validity"),
        }
    }

    #[test]
    fn prop_integer_sqrt_is_floor(n in any::<u128>()) {
        let r = U256::from(integer_sqrt(n));
        let n = U256::from(n);
        prop_assert!(r * r <= n);
        let next = r + U256::from(1u8);
        prop_assert!(next * next > n);
    }
}

// ---------------------------------------------------------------------------
// Concentrated liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_clmm_mint_never_exceeds_desired(
        lower_num in 1u64..=99u64,
        upper_num in 101u64..=400u64,
        a0 in 0u128..=10_000_000u128,
        a1 in 0u128..=10_000_000u128,
    ) {
        let Ok(config) = ClmmConfig::new(FeeTier::ZERO, sqrt_price(1, 1)) else {
            panic!("valid config");
        };
        let Ok(mut pool) = ClmmPool::new(make_pair(), &config) else {
            panic!("valid pool");
        };
        let mut ledger = funded_ledger(pool.account());
        let Ok(minted) = pool.mint_position(
            &mut ledger,
            &ctx(lp()),
            sqrt_price(lower_num, 100),
            sqrt_price(upper_num, 100),
            Amount::new(a0),
            Amount::new(a1),
        ) else {
            return Ok(());
        };
        prop_assert!(minted.amount0.get() <= a0);
        prop_assert!(minted.amount1.get() <= a1);
        prop_assert_eq!(pool.active_liquidity(), minted.liquidity);
    }

    #[test]
    fn prop_clmm_round_trip_swap_never_gains(
        seed in 100_000u128..=10_000_000u128,
        amount in 1u128..=100_000u128,
        fee in fee_strategy(),
    ) {
        let (mut pool, mut ledger) = make_clmm(seed, fee);
        let Some(out0) = swap_in(&mut pool, &mut ledger, asset_b(), amount) else {
            return Ok(());
        };
        let Some(back1) = swap_in(&mut pool, &mut ledger, asset_a(), out0.get()) else {
            return Ok(());
        };
        prop_assert!(back1.get() <= amount, "round trip gained: {} > {}", back1, amount);
    }

    #[test]
    fn prop_clmm_creates_no_value(
        seed in 100_000u128..=10_000_000u128,
        swaps in prop::collection::vec((any::<bool>(), 1u128..=50_000u128), 0..6),
        fee in fee_strategy(),
    ) {
        let (mut pool, mut ledger) = make_clmm(seed, fee);
        for (a_in, amount) in swaps {
            let token_in = if a_in { asset_a() } else { asset_b() };
            let _ = swap_in(&mut pool, &mut ledger, token_in, amount);
        }
        let positions: Vec<_> = pool.positions().map(|(key, position)| (*key, *position)).collect();
        for (key, position) in positions {
            let range = key.range();
            let burned = pool.burn_position(
                &mut ledger,
                &ctx(key.owner()),
                range.lower(),
                range.upper(),
                position.liquidity(),
                key.owner(),
            );
            prop_assert!(burned.is_ok(), "pool could not cover its positions: {:?}", burned);
        }
        prop_assert_eq!(pool.active_liquidity(), Liquidity::ZERO);
    }
}
