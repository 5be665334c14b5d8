//! Integration tests exercising the full system from config to pool operation.
//!
//! These tests drive pools through the public API only: the registry, an
//! in-memory ledger, and the pool operations reached via handles.
//!
//! These tests require all pool features to be enabled.

#![cfg(all(feature = "constant-product", feature = "clmm"))]
#![allow(clippy::panic)]

use alloy_primitives::U256;
use pairswap::config::{AmmConfig, ClmmConfig, ConstantProductConfig};
use pairswap::domain::{
    AccountId, Amount, AssetId, BasisPoints, CallContext, FeeTier, Liquidity, SqrtPrice,
    SwapRequest, Timestamp,
};
use pairswap::error::{AmmError, ErrorCategory, LedgerError};
use pairswap::events::{PoolEvent, RegistryEvent};
use pairswap::ledger::{InMemoryLedger, Ledger};
use pairswap::math::Q96;
use pairswap::registry::{PoolHandle, PoolRegistry};
use pairswap::traits::SwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn usdc() -> AssetId {
    AssetId::from_bytes([1u8; 32])
}

fn weth() -> AssetId {
    AssetId::from_bytes([2u8; 32])
}

fn dai() -> AssetId {
    AssetId::from_bytes([3u8; 32])
}

fn alice() -> AccountId {
    AccountId::from_bytes([0xa1; 32])
}

fn bob() -> AccountId {
    AccountId::from_bytes([0xb0; 32])
}

fn at(caller: AccountId) -> CallContext {
    CallContext::new(caller, Timestamp::new(1_700_000_000))
}

fn sqrt_price(num: u64, den: u64) -> SqrtPrice {
    let Ok(price) = SqrtPrice::new(Q96 * U256::from(num) / U256::from(den)) else {
        panic!("price in bounds");
    };
    price
}

fn cp_config() -> AmmConfig {
    AmmConfig::from(ConstantProductConfig::default())
}

fn clmm_config(fee: FeeTier) -> AmmConfig {
    let Ok(cfg) = ClmmConfig::from_ratio(fee, 1, 1) else {
        panic!("valid config");
    };
    AmmConfig::from(cfg)
}

fn create(registry: &mut PoolRegistry, a: AssetId, b: AssetId, config: &AmmConfig) -> PoolHandle {
    let Ok(handle) = registry.create_pool(a, b, config) else {
        panic!("pool created");
    };
    handle
}

fn pool_account(registry: &PoolRegistry, handle: PoolHandle) -> AccountId {
    let Ok(account) = registry.with_pool(handle, |pool| Ok(pool.account())) else {
        panic!("pool exists");
    };
    account
}

/// Mints every asset to alice and bob and approves `spender` for all of it.
fn funded_ledger(spenders: &[AccountId]) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    for holder in [alice(), bob()] {
        for asset in [usdc(), weth(), dai()] {
            ledger.mint(asset, holder, Amount::new(1_000_000_000));
            for spender in spenders {
                ledger.approve(asset, holder, *spender, Amount::MAX);
            }
        }
    }
    ledger
}

// ---------------------------------------------------------------------------
// Registry round trips
// ---------------------------------------------------------------------------

#[test]
fn create_pool_is_order_independent() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, weth(), usdc(), &cp_config());
    assert_eq!(registry.pool_for(usdc(), weth()), Some(handle));
    assert_eq!(registry.pool_for(weth(), usdc()), Some(handle));
    assert_eq!(
        registry.create_pool(usdc(), weth(), &cp_config()),
        Err(AmmError::PairExists)
    );
    let Some(pair) = registry.pair_of(handle) else {
        panic!("pair recorded");
    };
    assert_eq!(pair.low(), usdc());
    assert_eq!(pair.high(), weth());
}

#[test]
fn registry_rejects_invalid_configs() {
    let mut registry = PoolRegistry::new();
    let Ok(bad_fee) =
        serde_json::from_str::<AmmConfig>(r#"{ "kind": "constant_product", "fee": 2500 }"#)
    else {
        panic!("deserialize");
    };
    assert!(matches!(
        registry.create_pool(usdc(), weth(), &bad_fee),
        Err(AmmError::InvalidFee(_))
    ));

    let burn_recipient = AmmConfig::from(
        ConstantProductConfig::default().with_fee_recipient(AccountId::BURN),
    );
    assert!(matches!(
        registry.create_pool(usdc(), weth(), &burn_recipient),
        Err(AmmError::InvalidConfiguration(_))
    ));
    assert_eq!(registry.pool_count(), 0);
    assert_eq!(registry.pool_for(usdc(), weth()), None);
}

#[test]
fn registry_events_describe_each_pool() {
    let mut registry = PoolRegistry::new();
    let cp = create(&mut registry, usdc(), weth(), &cp_config());
    let clmm = create(&mut registry, usdc(), dai(), &clmm_config(FeeTier::TIER_0_05_PERCENT));
    let kinds: Vec<_> = registry
        .drain_events()
        .into_iter()
        .map(|event| match event {
            RegistryEvent::PoolCreated { kind, index, .. } => (kind, index),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("constant_product".to_owned(), cp.index()),
            ("clmm".to_owned(), clmm.index())
        ]
    );
}

// ---------------------------------------------------------------------------
// Constant-product lifecycle
// ---------------------------------------------------------------------------

#[test]
fn constant_product_reference_scenario() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);

    let Ok(minted) = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(1_000),
            Amount::new(4_000),
            Liquidity::ZERO,
            None,
        )
    }) else {
        panic!("deposit");
    };
    // sqrt(1000 × 4000) = 2000, of which 1000 are locked
    assert_eq!(minted.liquidity, Liquidity::new(1_000));

    let request = SwapRequest::exact_in(usdc(), Amount::new(100), bob());
    let Ok(out) = registry.with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &request))
    else {
        panic!("swap");
    };
    // net 99.7 keeps the fractional fee: 4000 × 99.7 / 1099.7
    assert_eq!(out.amount_out, Amount::new(4_000 * 997 / 10_997));
    assert_eq!(out.amount_out, Amount::new(362));
    assert_eq!(out.fee, Amount::ZERO);
    assert_eq!(ledger.balance_of(usdc(), account), Amount::new(1_100));
    assert_eq!(ledger.balance_of(weth(), account), Amount::new(3_638));

    let Ok(k_after) = registry.with_constant_product(handle, |pool| Ok(pool.invariant())) else {
        panic!("pool exists");
    };
    assert!(k_after >= U256::from(4_000_000u64));
}

#[test]
fn liquidity_providers_earn_swap_fees() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);

    let Ok(minted) = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(1_000_000),
            Amount::new(1_000_000),
            Liquidity::ZERO,
            None,
        )
    }) else {
        panic!("deposit");
    };

    for round in 0..10 {
        let token_in = if round % 2 == 0 { usdc() } else { weth() };
        let request = SwapRequest::exact_in(token_in, Amount::new(50_000), bob());
        let Ok(_) = registry.with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &request))
        else {
            panic!("swap {round}");
        };
    }

    let Ok((out_usdc, out_weth)) = registry.with_constant_product(handle, |pool| {
        pool.remove_liquidity(
            &mut ledger,
            &at(alice()),
            minted.liquidity,
            Amount::ZERO,
            Amount::ZERO,
            alice(),
            None,
        )
    }) else {
        panic!("withdraw");
    };
    // product of the payout beats the product of the deposit share
    let share = U256::from(999_000u64);
    assert!(out_usdc.to_u256() * out_weth.to_u256() > share * share);
}

#[test]
fn tokens_are_neither_lost_nor_created() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);
    let supply = (ledger.total_supply(usdc()), ledger.total_supply(weth()));

    let Ok(_) = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(500_000),
            Amount::new(700_000),
            Liquidity::ZERO,
            None,
        )?;
        pool.swap_exact_in(
            &mut ledger,
            &at(bob()),
            &SwapRequest::exact_in(weth(), Amount::new(12_345), bob()),
        )?;
        pool.remove_liquidity(
            &mut ledger,
            &at(alice()),
            Liquidity::new(100_000),
            Amount::ZERO,
            Amount::ZERO,
            alice(),
            None,
        )
    }) else {
        panic!("lifecycle");
    };

    for (asset, expected) in [(usdc(), supply.0), (weth(), supply.1)] {
        let held = [alice(), bob(), account]
            .iter()
            .map(|who| ledger.balance_of(asset, *who).get())
            .sum::<u128>();
        assert_eq!(Amount::new(held), expected);
    }
}

#[test]
fn fee_on_transfer_deposits_mint_on_received_amounts() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);
    ledger.set_transfer_fee(usdc(), BasisPoints::new(500));

    let Ok(minted) = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(40_000),
            Amount::new(40_000),
            Liquidity::ZERO,
            None,
        )
    }) else {
        panic!("deposit");
    };
    // 5% burned in transit
    assert_eq!(minted.amount0, Amount::new(38_000));
    assert_eq!(minted.amount1, Amount::new(40_000));
    let Ok(reserves) = registry.with_constant_product(handle, |pool| Ok(pool.reserves())) else {
        panic!("pool exists");
    };
    assert_eq!(reserves, (Amount::new(38_000), Amount::new(40_000)));
}

#[test]
fn failed_second_transfer_rolls_back_the_first() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);
    ledger.approve(weth(), alice(), account, Amount::new(10));
    let before = ledger.clone();

    let result = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(10_000),
            Amount::new(10_000),
            Liquidity::ZERO,
            None,
        )
    });
    assert_eq!(result, Err(AmmError::Transfer(LedgerError::InsufficientAllowance)));
    assert_eq!(
        result.map(|_| ()).map_err(|err| err.category()),
        Err(ErrorCategory::Transfer)
    );
    assert_eq!(ledger.balance_of(usdc(), alice()), before.balance_of(usdc(), alice()));
    assert_eq!(ledger.balance_of(usdc(), account), Amount::ZERO);

    let Ok((supply, events)) = registry.with_constant_product(handle, |pool| {
        Ok((pool.total_supply(), pool.drain_events()))
    }) else {
        panic!("pool exists");
    };
    assert_eq!(supply, Liquidity::ZERO);
    assert!(events.is_empty());
}

#[test]
fn reentrant_access_is_rejected() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);

    let result = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(10_000),
            Amount::new(10_000),
            Liquidity::ZERO,
            None,
        )?;
        // a callback that tries to trade against the same pool mid-operation
        registry.with_pool(handle, |inner| {
            inner.swap_exact_in(
                &mut InMemoryLedger::new(),
                &at(bob()),
                &SwapRequest::exact_in(usdc(), Amount::new(100), bob()),
            )
        })
    });
    assert_eq!(result, Err(AmmError::Locked));
    assert!(AmmError::Locked.is_retryable());

    // the guard is released once the outer operation returns
    let request = SwapRequest::exact_in(usdc(), Amount::new(100), bob());
    assert!(
        registry
            .with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &request))
            .is_ok()
    );
}

#[test]
fn deadline_and_slippage_through_registry() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);
    let Ok(_) = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(100_000),
            Amount::new(100_000),
            Liquidity::ZERO,
            None,
        )
    }) else {
        panic!("deposit");
    };

    let late = SwapRequest::exact_in(usdc(), Amount::new(1_000), bob())
        .with_deadline(Timestamp::new(1_699_999_999));
    let expired = registry.with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &late));
    assert_eq!(
        expired,
        Err(AmmError::Expired {
            now: 1_700_000_000,
            deadline: 1_699_999_999
        })
    );

    let Ok(quote) = registry.with_pool(handle, |pool| pool.quote_exact_in(usdc(), Amount::new(1_000))) else {
        panic!("quote");
    };
    let greedy = SwapRequest::exact_in(usdc(), Amount::new(1_000), bob())
        .with_min_amount_out(Amount::new(quote.amount_out.get() + 1));
    assert!(matches!(
        registry.with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &greedy)),
        Err(AmmError::SlippageExceeded { .. })
    ));

    let exact = SwapRequest::exact_in(usdc(), Amount::new(1_000), bob())
        .with_min_amount_out(quote.amount_out)
        .with_deadline(Timestamp::new(1_700_000_000));
    let Ok(out) = registry.with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &exact)) else {
        panic!("swap at deadline");
    };
    assert_eq!(out, quote);
}

// ---------------------------------------------------------------------------
// Concentrated liquidity lifecycle
// ---------------------------------------------------------------------------

#[test]
fn clmm_position_lifecycle() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &clmm_config(FeeTier::TIER_0_30_PERCENT));
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);

    let Ok(minted) = registry.with_clmm(handle, |pool| {
        pool.mint_position(
            &mut ledger,
            &at(alice()),
            sqrt_price(1, 2),
            sqrt_price(2, 1),
            Amount::new(1_000_000),
            Amount::new(1_000_000),
        )
    }) else {
        panic!("mint");
    };
    assert_eq!(minted.liquidity, Liquidity::new(2_000_000));

    let request = SwapRequest::exact_in(weth(), Amount::new(100_000), bob());
    let Ok(out) = registry.with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &request))
    else {
        panic!("swap");
    };
    assert_eq!(out.token_out, usdc());
    assert_eq!(out.fee, Amount::new(300));

    let Ok((amount0, amount1)) = registry.with_clmm(handle, |pool| {
        pool.burn_position(
            &mut ledger,
            &at(alice()),
            sqrt_price(1, 2),
            sqrt_price(2, 1),
            minted.liquidity,
            alice(),
        )
    }) else {
        panic!("burn");
    };
    // the price moved up, so the position now holds less asset0 and more asset1
    assert!(amount0 < minted.amount0);
    assert!(amount1 > minted.amount1);
    let Ok(closed) = registry.with_clmm(handle, |pool| {
        Ok(pool.position(alice(), sqrt_price(1, 2), sqrt_price(2, 1)).is_none())
    }) else {
        panic!("pool exists");
    };
    assert!(closed);
}

#[test]
fn clmm_boundary_mints() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &clmm_config(FeeTier::ZERO));
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);

    let Ok((at_lower, at_upper)) = registry.with_clmm(handle, |pool| {
        let lower = pool.mint_position(
            &mut ledger,
            &at(alice()),
            sqrt_price(1, 1),
            sqrt_price(3, 2),
            Amount::new(5_000),
            Amount::new(5_000),
        )?;
        let upper = pool.mint_position(
            &mut ledger,
            &at(alice()),
            sqrt_price(2, 3),
            sqrt_price(1, 1),
            Amount::new(5_000),
            Amount::new(5_000),
        )?;
        Ok((lower, upper))
    }) else {
        panic!("mints");
    };
    assert_eq!(at_lower.amount1, Amount::ZERO);
    assert_eq!(at_upper.amount0, Amount::ZERO);

    let Ok(segment) = registry.with_clmm(handle, |pool| Ok(pool.active_segment())) else {
        panic!("pool exists");
    };
    assert_eq!(segment, (sqrt_price(1, 1), sqrt_price(3, 2)));
}

#[test]
fn clmm_swap_cannot_leave_the_segment() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &clmm_config(FeeTier::ZERO));
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);
    let Ok(_) = registry.with_clmm(handle, |pool| {
        pool.mint_position(
            &mut ledger,
            &at(alice()),
            sqrt_price(9, 10),
            sqrt_price(11, 10),
            Amount::new(10_000),
            Amount::new(10_000),
        )
    }) else {
        panic!("mint");
    };
    let before = ledger.balance_of(usdc(), bob());
    let request = SwapRequest::exact_in(usdc(), Amount::new(1_000_000), bob());
    assert_eq!(
        registry.with_pool(handle, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &request)),
        Err(AmmError::RangeExhausted)
    );
    assert_eq!(ledger.balance_of(usdc(), bob()), before);
}

// ---------------------------------------------------------------------------
// Independent pools and events
// ---------------------------------------------------------------------------

#[test]
fn pools_for_different_pairs_are_independent() {
    let mut registry = PoolRegistry::new();
    let first = create(&mut registry, usdc(), weth(), &cp_config());
    let second = create(&mut registry, weth(), dai(), &cp_config());
    let accounts = [pool_account(&registry, first), pool_account(&registry, second)];
    assert_ne!(accounts[0], accounts[1]);
    let mut ledger = funded_ledger(&accounts);

    for handle in [first, second] {
        let Ok(_) = registry.with_constant_product(handle, |pool| {
            pool.add_liquidity(
                &mut ledger,
                &at(alice()),
                Amount::new(10_000),
                Amount::new(10_000),
                Liquidity::ZERO,
                None,
            )
        }) else {
            panic!("deposit");
        };
    }

    let request = SwapRequest::exact_in(usdc(), Amount::new(1_000), bob());
    let Ok(_) = registry.with_pool(first, |pool| pool.swap_exact_in(&mut ledger, &at(bob()), &request)) else {
        panic!("swap");
    };
    let Ok(untouched) = registry.with_constant_product(second, |pool| Ok(pool.reserves())) else {
        panic!("pool exists");
    };
    assert_eq!(untouched, (Amount::new(10_000), Amount::new(10_000)));

    // usdc is not traded by the weth/dai pool
    assert!(matches!(
        registry.with_pool(second, |pool| pool.quote_exact_in(usdc(), Amount::new(1))),
        Err(AmmError::InvalidToken(_))
    ));
}

#[test]
fn pool_events_serialise() {
    let mut registry = PoolRegistry::new();
    let handle = create(&mut registry, usdc(), weth(), &cp_config());
    let account = pool_account(&registry, handle);
    let mut ledger = funded_ledger(&[account]);
    let Ok(events) = registry.with_constant_product(handle, |pool| {
        pool.add_liquidity(
            &mut ledger,
            &at(alice()),
            Amount::new(10_000),
            Amount::new(10_000),
            Liquidity::ZERO,
            None,
        )?;
        pool.swap_exact_in(
            &mut ledger,
            &at(bob()),
            &SwapRequest::exact_in(usdc(), Amount::new(500), bob()),
        )?;
        Ok(pool.drain_events())
    }) else {
        panic!("operations");
    };
    assert!(matches!(events.first(), Some(PoolEvent::LiquidityMinted { .. })));
    assert!(matches!(events.last(), Some(PoolEvent::Sync { .. })));

    let Ok(json) = serde_json::to_string(&events) else {
        panic!("serialize");
    };
    assert!(json.contains(r#""event":"liquidity_minted""#));
    assert!(json.contains(r#""event":"swap""#));
    let Ok(back) = serde_json::from_str::<Vec<PoolEvent>>(&json) else {
        panic!("deserialize");
    };
    assert_eq!(back, events);
}
