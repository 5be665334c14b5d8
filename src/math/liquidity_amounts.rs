//! Conversions between asset amounts and range liquidity.
//!
//! For a range `[a, b)` of sqrt prices (Q64.96) and liquidity `L`:
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | asset0 over `[a, b]` | `L × (b − a) / (a × b)` |
//! | asset1 over `[a, b]` | `L × (b − a)` |
//!
//! The current price `p` decides which asset a range holds: only asset0
//! when `p ≤ a`, only asset1 when `p ≥ b`, both otherwise with the range
//! split at `p`.

use alloy_primitives::U256;

use super::{Q96, div_rounding_up, mul_div, mul_div_rounding_up};
use crate::domain::{Amount, Liquidity, Rounding, SqrtPrice};
use crate::error::ArithmeticError;

fn ordered(a: SqrtPrice, b: SqrtPrice) -> Result<(U256, U256), ArithmeticError> {
    let (lo, hi) = if a <= b { (a.get(), b.get()) } else { (b.get(), a.get()) };
    if lo == hi {
        return Err(ArithmeticError::DivisionByZero("empty price interval"));
    }
    Ok((lo, hi))
}

/// Liquidity supplied by `amount0` of asset0 over `[a, b]`:
/// `amount0 × (a × b / Q96) / (b − a)`, rounded down.
///
/// # Errors
///
/// Division by zero for an empty interval, overflow if `L` exceeds 128 bits.
pub fn liquidity_for_amount0(
    a: SqrtPrice,
    b: SqrtPrice,
    amount0: Amount,
) -> Result<Liquidity, ArithmeticError> {
    let (lo, hi) = ordered(a, b)?;
    let intermediate = mul_div(lo, hi, Q96)?;
    Liquidity::from_u256(mul_div(amount0.to_u256(), intermediate, hi - lo)?)
}

/// Liquidity supplied by `amount1` of asset1 over `[a, b]`:
/// `amount1 × Q96 / (b − a)`, rounded down.
///
/// # Errors
///
/// Division by zero for an empty interval, overflow if `L` exceeds 128 bits.
pub fn liquidity_for_amount1(
    a: SqrtPrice,
    b: SqrtPrice,
    amount1: Amount,
) -> Result<Liquidity, ArithmeticError> {
    let (lo, hi) = ordered(a, b)?;
    Liquidity::from_u256(mul_div(amount1.to_u256(), Q96, hi - lo)?)
}

/// Largest liquidity the desired amounts can back over `[lower, upper)` at
/// price `p`.
///
/// When `lower < p < upper` this is the minimum of the asset0 candidate
/// over `[p, upper]` and the asset1 candidate over `[lower, p]`.
///
/// # Errors
///
/// See [`liquidity_for_amount0`].
pub fn liquidity_for_amounts(
    p: SqrtPrice,
    lower: SqrtPrice,
    upper: SqrtPrice,
    amount0: Amount,
    amount1: Amount,
) -> Result<Liquidity, ArithmeticError> {
    if p <= lower {
        liquidity_for_amount0(lower, upper, amount0)
    } else if p < upper {
        let from0 = liquidity_for_amount0(p, upper, amount0)?;
        let from1 = liquidity_for_amount1(lower, p, amount1)?;
        Ok(from0.min(from1))
    } else {
        liquidity_for_amount1(lower, upper, amount1)
    }
}

/// Asset0 backing `liquidity` over `[a, b]`:
/// `L × Q96 × (b − a) / b / a`.
///
/// # Errors
///
/// Division by zero for an empty interval, overflow if the amount exceeds
/// 128 bits.
pub fn amount0_for_liquidity(
    a: SqrtPrice,
    b: SqrtPrice,
    liquidity: Liquidity,
    rounding: Rounding,
) -> Result<Amount, ArithmeticError> {
    let (lo, hi) = ordered(a, b)?;
    let numerator1 = liquidity.to_u256() << 96;
    let numerator2 = hi - lo;
    let raw = match rounding {
        Rounding::Up => div_rounding_up(mul_div_rounding_up(numerator1, numerator2, hi)?, lo)?,
        Rounding::Down => mul_div(numerator1, numerator2, hi)? / lo,
    };
    Amount::from_u256(raw)
}

/// Asset1 backing `liquidity` over `[a, b]`: `L × (b − a) / Q96`.
///
/// # Errors
///
/// Division by zero for an empty interval, overflow if the amount exceeds
/// 128 bits.
pub fn amount1_for_liquidity(
    a: SqrtPrice,
    b: SqrtPrice,
    liquidity: Liquidity,
    rounding: Rounding,
) -> Result<Amount, ArithmeticError> {
    let (lo, hi) = ordered(a, b)?;
    let raw = match rounding {
        Rounding::Up => mul_div_rounding_up(liquidity.to_u256(), hi - lo, Q96)?,
        Rounding::Down => mul_div(liquidity.to_u256(), hi - lo, Q96)?,
    };
    Amount::from_u256(raw)
}

/// `(asset0, asset1)` backing `liquidity` in `[lower, upper)` at price `p`.
///
/// # Errors
///
/// See [`amount0_for_liquidity`].
pub fn amounts_for_liquidity(
    p: SqrtPrice,
    lower: SqrtPrice,
    upper: SqrtPrice,
    liquidity: Liquidity,
    rounding: Rounding,
) -> Result<(Amount, Amount), ArithmeticError> {
    if p <= lower {
        Ok((
            amount0_for_liquidity(lower, upper, liquidity, rounding)?,
            Amount::ZERO,
        ))
    } else if p < upper {
        Ok((
            amount0_for_liquidity(p, upper, liquidity, rounding)?,
            amount1_for_liquidity(lower, p, liquidity, rounding)?,
        ))
    } else {
        Ok((
            Amount::ZERO,
            amount1_for_liquidity(lower, upper, liquidity, rounding)?,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::math::encode_sqrt_price;

    fn price(amount1: u128, amount0: u128) -> SqrtPrice {
        let Ok(raw) = encode_sqrt_price(amount1, amount0) else {
            panic!("encodable price");
        };
        let Ok(p) = SqrtPrice::new(raw) else {
            panic!("in-bounds price");
        };
        p
    }

    // -- single-sided ---------------------------------------------------------

    #[test]
    fn amount1_liquidity_is_linear() {
        // [1, 4] in price terms is [1, 2] in sqrt terms; b − a = Q96.
        let (a, b) = (price(1, 1), price(4, 1));
        assert_eq!(
            liquidity_for_amount1(a, b, Amount::new(1_000)),
            Ok(Liquidity::new(1_000))
        );
        assert_eq!(
            amount1_for_liquidity(a, b, Liquidity::new(1_000), Rounding::Down),
            Ok(Amount::new(1_000))
        );
    }

    #[test]
    fn amount0_liquidity_over_one_to_two() {
        // a = 1, b = 2 (sqrt): a·b/(b−a) = 2, so L = 2 × amount0.
        let (a, b) = (price(1, 1), price(4, 1));
        assert_eq!(
            liquidity_for_amount0(a, b, Amount::new(500)),
            Ok(Liquidity::new(1_000))
        );
        assert_eq!(
            amount0_for_liquidity(a, b, Liquidity::new(1_000), Rounding::Down),
            Ok(Amount::new(500))
        );
    }

    #[test]
    fn argument_order_does_not_matter() {
        let (a, b) = (price(1, 1), price(4, 1));
        assert_eq!(
            liquidity_for_amount0(a, b, Amount::new(77)),
            liquidity_for_amount0(b, a, Amount::new(77))
        );
    }

    #[test]
    fn empty_interval_is_an_error() {
        let a = price(1, 1);
        assert!(liquidity_for_amount1(a, a, Amount::new(1)).is_err());
    }

    // -- case split -----------------------------------------------------------

    #[test]
    fn below_range_uses_asset0_only() {
        let (lower, upper) = (price(1, 1), price(4, 1));
        let Ok(l) = liquidity_for_amounts(lower, lower, upper, Amount::new(500), Amount::new(9))
        else {
            panic!("expected Ok");
        };
        assert_eq!(l, Liquidity::new(1_000));
        let Ok((a0, a1)) = amounts_for_liquidity(lower, lower, upper, l, Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!((a0, a1), (Amount::new(500), Amount::ZERO));
    }

    #[test]
    fn above_range_uses_asset1_only() {
        let (lower, upper) = (price(1, 1), price(4, 1));
        let Ok(l) = liquidity_for_amounts(upper, lower, upper, Amount::new(9), Amount::new(1_000))
        else {
            panic!("expected Ok");
        };
        assert_eq!(l, Liquidity::new(1_000));
        let Ok((a0, a1)) = amounts_for_liquidity(upper, lower, upper, l, Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(a0, Amount::ZERO);
        assert_eq!(a1, Amount::new(1_000));
    }

    #[test]
    fn straddling_takes_minimum() {
        let (lower, p, upper) = (price(1, 4), price(1, 1), price(4, 1));
        let (d0, d1) = (Amount::new(1_000_000), Amount::new(3_000_000));
        let Ok(l) = liquidity_for_amounts(p, lower, upper, d0, d1) else {
            panic!("expected Ok");
        };
        let (Ok(c0), Ok(c1)) = (
            liquidity_for_amount0(p, upper, d0),
            liquidity_for_amount1(lower, p, d1),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(l, c0.min(c1));

        let Ok((a0, a1)) = amounts_for_liquidity(p, lower, upper, l, Rounding::Up) else {
            panic!("expected Ok");
        };
        assert!(a0 <= d0);
        assert!(a1 <= d1);
    }

    #[test]
    fn rounding_up_never_below_rounding_down() {
        let (lower, p, upper) = (price(1, 9), price(3, 7), price(5, 1));
        let l = Liquidity::new(123_456_789);
        let (Ok(up), Ok(down)) = (
            amounts_for_liquidity(p, lower, upper, l, Rounding::Up),
            amounts_for_liquidity(p, lower, upper, l, Rounding::Down),
        ) else {
            panic!("expected Ok");
        };
        assert!(up.0 >= down.0 && up.1 >= down.1);
        assert!(up.0.get() - down.0.get() <= 1);
        assert!(up.1.get() - down.1.get() <= 1);
    }
}
