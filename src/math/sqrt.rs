//! Integer square roots and sqrt-price encoding.

use alloy_primitives::U256;

use super::{Q192, mul_div};
use crate::error::ArithmeticError;

/// `floor(sqrt(y))` for `u128`, by the Babylonian method.
///
/// ```
/// use pairswap::math::integer_sqrt;
///
/// assert_eq!(integer_sqrt(0), 0);
/// assert_eq!(integer_sqrt(8), 2);
/// assert_eq!(integer_sqrt(9), 3);
/// assert_eq!(integer_sqrt(4_000_000), 2_000);
/// ```
#[must_use]
pub const fn integer_sqrt(y: u128) -> u128 {
    if y > 3 {
        let mut z = y;
        let mut x = y / 2 + 1;
        while x < z {
            z = x;
            x = (y / x + x) / 2;
        }
        z
    } else if y != 0 {
        1
    } else {
        0
    }
}

/// `floor(sqrt(y))` for 256-bit values.
#[must_use]
pub fn integer_sqrt_u256(y: U256) -> U256 {
    if y > U256::from(3u8) {
        let mut z = y;
        let mut x = (y >> 1) + U256::ONE;
        while x < z {
            z = x;
            x = (y / x + x) >> 1;
        }
        z
    } else if y.is_zero() {
        U256::ZERO
    } else {
        U256::ONE
    }
}

/// Q64.96 sqrt price of a pool holding `amount1` of asset1 per `amount0` of
/// asset0: `sqrt(amount1 × 2^192 / amount0)`, rounded down.
///
/// # Errors
///
/// [`ArithmeticError::DivisionByZero`] if `amount0` is zero, overflow if the
/// ratio does not fit 256 bits.
///
/// ```
/// use pairswap::math::{Q96, encode_sqrt_price};
///
/// assert_eq!(encode_sqrt_price(1, 1), Ok(Q96));
/// assert_eq!(encode_sqrt_price(4, 1), Ok(Q96 * alloy_primitives::U256::from(2u8)));
/// ```
pub fn encode_sqrt_price(amount1: u128, amount0: u128) -> Result<U256, ArithmeticError> {
    let ratio_x192 = mul_div(U256::from(amount1), Q192, U256::from(amount0))?;
    Ok(integer_sqrt_u256(ratio_x192))
}
