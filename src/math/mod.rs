//! Fixed-point arithmetic for pricing and liquidity accounting.
//!
//! Everything here is integer math: `u128` for amounts and liquidity,
//! 256-bit [`U256`](alloy_primitives::U256) accumulators for products and
//! Q64.96 sqrt prices.  Failures surface as
//! [`ArithmeticError`](crate::error::ArithmeticError).
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`div_round`] | `u128` division with explicit [`Rounding`](crate::domain::Rounding) |
//! | [`mul_div`], [`mul_div_rounding_up`] | full-precision `a × b / d` |
//! | [`mul_div_q`], [`reciprocal_q`] | Q96 product and reciprocal |
//! | [`integer_sqrt`], [`integer_sqrt_u256`] | floor square roots |
//! | [`encode_sqrt_price`] | amount ratio to Q64.96 sqrt price |
//! | `liquidity_for_*`, `amount*_for_liquidity` | range liquidity conversions |
//! | [`CheckedArithmetic`] | typed errors for domain arithmetic |

mod checked;
mod full_math;
mod liquidity_amounts;
mod rounding;
mod sqrt;

pub use checked::CheckedArithmetic;
pub use full_math::{
    Q96, Q192, div_rounding_up, mul_div, mul_div_q, mul_div_rounding_up, reciprocal_q,
};
pub use liquidity_amounts::{
    amount0_for_liquidity, amount1_for_liquidity, amounts_for_liquidity, liquidity_for_amount0,
    liquidity_for_amount1, liquidity_for_amounts,
};
pub use rounding::div_round;
pub use sqrt::{encode_sqrt_price, integer_sqrt, integer_sqrt_u256};
