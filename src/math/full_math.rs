//! Full-precision `a × b / d` on 256-bit integers and Q64.96 helpers.

use alloy_primitives::U256;

use crate::error::ArithmeticError;

/// `2^96`, the unit of the Q64.96 format.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// `2^192`, the square of [`Q96`].
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

const TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

/// Computes `floor(a × b / denominator)` without losing the high half of
/// the 512-bit product.
///
/// # Errors
///
/// [`ArithmeticError::DivisionByZero`] if `denominator` is zero and
/// [`ArithmeticError::Overflow`] if the quotient exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use pairswap::math::mul_div;
///
/// // (2^255 × 4) / 8 = 2^254, although the product needs 258 bits.
/// let half = U256::from(1u8) << 255;
/// assert_eq!(mul_div(half, U256::from(4u8), U256::from(8u8)), Ok(U256::from(1u8) << 254));
/// ```
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, ArithmeticError> {
    if denominator.is_zero() {
        return Err(ArithmeticError::DivisionByZero("mul_div denominator"));
    }

    // 512-bit product as [prod1 prod0].
    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);
    let (mut prod1, borrow) = mm.overflowing_sub(prod0);
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0 / denominator);
    }
    if denominator <= prod1 {
        return Err(ArithmeticError::Overflow("mul_div result exceeds 256 bits"));
    }

    // Make the division exact by subtracting the remainder.
    let remainder = a.mul_mod(b, denominator);
    let (reduced, borrow) = prod0.overflowing_sub(remainder);
    prod0 = reduced;
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    // Factor powers of two out of the denominator.
    let twos = denominator & denominator.wrapping_neg();
    denominator /= twos;
    prod0 /= twos;
    let flip = (twos.wrapping_neg() / twos).wrapping_add(U256::ONE);
    prod0 |= prod1.wrapping_mul(flip);

    // Modular inverse of the odd denominator by Newton-Raphson; each step
    // doubles the correct bits (8 → 256).
    let mut inverse = THREE.wrapping_mul(denominator) ^ TWO;
    for _ in 0..6 {
        inverse = inverse.wrapping_mul(TWO.wrapping_sub(denominator.wrapping_mul(inverse)));
    }

    Ok(prod0.wrapping_mul(inverse))
}

/// Like [`mul_div`] but rounds up on a non-zero remainder.
///
/// # Errors
///
/// Same as [`mul_div`], plus overflow if rounding up passes `U256::MAX`.
pub fn mul_div_rounding_up(
    a: U256,
    b: U256,
    denominator: U256,
) -> Result<U256, ArithmeticError> {
    let result = mul_div(a, b, denominator)?;
    if a.mul_mod(b, denominator).is_zero() {
        return Ok(result);
    }
    result
        .checked_add(U256::ONE)
        .ok_or(ArithmeticError::Overflow("mul_div rounding up"))
}

/// `ceil(a / b)`.
///
/// # Errors
///
/// [`ArithmeticError::DivisionByZero`] if `b` is zero.
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256, ArithmeticError> {
    if b.is_zero() {
        return Err(ArithmeticError::DivisionByZero("div_rounding_up"));
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}

/// Q96 product: `a × b / 2^96`, rounded down.
///
/// # Errors
///
/// [`ArithmeticError::Overflow`] if the result exceeds 256 bits.
pub fn mul_div_q(a: U256, b: U256) -> Result<U256, ArithmeticError> {
    mul_div(a, b, Q96)
}

/// Q96 reciprocal: `2^192 / x`, rounded down.
///
/// For `x` representing `v` in Q96 the result represents `1 / v` in Q96.
///
/// # Errors
///
/// [`ArithmeticError::DivisionByZero`] if `x` is zero.
pub fn reciprocal_q(x: U256) -> Result<U256, ArithmeticError> {
    if x.is_zero() {
        return Err(ArithmeticError::DivisionByZero("reciprocal of zero"));
    }
    Ok(Q192 / x)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn u(v: u128) -> U256 {
        U256::from(v)
    }

    #[test]
    fn constants() {
        assert_eq!(Q96, U256::from(1u8) << 96);
        assert_eq!(Q192, U256::from(1u8) << 192);
    }

    // -- mul_div --------------------------------------------------------------

    #[test]
    fn mul_div_small() {
        assert_eq!(mul_div(u(10), u(20), u(5)), Ok(u(40)));
        assert_eq!(mul_div(u(10), u(3), u(4)), Ok(u(7)));
    }

    #[test]
    fn mul_div_by_zero() {
        assert!(matches!(
            mul_div(u(1), u(1), U256::ZERO),
            Err(ArithmeticError::DivisionByZero(_))
        ));
    }

    #[test]
    fn mul_div_wide_product() {
        // MAX × MAX / MAX = MAX
        assert_eq!(mul_div(U256::MAX, U256::MAX, U256::MAX), Ok(U256::MAX));
        // (Q192 × Q192) / Q192 with a 384-bit product.
        assert_eq!(mul_div(Q192, Q192, Q192), Ok(Q192));
    }

    #[test]
    fn mul_div_odd_denominator_in_wide_path() {
        // 2^255 × 6 / 3 = 2^256 overflows; 2^255 × 3 / 6 = 2^254.
        let half = U256::from(1u8) << 255;
        assert_eq!(mul_div(half, u(3), u(6)), Ok(U256::from(1u8) << 254));
        assert!(matches!(
            mul_div(half, u(6), u(3)),
            Err(ArithmeticError::Overflow(_))
        ));
    }

    #[test]
    fn mul_div_result_too_large() {
        assert!(matches!(
            mul_div(U256::MAX, u(2), u(1)),
            Err(ArithmeticError::Overflow(_))
        ));
    }

    // -- rounding up ----------------------------------------------------------

    #[test]
    fn rounding_up() {
        assert_eq!(mul_div_rounding_up(u(10), u(3), u(4)), Ok(u(8)));
        assert_eq!(mul_div_rounding_up(u(10), u(2), u(4)), Ok(u(5)));
        assert_eq!(div_rounding_up(u(7), u(2)), Ok(u(4)));
        assert_eq!(div_rounding_up(u(8), u(2)), Ok(u(4)));
        assert!(div_rounding_up(u(8), U256::ZERO).is_err());
    }

    #[test]
    fn rounding_up_at_max() {
        // MAX × (MAX − 1) / MAX is exact; nothing to round.
        assert_eq!(
            mul_div_rounding_up(U256::MAX, U256::MAX - U256::ONE, U256::MAX),
            Ok(U256::MAX - U256::ONE)
        );
        // (MAX − 1) × 3 / 2 exceeds 256 bits.
        assert!(mul_div_rounding_up(U256::MAX - U256::ONE, u(3), u(2)).is_err());
    }

    // -- Q96 ------------------------------------------------------------------

    #[test]
    fn q96_product_of_ones() {
        assert_eq!(mul_div_q(Q96, Q96), Ok(Q96));
        assert_eq!(mul_div_q(Q96 * u(2), Q96 * u(3)), Ok(Q96 * u(6)));
    }

    #[test]
    fn reciprocal() {
        assert_eq!(reciprocal_q(Q96), Ok(Q96));
        assert_eq!(reciprocal_q(Q96 * u(4)), Ok(Q96 / u(4)));
        assert!(matches!(
            reciprocal_q(U256::ZERO),
            Err(ArithmeticError::DivisionByZero(_))
        ));
    }
}
