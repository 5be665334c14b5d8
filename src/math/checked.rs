//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning inherent methods of
//! [`Amount`] and [`Liquidity`] into [`ArithmeticError`]s that propagate
//! with `?`, and adds [`scale`](CheckedArithmetic::scale), the
//! `self × numerator / denominator` step every proportional share or
//! payout computation needs.
//!
//! # Examples
//!
//! ```
//! use pairswap::domain::{Amount, Rounding};
//! use pairswap::math::CheckedArithmetic;
//!
//! let deposit = Amount::new(500);
//! // 500 × 2_000 / 1_000
//! assert_eq!(deposit.scale(2_000, 1_000, Rounding::Down), Ok(Amount::new(1_000)));
//! ```

use alloy_primitives::U256;

use super::{mul_div, mul_div_rounding_up};
use crate::domain::{Amount, Liquidity, Rounding};
use crate::error::ArithmeticError;

/// Fallible arithmetic for domain wrapper types.
///
/// No method panics or saturates; every failure is an `Err`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] past `u128::MAX`.
    fn safe_add(&self, other: &Self) -> Result<Self, ArithmeticError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Underflow`] if `other > self`.
    fn safe_sub(&self, other: &Self) -> Result<Self, ArithmeticError>;

    /// Checked division with explicit [`Rounding`].
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError>;

    /// `self × numerator / denominator` on a 256-bit intermediate.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::DivisionByZero`] if `denominator` is zero,
    /// [`ArithmeticError::Overflow`] if the result exceeds 128 bits.
    fn scale(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, ArithmeticError>;
}

fn scale_raw(
    value: u128,
    numerator: u128,
    denominator: u128,
    rounding: Rounding,
) -> Result<U256, ArithmeticError> {
    let (a, b, d) = (U256::from(value), U256::from(numerator), U256::from(denominator));
    match rounding {
        Rounding::Down => mul_div(a, b, d),
        Rounding::Up => mul_div_rounding_up(a, b, d),
    }
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.checked_add(other)
            .ok_or(ArithmeticError::Overflow("amount addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.checked_sub(other)
            .ok_or(ArithmeticError::Underflow("amount subtraction"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError> {
        self.checked_div(other, rounding)
            .ok_or(ArithmeticError::DivisionByZero("amount division"))
    }

    fn scale(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, ArithmeticError> {
        Self::from_u256(scale_raw(self.get(), numerator, denominator, rounding)?)
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.checked_add(other)
            .ok_or(ArithmeticError::Overflow("liquidity addition"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.checked_sub(other)
            .ok_or(ArithmeticError::Underflow("liquidity subtraction"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError> {
        super::div_round(self.get(), other.get(), rounding)
            .map(Liquidity::new)
            .ok_or(ArithmeticError::DivisionByZero("liquidity division"))
    }

    fn scale(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, ArithmeticError> {
        Self::from_u256(scale_raw(self.get(), numerator, denominator, rounding)?)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Amount ---------------------------------------------------------------

    #[test]
    fn amount_add_overflow() {
        assert!(matches!(
            Amount::MAX.safe_add(&Amount::new(1)),
            Err(ArithmeticError::Overflow(_))
        ));
    }

    #[test]
    fn amount_sub_underflow() {
        assert!(matches!(
            Amount::new(1).safe_sub(&Amount::new(2)),
            Err(ArithmeticError::Underflow(_))
        ));
    }

    #[test]
    fn amount_div_rounding() {
        assert_eq!(
            Amount::new(10).safe_div(&Amount::new(3), Rounding::Up),
            Ok(Amount::new(4))
        );
        assert!(matches!(
            Amount::new(10).safe_div(&Amount::ZERO, Rounding::Down),
            Err(ArithmeticError::DivisionByZero(_))
        ));
    }

    #[test]
    fn amount_scale_uses_wide_intermediate() {
        // u128::MAX × 3 / 3 would overflow a u128 product.
        assert_eq!(Amount::MAX.scale(3, 3, Rounding::Down), Ok(Amount::MAX));
    }

    #[test]
    fn amount_scale_rounds() {
        assert_eq!(Amount::new(10).scale(1, 3, Rounding::Down), Ok(Amount::new(3)));
        assert_eq!(Amount::new(10).scale(1, 3, Rounding::Up), Ok(Amount::new(4)));
    }

    #[test]
    fn amount_scale_result_overflow() {
        assert!(matches!(
            Amount::MAX.scale(2, 1, Rounding::Down),
            Err(ArithmeticError::Overflow(_))
        ));
    }

    // -- Liquidity ------------------------------------------------------------

    #[test]
    fn liquidity_chain() {
        let Ok(sum) = Liquidity::new(100).safe_add(&Liquidity::new(50)) else {
            panic!("expected Ok");
        };
        let Ok(diff) = sum.safe_sub(&Liquidity::new(30)) else {
            panic!("expected Ok");
        };
        assert_eq!(diff, Liquidity::new(120));
    }

    #[test]
    fn liquidity_scale_by_zero_denominator() {
        assert!(matches!(
            Liquidity::new(1).scale(1, 0, Rounding::Down),
            Err(ArithmeticError::DivisionByZero(_))
        ));
    }
}
