// SPDX-License-Identifier: AGPL-3.0-only
//! # Safety-checked arithmetic
//!
//! Every add/sub/mul/div on balances, supplies and reserves goes through
//! [`SafeMath`]. Nothing here wraps: an unrepresentable result is an error.
//! The price accumulators are the only place in the engine that wraps, and
//! they call `wrapping_*` on `U256` directly.

use crate::MathError;
use alloy_primitives::U256;

/// Largest value a reserve may hold (`2^112 - 1`).
pub const UINT112_MAX: u128 = (1u128 << 112) - 1;

/// Checked arithmetic returning [`MathError`] instead of `None`.
pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self) -> Result<Self, MathError>;
    fn safe_sub(self, rhs: Self) -> Result<Self, MathError>;
    fn safe_mul(self, rhs: Self) -> Result<Self, MathError>;
    fn safe_div(self, rhs: Self) -> Result<Self, MathError>;
}

macro_rules! impl_safe_math {
    ($($t:ty),*) => {
        $(
            impl SafeMath for $t {
                #[inline]
                fn safe_add(self, rhs: Self) -> Result<Self, MathError> {
                    self.checked_add(rhs).ok_or(MathError::Overflow)
                }

                #[inline]
                fn safe_sub(self, rhs: Self) -> Result<Self, MathError> {
                    self.checked_sub(rhs).ok_or(MathError::Underflow)
                }

                #[inline]
                fn safe_mul(self, rhs: Self) -> Result<Self, MathError> {
                    self.checked_mul(rhs).ok_or(MathError::Overflow)
                }

                #[inline]
                fn safe_div(self, rhs: Self) -> Result<Self, MathError> {
                    self.checked_div(rhs).ok_or(MathError::DivisionByZero)
                }
            }
        )*
    };
}

impl_safe_math!(u32, u64, u128, U256);

/// Narrow a 256-bit balance to reserve width.
///
/// Fails with `Overflow` when `value > UINT112_MAX`; a pair whose custodial
/// balance no longer fits cannot be synchronized until the excess is skimmed.
pub fn to_uint112(value: U256) -> Result<u128, MathError> {
    if value > U256::from(UINT112_MAX) {
        return Err(MathError::Overflow);
    }
    u128::try_from(value).map_err(|_| MathError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_overflow_u128() {
        assert_eq!(u128::MAX.safe_add(1), Err(MathError::Overflow));
        assert_eq!(1u128.safe_add(2), Ok(3));
    }

    #[test]
    fn test_sub_underflow_u256() {
        let one = U256::from(1u64);
        assert_eq!(U256::ZERO.safe_sub(one), Err(MathError::Underflow));
        assert_eq!(one.safe_sub(one), Ok(U256::ZERO));
    }

    #[test]
    fn test_mul_overflow_u256() {
        assert_eq!(U256::MAX.safe_mul(U256::from(2u64)), Err(MathError::Overflow));
        assert_eq!(U256::MAX.safe_mul(U256::from(1u64)), Ok(U256::MAX));
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(7u32.safe_div(0), Err(MathError::DivisionByZero));
        assert_eq!(U256::from(7u64).safe_div(U256::from(2u64)), Ok(U256::from(3u64)));
    }

    #[test]
    fn test_u32_timestamp_width() {
        assert_eq!(u32::MAX.safe_add(1), Err(MathError::Overflow));
    }

    #[test]
    fn test_to_uint112_bounds() {
        assert_eq!(to_uint112(U256::from(UINT112_MAX)), Ok(UINT112_MAX));
        assert_eq!(
            to_uint112(U256::from(UINT112_MAX) + U256::from(1u64)),
            Err(MathError::Overflow)
        );
        assert_eq!(to_uint112(U256::ZERO), Ok(0));
    }

    #[test]
    fn test_product_of_max_reserves_fits_u256() {
        let max = U256::from(UINT112_MAX);
        let k = max.safe_mul(max).unwrap();
        // 1000^2 headroom for the fee-adjusted invariant check
        assert!(k.safe_mul(U256::from(1_000_000u64)).is_ok());
    }
}
