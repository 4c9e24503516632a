// SPDX-License-Identifier: AGPL-3.0-only
//! UQ112x112: unsigned binary fixed point, 112 integer bits and 112
//! fractional bits, stored in the low 224 bits of a `U256`.
//!
//! Only used to feed the price accumulators. Settlement amounts never pass
//! through this type.

use crate::MathError;
use alloy_primitives::U256;
use std::fmt;

/// `2^112`, the fixed-point resolution.
pub const Q112: U256 = U256::from_limbs([0, 1 << 48, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct UQ112x112(U256);

impl UQ112x112 {
    /// Encode a reserve-width integer as fixed point. Never overflows for
    /// `y <= UINT112_MAX`.
    pub fn encode(y: u128) -> Self {
        UQ112x112(U256::from(y) << 112usize)
    }

    /// Floor-divide by a reserve-width integer.
    pub fn uqdiv(self, y: u128) -> Result<Self, MathError> {
        if y == 0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(UQ112x112(self.0 / U256::from(y)))
    }

    /// `numerator / denominator` as fixed point.
    pub fn ratio(numerator: u128, denominator: u128) -> Result<Self, MathError> {
        Self::encode(numerator).uqdiv(denominator)
    }

    pub fn from_raw(raw: U256) -> Self {
        UQ112x112(raw)
    }

    pub fn into_raw(self) -> U256 {
        self.0
    }

    /// Integer part, truncated.
    pub fn floor(self) -> U256 {
        self.0 >> 112usize
    }

    /// Apply the ratio to an amount: `floor(self * amount / 2^112)`.
    pub fn mul_floor(self, amount: U256) -> Result<U256, MathError> {
        let product = self.0.checked_mul(amount).ok_or(MathError::Overflow)?;
        Ok(product >> 112usize)
    }
}

impl fmt::Display for UQ112x112 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/2^112", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UINT112_MAX;

    #[test]
    fn test_q112_constant() {
        assert_eq!(Q112, U256::from(1u64) << 112usize);
    }

    #[test]
    fn test_encode_one() {
        assert_eq!(UQ112x112::encode(1).into_raw(), Q112);
    }

    #[test]
    fn test_encode_max_fits_224_bits() {
        let v = UQ112x112::encode(UINT112_MAX).into_raw();
        assert!(v.bit_len() <= 224);
    }

    #[test]
    fn test_ratio_equal_reserves_is_one() {
        let r = UQ112x112::ratio(3_000, 3_000).unwrap();
        assert_eq!(r.into_raw(), Q112);
        assert_eq!(r.floor(), U256::from(1u64));
    }

    #[test]
    fn test_ratio_floor_division() {
        // 1/3 floors in the last fractional bit
        let r = UQ112x112::ratio(1, 3).unwrap();
        assert_eq!(r.into_raw(), Q112 / U256::from(3u64));
        assert_eq!(r.floor(), U256::ZERO);
    }

    #[test]
    fn test_uqdiv_zero_denominator() {
        assert_eq!(
            UQ112x112::encode(5).uqdiv(0),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_mul_floor() {
        let half = UQ112x112::ratio(1, 2).unwrap();
        assert_eq!(half.mul_floor(U256::from(11u64)).unwrap(), U256::from(5u64));
    }
}
