// SPDX-License-Identifier: AGPL-3.0-only
//! Babylonian integer square root over `U256`.

use alloy_primitives::U256;

/// `floor(√y)`.
///
/// Newton iteration from `y/2 + 1`; converges in O(log y) steps and never
/// overflows because every intermediate stays `<= y/2 + 1`.
pub fn sqrt(y: U256) -> U256 {
    if y > U256::from(3u64) {
        let two = U256::from(2u64);
        let mut z = y;
        let mut x = y / two + U256::from(1u64);
        while x < z {
            z = x;
            x = (y / x + x) / two;
        }
        z
    } else if !y.is_zero() {
        U256::from(1u64)
    } else {
        U256::ZERO
    }
}
