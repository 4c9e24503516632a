// SPDX-License-Identifier: AGPL-3.0-only
//! Pure sizing helpers for callers preparing deposits and swaps.
//!
//! | Helper            | Formula                                                     |
//! |-------------------|-------------------------------------------------------------|
//! | `quote`           | `amount_a * reserve_b / reserve_a`                          |
//! | `get_amount_out`  | `in*997*r_out / (r_in*1000 + in*997)` (floor)               |
//! | `get_amount_in`   | `r_in*out*1000 / ((r_out - out)*997) + 1` (ceil-ish)        |

pub use crate::address::{pair_for, sort_tokens};
use crate::error::{AmmError, Result};
use crate::pair::Pair;
use crate::{SWAP_FEE_DENOMINATOR, SWAP_FEE_NUMERATOR};
use alloy_primitives::{Address, U256};
use pairswap_math::SafeMath;

fn fee_multipliers() -> (U256, U256) {
    let denominator = U256::from(SWAP_FEE_DENOMINATOR);
    (denominator - U256::from(SWAP_FEE_NUMERATOR), denominator)
}

/// Amount of asset B equivalent to `amount_a` at the current reserve ratio.
pub fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    Ok(amount_a.safe_mul(reserve_b)? / reserve_a)
}

/// Largest output the pair will release for `amount_in`, fee included.
pub fn get_amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let (after_fee, denominator) = fee_multipliers();
    let amount_in_with_fee = amount_in.safe_mul(after_fee)?;
    let numerator = amount_in_with_fee.safe_mul(reserve_out)?;
    let denominator = reserve_in
        .safe_mul(denominator)?
        .safe_add(amount_in_with_fee)?;
    Ok(numerator / denominator)
}

/// Smallest input that pays for `amount_out`, fee included.
pub fn get_amount_in(amount_out: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    let (after_fee, denominator) = fee_multipliers();
    let numerator = reserve_in.safe_mul(amount_out)?.safe_mul(denominator)?;
    let denominator = (reserve_out - amount_out).safe_mul(after_fee)?;
    Ok((numerator / denominator).safe_add(U256::from(1u64))?)
}

/// Reserves of `pair` ordered as `(reserve_of(token_a), reserve_of(other))`.
pub fn reserves_for(pair: &Pair, token_a: &Address) -> (U256, U256) {
    let (reserve0, reserve1, _) = pair.get_reserves();
    if *token_a == pair.token0() {
        (U256::from(reserve0), U256::from(reserve1))
    } else {
        (U256::from(reserve1), U256::from(reserve0))
    }
}
