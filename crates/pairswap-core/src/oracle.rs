// SPDX-License-Identifier: AGPL-3.0-only
//! Time-weighted average price helpers.
//!
//! Pairs accumulate `price * seconds` in UQ112x112 form. Accumulators wrap at
//! 256 bits and timestamps at 32 bits; averages are taken over differences,
//! which stay correct modulo both widths.

use crate::error::{AmmError, Result};
use crate::host::Host;
use crate::pair::Pair;
use alloy_primitives::U256;
use pairswap_math::UQ112x112;
use serde::{Deserialize, Serialize};

/// Advance `cumulative` by `numerator / denominator` held for `elapsed`
/// seconds. Wrapping is intended.
pub fn accumulate(
    cumulative: U256,
    numerator: u128,
    denominator: u128,
    elapsed: u32,
) -> Result<U256> {
    let price = UQ112x112::encode(numerator).uqdiv(denominator)?.into_raw();
    Ok(cumulative.wrapping_add(price.wrapping_mul(U256::from(elapsed))))
}

/// Accumulator values the pair would report if it were synced right now,
/// without touching the pair.
pub fn current_cumulative_prices(pair: &Pair, host: &dyn Host) -> Result<PriceObservation> {
    let block_timestamp = (host.block_timestamp() % (1u64 << 32)) as u32;
    let info = pair.info();
    let mut price0_cumulative = info.price0_cumulative_last;
    let mut price1_cumulative = info.price1_cumulative_last;

    let elapsed = block_timestamp.wrapping_sub(info.block_timestamp_last);
    if elapsed > 0 && info.reserve0 != 0 && info.reserve1 != 0 {
        price0_cumulative = accumulate(price0_cumulative, info.reserve1, info.reserve0, elapsed)?;
        price1_cumulative = accumulate(price1_cumulative, info.reserve0, info.reserve1, elapsed)?;
    }
    Ok(PriceObservation {
        timestamp: block_timestamp,
        price0_cumulative,
        price1_cumulative,
    })
}

/// One reading of a pair's accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub timestamp: u32,
    pub price0_cumulative: U256,
    pub price1_cumulative: U256,
}

/// Average `(price0, price1)` between two observations of the same pair.
pub fn average_price(
    older: &PriceObservation,
    newer: &PriceObservation,
) -> Result<(UQ112x112, UQ112x112)> {
    let elapsed = newer.timestamp.wrapping_sub(older.timestamp);
    if elapsed == 0 {
        return Err(AmmError::ZeroElapsed);
    }
    let elapsed = U256::from(elapsed);
    let price0 = newer
        .price0_cumulative
        .wrapping_sub(older.price0_cumulative)
        / elapsed;
    let price1 = newer
        .price1_cumulative
        .wrapping_sub(older.price1_cumulative)
        / elapsed;
    Ok((UQ112x112::from_raw(price0), UQ112x112::from_raw(price1)))
}
