// SPDX-License-Identifier: AGPL-3.0-only
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PAIRSWAP - MATH PRIMITIVES
//
// Integer-only arithmetic used by the pair accounting core.
// - Safety-checked add/sub/mul/div over u32/u64/u128/U256
// - UQ112x112 binary fixed point for the price accumulators
// - Babylonian integer square root for liquidity share math
//
// No floating point anywhere: every result is reproducible bit-for-bit.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod safe_math;
pub mod sqrt;
pub mod uq112x112;

pub use alloy_primitives::U256;
pub use safe_math::{to_uint112, SafeMath, UINT112_MAX};
pub use sqrt::sqrt;
pub use uq112x112::{Q112, UQ112x112};

/// Failure of a checked arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("arithmetic overflow")]
    Overflow,
    #[error("arithmetic underflow")]
    Underflow,
    #[error("division by zero")]
    DivisionByZero,
}
