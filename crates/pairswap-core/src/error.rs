// SPDX-License-Identifier: AGPL-3.0-only
//! Engine error type.
//!
//! Every variant aborts the enclosing transition; the host checkpoint is
//! reverted and pair state is left exactly as it was before the call.

use alloy_primitives::{Address, U256};
use pairswap_math::MathError;

pub type Result<T> = std::result::Result<T, AmmError>;

/// Failure category, for callers that only care about the class of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PreconditionViolation,
    AuthorizationFailure,
    DuplicateEntry,
    InsufficientLiquidity,
    InsufficientOutputReserve,
    InvariantViolation,
    Overflow,
    Underflow,
    ReentrancyRejected,
    /// Raised by the token primitive (balance, allowance, unknown asset).
    ExternalFailure,
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    #[error("identical asset identifiers")]
    IdenticalAssets,
    #[error("null asset identifier")]
    NullAsset,
    #[error("caller {caller} is not the fee setter")]
    Unauthorized { caller: Address },
    #[error("pair already exists for {token0}/{token1}")]
    PairExists { token0: Address, token1: Address },
    #[error("derived pair address {0} is already occupied")]
    AddressCollision(Address),
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,
    #[error("insufficient liquidity")]
    InsufficientLiquidity,
    #[error("insufficient output amount")]
    InsufficientOutputAmount,
    #[error("insufficient input amount")]
    InsufficientInputAmount,
    #[error("requested output meets or exceeds reserve")]
    InsufficientOutputReserve,
    #[error("invalid recipient {0}")]
    InvalidRecipient(Address),
    #[error("no flash-swap handler for recipient {0}")]
    MissingCallee(Address),
    #[error("constant product invariant violated")]
    InvariantViolation,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("arithmetic underflow")]
    Underflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("no time elapsed between observations")]
    ZeroElapsed,
    #[error("reentrant call rejected")]
    ReentrancyRejected,
    #[error("insufficient balance: have {have} need {need}")]
    InsufficientBalance { have: U256, need: U256 },
    #[error("allowance exceeded: have {have} need {need}")]
    InsufficientAllowance { have: U256, need: U256 },
    #[error("unknown token {0}")]
    UnknownToken(Address),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AmmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AmmError::IdenticalAssets
            | AmmError::NullAsset
            | AmmError::AddressCollision(_)
            | AmmError::InsufficientOutputAmount
            | AmmError::InsufficientInputAmount
            | AmmError::InvalidRecipient(_)
            | AmmError::MissingCallee(_)
            | AmmError::DivisionByZero
            | AmmError::ZeroElapsed => ErrorKind::PreconditionViolation,
            AmmError::Unauthorized { .. } => ErrorKind::AuthorizationFailure,
            AmmError::PairExists { .. } => ErrorKind::DuplicateEntry,
            AmmError::InsufficientLiquidityMinted
            | AmmError::InsufficientLiquidityBurned
            | AmmError::InsufficientLiquidity => ErrorKind::InsufficientLiquidity,
            AmmError::InsufficientOutputReserve => ErrorKind::InsufficientOutputReserve,
            AmmError::InvariantViolation => ErrorKind::InvariantViolation,
            AmmError::Overflow => ErrorKind::Overflow,
            AmmError::Underflow => ErrorKind::Underflow,
            AmmError::ReentrancyRejected => ErrorKind::ReentrancyRejected,
            AmmError::InsufficientBalance { .. }
            | AmmError::InsufficientAllowance { .. }
            | AmmError::UnknownToken(_) => ErrorKind::ExternalFailure,
            AmmError::Config(_) => ErrorKind::Configuration,
        }
    }
}

impl From<MathError> for AmmError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Overflow => AmmError::Overflow,
            MathError::Underflow => AmmError::Underflow,
            MathError::DivisionByZero => AmmError::DivisionByZero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_error_mapping() {
        assert_eq!(AmmError::from(MathError::Overflow), AmmError::Overflow);
        assert_eq!(AmmError::from(MathError::Underflow), AmmError::Underflow);
        assert_eq!(
            AmmError::from(MathError::DivisionByZero).kind(),
            ErrorKind::PreconditionViolation
        );
    }

    #[test]
    fn test_kind_taxonomy() {
        assert_eq!(AmmError::IdenticalAssets.kind(), ErrorKind::PreconditionViolation);
        assert_eq!(
            AmmError::Unauthorized { caller: Address::ZERO }.kind(),
            ErrorKind::AuthorizationFailure
        );
        assert_eq!(
            AmmError::PairExists {
                token0: Address::ZERO,
                token1: Address::ZERO
            }
            .kind(),
            ErrorKind::DuplicateEntry
        );
        assert_eq!(AmmError::InsufficientLiquidityBurned.kind(), ErrorKind::InsufficientLiquidity);
        assert_eq!(AmmError::ReentrancyRejected.kind(), ErrorKind::ReentrancyRejected);
    }

    #[test]
    fn test_display_messages() {
        let e = AmmError::InsufficientBalance {
            have: U256::from(5u64),
            need: U256::from(7u64),
        };
        assert_eq!(e.to_string(), "insufficient balance: have 5 need 7");
        assert_eq!(AmmError::InvariantViolation.to_string(), "constant product invariant violated");
    }
}
