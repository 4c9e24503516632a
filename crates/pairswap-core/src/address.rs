// SPDX-License-Identifier: AGPL-3.0-only
//! Deterministic pair addressing.
//!
//! A pair's address is a pure function of the factory address, the sorted
//! token pair and the pair template hash, so any party can compute it without
//! querying the factory:
//!
//! ```text
//! salt    = blake3(token0 ‖ token1)
//! digest  = blake3(0xff ‖ factory ‖ salt ‖ pair_code_hash)
//! address = digest[12..32]
//! ```

use crate::error::{AmmError, Result};
use alloy_primitives::{Address, B256};

/// Identifier of the pair program. Changing it moves every derived address.
pub const PAIR_TEMPLATE: &[u8] = b"pairswap:pair:v1";

pub fn pair_code_hash() -> B256 {
    B256::from(*blake3::hash(PAIR_TEMPLATE).as_bytes())
}

/// Order two assets ascending. Identical or null identifiers are rejected.
pub fn sort_tokens(a: Address, b: Address) -> Result<(Address, Address)> {
    if a == b {
        return Err(AmmError::IdenticalAssets);
    }
    let (token0, token1) = if a < b { (a, b) } else { (b, a) };
    if token0 == Address::ZERO {
        return Err(AmmError::NullAsset);
    }
    Ok((token0, token1))
}

/// Address of the pair for an already-sorted `(token0, token1)`.
pub fn derive_pair_address(factory: &Address, token0: &Address, token1: &Address) -> Address {
    let mut salt_input = [0u8; 40];
    salt_input[..20].copy_from_slice(token0.as_slice());
    salt_input[20..].copy_from_slice(token1.as_slice());
    let salt = blake3::hash(&salt_input);

    let mut hasher = blake3::Hasher::new();
    hasher.update(&[0xff]);
    hasher.update(factory.as_slice());
    hasher.update(salt.as_bytes());
    hasher.update(pair_code_hash().as_slice());
    let digest = hasher.finalize();
    Address::from_slice(&digest.as_bytes()[12..32])
}

/// Sort `a`/`b` and derive the pair address under `factory`.
pub fn pair_for(factory: &Address, a: Address, b: Address) -> Result<Address> {
    let (token0, token1) = sort_tokens(a, b)?;
    Ok(derive_pair_address(factory, &token0, &token1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORY: Address = Address::repeat_byte(0xfa);
    const TKA: Address = Address::repeat_byte(0x11);
    const TKB: Address = Address::repeat_byte(0x22);

    #[test]
    fn test_sort_tokens_orders_ascending() {
        assert_eq!(sort_tokens(TKB, TKA).unwrap(), (TKA, TKB));
        assert_eq!(sort_tokens(TKA, TKB).unwrap(), (TKA, TKB));
    }

    #[test]
    fn test_sort_tokens_rejects_identical() {
        assert_eq!(sort_tokens(TKA, TKA), Err(AmmError::IdenticalAssets));
    }

    #[test]
    fn test_sort_tokens_rejects_null() {
        assert_eq!(sort_tokens(Address::ZERO, TKA), Err(AmmError::NullAsset));
        assert_eq!(sort_tokens(TKA, Address::ZERO), Err(AmmError::NullAsset));
    }

    #[test]
    fn test_pair_for_is_order_independent() {
        assert_eq!(
            pair_for(&FACTORY, TKA, TKB).unwrap(),
            pair_for(&FACTORY, TKB, TKA).unwrap()
        );
    }

    #[test]
    fn test_address_depends_on_factory() {
        let other = Address::repeat_byte(0xfb);
        assert_ne!(
            derive_pair_address(&FACTORY, &TKA, &TKB),
            derive_pair_address(&other, &TKA, &TKB)
        );
    }

    #[test]
    fn test_code_hash_is_stable() {
        assert_eq!(pair_code_hash(), pair_code_hash());
        assert_ne!(pair_code_hash(), B256::ZERO);
    }
}
