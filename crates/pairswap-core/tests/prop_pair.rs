// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PROPERTY-BASED TESTS - pairswap-core
//
// Pair and ledger invariants over randomized reserves and operation sequences.
// Run: cargo test --release -p pairswap-core --test prop_pair
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use pairswap_core::library::get_amount_out;
use pairswap_core::{Address, AmmError, Factory, Host, MemoryHost, Pair, ShareLedger, SwapRequest, U256};
use proptest::prelude::*;
use std::sync::Arc;

const FACTORY: Address = Address::repeat_byte(0xfa);
const SETTER: Address = Address::repeat_byte(0x5e);
const LP: Address = Address::repeat_byte(0xa1);
const TRADER: Address = Address::repeat_byte(0xb0);

fn u(v: u128) -> U256 {
    U256::from(v)
}

/// Fresh pair seeded with `(r0, r1)` by `LP`.
fn seeded_pair(r0: u128, r1: u128) -> (Factory, MemoryHost, Arc<Pair>) {
    let factory = Factory::new(FACTORY, SETTER);
    let mut host = MemoryHost::new(1);
    let a = host.deploy_token("TKA", 18);
    let b = host.deploy_token("TKB", 18);
    let pair = factory.create_pair(&mut host, a, b).unwrap();
    for who in [LP, TRADER] {
        host.mint(&a, &who, U256::MAX >> 1usize).unwrap();
        host.mint(&b, &who, U256::MAX >> 1usize).unwrap();
    }
    host.transfer(&pair.token0(), &LP, &pair.address(), u(r0)).unwrap();
    host.transfer(&pair.token1(), &LP, &pair.address(), u(r1)).unwrap();
    pair.mint(&mut host, LP, LP).unwrap();
    (factory, host, pair)
}

fn k(pair: &Pair) -> U256 {
    let (r0, r1, _) = pair.get_reserves();
    u(r0) * u(r1)
}

#[derive(Debug, Clone)]
enum LedgerOp {
    Mint(u8, u64),
    Burn(u8, u64),
    Transfer(u8, u8, u64),
}

fn holder(i: u8) -> Address {
    Address::repeat_byte(i % 4 + 1)
}

fn ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        (any::<u8>(), any::<u64>()).prop_map(|(h, v)| LedgerOp::Mint(h, v)),
        (any::<u8>(), any::<u64>()).prop_map(|(h, v)| LedgerOp::Burn(h, v)),
        (any::<u8>(), any::<u8>(), any::<u64>()).prop_map(|(f, t, v)| LedgerOp::Transfer(f, t, v)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// PROPERTY: a swap sized by get_amount_out succeeds and never lowers k
    #[test]
    fn prop_swap_never_decreases_k(
        r0 in 10_000u128..1_000_000_000_000_000_000_000_000,
        r1 in 10_000u128..1_000_000_000_000_000_000_000_000,
        amount_in in 1u128..1_000_000_000_000_000_000_000,
    ) {
        let (_f, mut host, pair) = seeded_pair(r0, r1);
        let out = get_amount_out(u(amount_in), u(r0), u(r1)).unwrap();
        prop_assume!(!out.is_zero());
        let k_before = k(&pair);
        host.transfer(&pair.token0(), &TRADER, &pair.address(), u(amount_in)).unwrap();
        pair.swap(&mut host, TRADER, SwapRequest::new(U256::ZERO, out, TRADER), None).unwrap();
        prop_assert!(k(&pair) >= k_before);
    }

    /// PROPERTY: one unit beyond get_amount_out is always rejected
    #[test]
    fn prop_swap_overreach_rejected(
        r0 in 10_000u128..1_000_000_000_000_000_000_000_000,
        r1 in 10_000u128..1_000_000_000_000_000_000_000_000,
        amount_in in 1u128..1_000_000_000_000_000_000_000,
    ) {
        let (_f, mut host, pair) = seeded_pair(r0, r1);
        let out = get_amount_out(u(amount_in), u(r0), u(r1)).unwrap() + u(1);
        prop_assume!(out < u(r1));
        host.transfer(&pair.token0(), &TRADER, &pair.address(), u(amount_in)).unwrap();
        let result = pair.swap(&mut host, TRADER, SwapRequest::new(U256::ZERO, out, TRADER), None);
        prop_assert_eq!(result, Err(AmmError::InvariantViolation));
        prop_assert_eq!(pair.get_reserves().0, r0);
    }

    /// PROPERTY: mint then burn of the fresh shares never returns more than deposited
    #[test]
    fn prop_mint_burn_roundtrip_never_profits(
        r0 in 10_000u128..1_000_000_000_000_000_000_000,
        r1 in 10_000u128..1_000_000_000_000_000_000_000,
        d0 in 1_000u128..1_000_000_000_000_000_000_000,
        d1 in 1_000u128..1_000_000_000_000_000_000_000,
    ) {
        let (_f, mut host, pair) = seeded_pair(r0, r1);
        let (t0, t1, addr) = (pair.token0(), pair.token1(), pair.address());
        host.transfer(&t0, &TRADER, &addr, u(d0)).unwrap();
        host.transfer(&t1, &TRADER, &addr, u(d1)).unwrap();
        let shares = match pair.mint(&mut host, TRADER, TRADER) {
            Ok(s) => s,
            Err(e) => {
                prop_assert_eq!(e, AmmError::InsufficientLiquidityMinted);
                return Ok(());
            }
        };
        pair.transfer(&mut host, TRADER, addr, shares).unwrap();
        match pair.burn(&mut host, TRADER, TRADER) {
            Ok((a0, a1)) => {
                prop_assert!(a0 <= u(d0));
                prop_assert!(a1 <= u(d1));
            }
            Err(e) => prop_assert_eq!(e, AmmError::InsufficientLiquidityBurned),
        }
    }

    /// PROPERTY: Σ balances == total supply after any operation sequence
    #[test]
    fn prop_ledger_supply_matches_balances(ops in prop::collection::vec(ledger_op(), 1..64)) {
        let mut ledger = ShareLedger::new();
        for op in ops {
            let _ = match op {
                LedgerOp::Mint(h, v) => ledger.mint(&holder(h), U256::from(v)),
                LedgerOp::Burn(h, v) => ledger.burn(&holder(h), U256::from(v)),
                LedgerOp::Transfer(f, t, v) => ledger.transfer(&holder(f), &holder(t), U256::from(v)),
            };
            let sum = ledger.holders().fold(U256::ZERO, |acc, (_, v)| acc + *v);
            prop_assert_eq!(sum, ledger.total_supply());
        }
    }
}
