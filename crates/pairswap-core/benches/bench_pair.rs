// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK SUITE - pairswap-core
//
// Run: cargo bench -p pairswap-core
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pairswap_core::library::get_amount_out;
use pairswap_core::{Address, Factory, Host, MemoryHost, SwapRequest, U256};

const FACTORY: Address = Address::repeat_byte(0xfa);
const SETTER: Address = Address::repeat_byte(0x5e);
const TRADER: Address = Address::repeat_byte(0xb0);

fn bench_swap_roundtrip(c: &mut Criterion) {
    let factory = Factory::new(FACTORY, SETTER);
    let mut host = MemoryHost::new(1);
    let a = host.deploy_token("TKA", 18);
    let b = host.deploy_token("TKB", 18);
    let pair = factory.create_pair(&mut host, a, b).unwrap();
    let (t0, t1) = (pair.token0(), pair.token1());
    host.mint(&t0, &TRADER, U256::from(u128::MAX)).unwrap();
    host.mint(&t1, &TRADER, U256::from(u128::MAX)).unwrap();
    let seed = U256::from(1_000_000_000_000_000_000_000u128);
    host.transfer(&t0, &TRADER, &pair.address(), seed).unwrap();
    host.transfer(&t1, &TRADER, &pair.address(), seed).unwrap();
    pair.mint(&mut host, TRADER, TRADER).unwrap();

    let amount_in = U256::from(1_000_000_000_000_000u128);
    c.bench_function("pair/swap_back_and_forth", |bch| {
        bch.iter(|| {
            for (token_in, zero_for_one) in [(t0, true), (t1, false)] {
                let (r0, r1, _) = pair.get_reserves();
                let (r_in, r_out) = if zero_for_one { (r0, r1) } else { (r1, r0) };
                let out = get_amount_out(amount_in, U256::from(r_in), U256::from(r_out)).unwrap();
                host.transfer(&token_in, &TRADER, &pair.address(), amount_in).unwrap();
                let request = if zero_for_one {
                    SwapRequest::new(U256::ZERO, out, TRADER)
                } else {
                    SwapRequest::new(out, U256::ZERO, TRADER)
                };
                pair.swap(&mut host, TRADER, request, None).unwrap();
            }
            host.clear_events();
            black_box(pair.get_reserves())
        })
    });
}

fn bench_create_pair(c: &mut Criterion) {
    c.bench_function("factory/create_pair", |bch| {
        bch.iter(|| {
            let factory = Factory::new(FACTORY, SETTER);
            let mut host = MemoryHost::new(0);
            for i in 1..=16u8 {
                factory
                    .create_pair(&mut host, Address::repeat_byte(i), Address::repeat_byte(i + 100))
                    .unwrap();
            }
            black_box(factory.all_pairs_length())
        })
    });
}

criterion_group!(benches, bench_swap_roundtrip, bench_create_pair);
criterion_main!(benches);
