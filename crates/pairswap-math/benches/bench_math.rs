// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BENCHMARK SUITE - pairswap-math
//
// Run: cargo bench -p pairswap-math
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pairswap_math::{sqrt, UQ112x112, U256, UINT112_MAX};

fn bench_sqrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt");
    for bits in [64u32, 128, 224] {
        let n = (U256::from(1u64) << bits as usize) - U256::from(1u64);
        group.bench_with_input(BenchmarkId::from_parameter(bits), &n, |b, n| {
            b.iter(|| black_box(sqrt(*n)))
        });
    }
    group.finish();
}

fn bench_uqdiv(c: &mut Criterion) {
    c.bench_function("uq112x112/ratio", |b| {
        b.iter(|| black_box(UQ112x112::ratio(black_box(UINT112_MAX), black_box(3))))
    });
}

criterion_group!(benches, bench_sqrt, bench_uqdiv);
criterion_main!(benches);
