//! Timing comparison between the block engine and the dense oracle, across
//! a range of run lengths.
//!
//! Grounded on `examples/original_source/tests/validation.py`'s `main`,
//! which times both implementations against each other; reworked here as a
//! `criterion` benchmark the way `pa-bitpacking`'s benches do, instead of a
//! hand-rolled timing loop.

use blockdtw::{block_dtw, oracle_dtw};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run_length_string(rng: &mut StdRng, runs: usize, run_len: usize, alphabet: u8) -> Vec<u8> {
    use rand::Rng;
    let mut out = Vec::with_capacity(runs * run_len);
    for _ in 0..runs {
        let symbol = b'a' + rng.gen_range(0..alphabet);
        out.extend(std::iter::repeat(symbol).take(run_len));
    }
    out
}

fn bench_block_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_dtw");
    for &run_len in &[10usize, 100, 1000] {
        let mut rng = StdRng::seed_from_u64(0);
        let q = run_length_string(&mut rng, 20, run_len, 4);
        let t = run_length_string(&mut rng, 20, run_len, 4);
        group.bench_with_input(BenchmarkId::new("block", run_len), &run_len, |b, _| {
            b.iter(|| block_dtw(&q, &t).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("oracle", run_len), &run_len, |b, _| {
            b.iter(|| oracle_dtw(&q, &t).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block_engine);
criterion_main!(benches);
