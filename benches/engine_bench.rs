//! Benchmarks for the probability engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tennis_win_prob::engine::{EngineConfig, WinProbabilityCalculator};

fn set_from_love_benchmark(c: &mut Criterion) {
    let cached = WinProbabilityCalculator::new(EngineConfig::default()).unwrap();
    let uncached = WinProbabilityCalculator::new(EngineConfig::default().with_cache(false)).unwrap();

    c.bench_function("set_0_0_cached", |b| {
        b.iter(|| cached.set_probability(black_box(0), black_box(0), 0.59, 0.44, true))
    });

    c.bench_function("set_0_0_uncached", |b| {
        b.iter(|| uncached.set_probability(black_box(0), black_box(0), 0.59, 0.44, true))
    });
}

fn tiebreak_benchmark(c: &mut Criterion) {
    let approximate = WinProbabilityCalculator::new(EngineConfig::default()).unwrap();
    let exact = WinProbabilityCalculator::new(EngineConfig::exact()).unwrap();

    c.bench_function("tiebreak_approximate", |b| {
        b.iter(|| approximate.tiebreak_probability(black_box(0), black_box(0), 0.65, 0.35, true))
    });

    c.bench_function("tiebreak_exact", |b| {
        b.iter(|| exact.tiebreak_probability(black_box(0), black_box(0), 0.65, 0.35, true))
    });
}

criterion_group!(benches, set_from_love_benchmark, tiebreak_benchmark);
criterion_main!(benches);
