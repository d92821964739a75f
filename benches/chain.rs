//! Derivation and Chain Benchmarks
//!
//! Throughput of single-seed derivation and of streaming whole chains.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use crash_chain::core::precision::normalize_significant;
use crash_chain::{derive, generate_chain, HouseEdge, Salt, Seed, SeedChain};

const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const REFERENCE_SALT: &str = "0000000000000000000301e2801a9a9598bfb114e574a91a887f2132f33047e6";

const CHAIN_LENGTHS: &[u64] = &[1_000, 10_000, 100_000];

/// Benchmark single-seed derivation
fn bench_derive(c: &mut Criterion) {
    let seed = Seed::parse(ZERO_SEED).unwrap();
    let salt = Salt::parse(REFERENCE_SALT).unwrap();
    let edge = HouseEdge::default();

    let mut group = c.benchmark_group("derive");
    group.bench_function("unsalted", |b| {
        b.iter(|| black_box(derive(black_box(&seed), &Salt::none(), edge)))
    });
    group.bench_function("salted", |b| {
        b.iter(|| black_box(derive(black_box(&seed), &salt, edge)))
    });
    group.bench_function("normalize_significant", |b| {
        b.iter(|| black_box(normalize_significant(black_box(0xc3dcf8533ecda))))
    });
    group.finish();
}

/// Benchmark streaming chains
fn bench_chain(c: &mut Criterion) {
    let seed = Seed::parse(ZERO_SEED).unwrap();
    let salt = Salt::parse(REFERENCE_SALT).unwrap();

    let mut group = c.benchmark_group("chain");
    group.sample_size(10);

    for &length in CHAIN_LENGTHS {
        group.throughput(Throughput::Elements(length));

        group.bench_with_input(BenchmarkId::new("seeds_only", length), &length, |b, &n| {
            b.iter(|| black_box(SeedChain::new(seed.clone(), n).count()))
        });

        group.bench_with_input(BenchmarkId::new("salted_entries", length), &length, |b, &n| {
            b.iter(|| {
                black_box(
                    generate_chain(seed.clone(), salt.clone(), HouseEdge::default(), n)
                        .filter(|e| e.outcome.is_unbounded())
                        .count(),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_derive, bench_chain);
criterion_main!(benches);
