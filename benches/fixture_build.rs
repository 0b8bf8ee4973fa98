//! Benchmarks for building fixtures in memory.
//!
//! Measures:
//! 1. Nested chains at the default depths (linear construction)
//! 2. Flat arrays at the default megabyte sizes
//! 3. Scanning a built chain back for its depth

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fixturegen::nested::nested_len;
use fixturegen::scan::nesting_depth;
use fixturegen::{flat_fixture, nested_chain, Sizing};

fn bench_nested_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_chain");
    group.sample_size(10);

    for depth in [1_000, 10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Bytes(nested_len(depth).unwrap() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| nested_chain(black_box(depth)).unwrap())
        });
    }

    group.finish();
}

fn bench_flat_fixture(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_fixture");
    group.sample_size(10);

    for size_mb in [1, 5, 10] {
        group.throughput(Throughput::Bytes(size_mb * 1_000_000));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}MB", size_mb)),
            &size_mb,
            |b, &size_mb| b.iter(|| flat_fixture(black_box(size_mb), Sizing::PerRecord).unwrap()),
        );
    }

    group.finish();
}

fn bench_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting_depth");
    group.sample_size(10);

    for depth in [10_000, 1_000_000] {
        let chain = nested_chain(depth).unwrap();
        group.throughput(Throughput::Bytes(chain.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &chain, |b, chain| {
            b.iter(|| nesting_depth(black_box(chain.as_bytes())).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_nested_chain,
    bench_flat_fixture,
    bench_nesting_depth
);
criterion_main!(benches);
