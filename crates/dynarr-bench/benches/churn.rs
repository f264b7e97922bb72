//! Criterion benchmarks for append/pop churn across grow and shrink
//! boundaries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dynarr_bench::{churn_pattern, run_churn};
use dynarr_buffer::DynamicArray;

/// Benchmark: repeated fill-and-drain waves at several peak sizes.
fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    for peak in [64usize, 1_024, 16_384] {
        let ops = churn_pattern(peak, 8, 42);
        group.bench_with_input(BenchmarkId::from_parameter(peak), &ops, |b, ops| {
            b.iter(|| {
                let mut a = DynamicArray::<u64>::new().unwrap();
                run_churn(&mut a, ops).unwrap();
                black_box(a.capacity());
            });
        });
    }
    group.finish();
}

/// Benchmark: oscillate one element across the 2^k boundary, the worst
/// case for a shrink-at-half policy and a non-event for quarter-occupancy.
fn bench_boundary_thrash(c: &mut Criterion) {
    c.bench_function("boundary_thrash_1024", |b| {
        let mut a = DynamicArray::<u64>::new().unwrap();
        for v in 0..1_024 {
            a.append(v).unwrap();
        }
        b.iter(|| {
            for _ in 0..100 {
                a.append(0).unwrap();
                black_box(a.pop().unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_churn, bench_boundary_thrash);
criterion_main!(benches);
