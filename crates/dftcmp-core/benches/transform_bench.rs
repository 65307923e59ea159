//! Direct O(N²) transform vs FFT oracle
//!
//! Run with: cargo bench -p dftcmp-core --bench transform_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dftcmp_core::prelude::*;
use dftcmp_core::signals::complex_gaussian_noise;

const SIZES: [usize; 4] = [16, 64, 256, 1024];

fn bench_matrix_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_build");

    for &n in SIZES.iter() {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| TransformMatrix::new(black_box(n)))
        });
    }

    group.finish();
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");

    for &n in SIZES.iter() {
        let signal = complex_gaussian_noise(n, 1.0, 42).expect("signal");
        let matrix = TransformMatrix::new(n).expect("matrix");
        let mut oracle = RustFftOracle::new();

        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("direct", n), &signal, |b, s| {
            b.iter(|| matrix.forward(black_box(s)))
        });

        group.bench_with_input(BenchmarkId::new("rustfft", n), &signal, |b, s| {
            b.iter(|| oracle.forward(black_box(s)))
        });
    }

    group.finish();
}

fn bench_full_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");

    for &n in [64usize, 256].iter() {
        let signal = signals::half_step(n).expect("signal");
        let mut harness = ComparisonHarness::new();

        group.bench_with_input(BenchmarkId::new("step", n), &signal, |b, s| {
            b.iter(|| harness.compare_real(black_box(s)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matrix_build, bench_forward, bench_full_comparison);
criterion_main!(benches);
