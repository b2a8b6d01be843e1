//! MST (array-coloured Kruskal) benchmarks.
//!
//! Measures the time to compute the exact minimum spanning tree of the
//! complete graph induced by a point set and the Euclidean metric.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use mfc_benches::{params::PipelineBenchParams, source::synthetic_points};
use mfc_core::{euclidean_distance, mst_implicit};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 16;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[100, 500, 1_000];

fn mst_implicit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst_implicit");
    group.sample_size(20);

    for &point_count in POINT_COUNTS {
        let points = synthetic_points::<DIMENSIONS>(point_count, SEED);
        let bench_params = PipelineBenchParams { point_count };

        group.bench_with_input(
            BenchmarkId::from_parameter(&bench_params),
            &points,
            |b, points| {
                b.iter(|| mst_implicit(points, euclidean_distance));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, mst_implicit_bench);
criterion_main!(benches);
