//! Farthest-point k-centering benchmarks.
//!
//! Measures the time to partition a point set into a fixed number of
//! clusters via the farthest-point traversal.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use mfc_benches::{params::MfcBenchParams, source::synthetic_points};
use mfc_core::{euclidean_distance, k_centering};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 16;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[1_000, 5_000, 20_000];

/// Cluster counts to benchmark.
const CLUSTER_COUNTS: &[usize] = &[16, 64];

fn k_centering_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_centering");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let points = synthetic_points::<DIMENSIONS>(point_count, SEED);

        for &cluster_count in CLUSTER_COUNTS {
            let bench_params = MfcBenchParams {
                point_count,
                cluster_count,
            };

            group.bench_with_input(
                BenchmarkId::from_parameter(&bench_params),
                &(&points, cluster_count),
                |b, &(points, cluster_count)| {
                    b.iter(|| {
                        k_centering(points, cluster_count, euclidean_distance)
                            .expect("point count always exceeds cluster count in this benchmark");
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, k_centering_bench);
criterion_main!(benches);
