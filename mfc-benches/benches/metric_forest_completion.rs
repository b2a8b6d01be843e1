//! End-to-end metric forest completion benchmarks.
//!
//! Measures the time to run farthest-point k-centering followed by the MFC
//! approximation: per-cluster exact MSTs plus inter-cluster stitching.
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
use mfc_core::{euclidean_distance, k_centering, metric_forest_completion};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 16;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[1_000, 5_000, 20_000];

/// Cluster counts to benchmark.
const CLUSTER_COUNTS: &[usize] = &[16, 64];

fn metric_forest_completion_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("metric_forest_completion");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let points = synthetic_points::<DIMENSIONS>(point_count, SEED);

        for &cluster_count in CLUSTER_COUNTS {
            let clustering = k_centering(&points, cluster_count, euclidean_distance)
                .expect("point count always exceeds cluster count in this benchmark");
            let bench_params = MfcBenchParams {
                point_count,
                cluster_count,
            };

            group.bench_with_input(
                BenchmarkId::from_parameter(&bench_params),
                &(&points, clustering.assignments(), cluster_count),
                |b, &(points, assignments, cluster_count)| {
                    b.iter(|| {
                        metric_forest_completion(points, cluster_count, assignments, euclidean_distance);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, metric_forest_completion_bench);
criterion_main!(benches);
