//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so benchmark helper
//! functions stay readable and criterion's `BenchmarkId` labels stay short.

use std::fmt;

/// Parameters for an MST or k-centering benchmark run.
#[derive(Clone, Debug)]
pub struct PipelineBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.point_count)
    }
}

/// Parameters for a metric forest completion benchmark run.
#[derive(Clone, Debug)]
pub struct MfcBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Number of clusters the points are partitioned into.
    pub cluster_count: usize,
}

impl fmt::Display for MfcBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.point_count, self.cluster_count)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{MfcBenchParams, PipelineBenchParams};

    #[rstest]
    fn pipeline_bench_params_display() {
        let params = PipelineBenchParams { point_count: 500 };
        assert_eq!(params.to_string(), "n=500");
    }

    #[rstest]
    fn mfc_bench_params_display() {
        let params = MfcBenchParams {
            point_count: 2_000,
            cluster_count: 32,
        };
        assert_eq!(params.to_string(), "n=2000,k=32");
    }
}
