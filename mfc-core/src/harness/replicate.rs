//! Per-replicate metric computation: the exact MST baseline plus, for each
//! evaluator, its MFC approximation cost, gamma, cluster-size statistics,
//! and runtime buckets.

use std::time::Instant;

use super::Evaluator;
use crate::{
    k_centering::Clustering,
    mfc::MetricForestCompletion,
    mst::MinimumSpanningForest,
    mst_implicit::mst_implicit,
    stats::{stats, usize_to_f64},
    timing::elapsed_ms,
};

/// One evaluator's metrics for a single replicate.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluatorTrial {
    name: String,
    mfc_cost: f64,
    mfc_runtime_ms: f64,
    gamma: f64,
    cluster_size_mu: f64,
    cluster_size_sigma: f64,
    sub_cluster_runtime_ms: f64,
    completion_edges_runtime_ms: f64,
    completion_runtime_ms: f64,
    clustering_runtime_ms: f64,
}

impl EvaluatorTrial {
    /// Returns the evaluator's name, e.g. `"C16"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `mfc.total_cost()` widened to `f64`.
    #[must_use]
    pub const fn mfc_cost(&self) -> f64 {
        self.mfc_cost
    }

    /// Returns the time spent running the evaluator, in milliseconds.
    #[must_use]
    pub const fn mfc_runtime_ms(&self) -> f64 {
        self.mfc_runtime_ms
    }

    /// Returns the quality ratio described in [`gamma`].
    #[must_use]
    pub const fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Returns the mean cluster size over this evaluator's clusters.
    #[must_use]
    pub const fn cluster_size_mu(&self) -> f64 {
        self.cluster_size_mu
    }

    /// Returns the population standard deviation of cluster size.
    #[must_use]
    pub const fn cluster_size_sigma(&self) -> f64 {
        self.cluster_size_sigma
    }

    /// Returns the per-cluster MST runtime bucket, forwarded from the MFC result.
    #[must_use]
    pub const fn sub_cluster_runtime_ms(&self) -> f64 {
        self.sub_cluster_runtime_ms
    }

    /// Returns the completion-candidate-selection runtime bucket.
    #[must_use]
    pub const fn completion_edges_runtime_ms(&self) -> f64 {
        self.completion_edges_runtime_ms
    }

    /// Returns the cluster-graph MST runtime bucket.
    #[must_use]
    pub const fn completion_runtime_ms(&self) -> f64 {
        self.completion_runtime_ms
    }

    /// Returns the time spent producing the clustering itself.
    #[must_use]
    pub const fn clustering_runtime_ms(&self) -> f64 {
        self.clustering_runtime_ms
    }
}

/// The full result of one replicate: the dataset size, the exact MST
/// baseline, and every evaluator's trial.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplicateResult {
    point_count: usize,
    mst_cost: f64,
    mst_runtime_ms: f64,
    evaluators: Vec<EvaluatorTrial>,
}

impl ReplicateResult {
    /// Returns the number of points in this replicate's dataset.
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.point_count
    }

    /// Returns the point count widened to `f64`, for aggregate statistics.
    #[must_use]
    pub fn point_count_f64(&self) -> f64 {
        usize_to_f64(self.point_count)
    }

    /// Returns the total weight of the exact MST over the full point set.
    #[must_use]
    pub const fn mst_cost(&self) -> f64 {
        self.mst_cost
    }

    /// Returns the time spent computing the exact MST, in milliseconds.
    #[must_use]
    pub const fn mst_runtime_ms(&self) -> f64 {
        self.mst_runtime_ms
    }

    /// Returns this replicate's per-evaluator trials, in evaluator order.
    #[must_use]
    pub fn evaluators(&self) -> &[EvaluatorTrial] {
        &self.evaluators
    }
}

/// Runs one replicate: the exact MST baseline, then every evaluator in turn.
///
/// # Errors
///
/// Propagates the first evaluator error encountered, in evaluator order.
pub(super) fn run_replicate<P, Args>(
    points: &[P],
    args: &Args,
    dist: &(impl Fn(&P, &P) -> f32 + Sync),
    evaluators: &[(String, Evaluator<P, Args>)],
) -> Result<ReplicateResult, Box<dyn std::error::Error + Send + Sync>> {
    let mst_start = Instant::now();
    let mst = mst_implicit(points, dist);
    let mst_runtime_ms = elapsed_ms(mst_start);
    let mst_cost = f64::from(mst.total_weight());

    let mut evaluator_trials = Vec::with_capacity(evaluators.len());
    for (name, run) in evaluators {
        let eval_start = Instant::now();
        let (clustering, mfc) = run(points, args)?;
        let mfc_runtime_ms = elapsed_ms(eval_start);
        evaluator_trials.push(evaluator_trial(
            name.clone(),
            &mst,
            &clustering,
            &mfc,
            mfc_runtime_ms,
        ));
    }

    Ok(ReplicateResult {
        point_count: points.len(),
        mst_cost,
        mst_runtime_ms,
        evaluators: evaluator_trials,
    })
}

fn evaluator_trial(
    name: String,
    mst: &MinimumSpanningForest,
    clustering: &Clustering,
    mfc: &MetricForestCompletion,
    mfc_runtime_ms: f64,
) -> EvaluatorTrial {
    let gamma_ratio = f64::from(gamma(mst, clustering, mfc.cluster_weight()));

    let cluster_sizes: Vec<f64> = mfc
        .cluster_edges()
        .iter()
        .enumerate()
        .map(|(cluster, _)| {
            let size = clustering
                .assignments()
                .iter()
                .filter(|&&c| c == cluster)
                .count();
            usize_to_f64(size)
        })
        .collect();
    let (cluster_size_mu, cluster_size_sigma) = stats(&cluster_sizes);

    EvaluatorTrial {
        name,
        mfc_cost: f64::from(mfc.total_cost()),
        mfc_runtime_ms,
        gamma: gamma_ratio,
        cluster_size_mu,
        cluster_size_sigma,
        sub_cluster_runtime_ms: mfc.sub_cluster_runtime_ms(),
        completion_edges_runtime_ms: mfc.completion_edges_runtime_ms(),
        completion_runtime_ms: mfc.completion_runtime_ms(),
        clustering_runtime_ms: clustering.runtime_ms(),
    }
}

/// Computes gamma: the ratio of intra-cluster MFC weight to the weight of
/// MST edges whose endpoints share a cluster.
///
/// Returns `f32::INFINITY` when the denominator is zero rather than relying
/// on implicit IEEE-754 division semantics — callers and CSV consumers must
/// handle a non-finite value explicitly.
#[expect(
    clippy::float_arithmetic,
    reason = "accumulating intra-cluster MST weight is this function's entire purpose"
)]
fn gamma(mst: &MinimumSpanningForest, clustering: &Clustering, mfc_cluster_weight: f32) -> f32 {
    let denominator = mst
        .edges()
        .iter()
        .filter(|e| clustering.assignments().get(e.a()) == clustering.assignments().get(e.b()))
        .fold(0.0_f32, |acc, e| acc + e.weight());

    if denominator == 0.0 {
        f32::INFINITY
    } else {
        mfc_cluster_weight / denominator
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "test assertions fail loudly on unexpected errors")]
mod tests {
    use super::{gamma, run_replicate};
    use crate::{k_centering::k_centering_from_seed, mfc::metric_forest_completion};

    fn euclid_2d(a: &(f32, f32), b: &(f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn gamma_is_infinite_when_no_mst_edge_is_intra_cluster() {
        let points = [(0.0_f32, 0.0_f32), (10.0, 0.0)];
        let assignments = [0, 1];
        let clustering = k_centering_from_seed(&points, 2, 0, euclid_2d).expect("two points, k=2");
        let mst = crate::mst_implicit::mst_implicit(&points, euclid_2d);
        assert_eq!(gamma(&mst, &clustering, 0.0), f32::INFINITY);
    }

    #[test]
    fn replicate_reports_one_trial_per_evaluator() {
        let points = vec![(0.0_f32, 0.0_f32), (0.0, 1.0), (100.0, 0.0), (100.0, 1.0)];
        let evaluator: super::Evaluator<(f32, f32), ()> = Box::new(|pts: &[(f32, f32)], &()| {
            let clustering = k_centering_from_seed(pts, 2, 0, euclid_2d)?;
            let mfc = metric_forest_completion(pts, 2, clustering.assignments(), euclid_2d);
            Ok((clustering, mfc))
        });
        let evaluators = vec![("C2".to_string(), evaluator)];

        let result =
            run_replicate(&points, &(), &euclid_2d, &evaluators).expect("k=2 on four points never fails");

        assert_eq!(result.point_count(), 4);
        let trial = result.evaluators().first().expect("one evaluator was supplied");
        assert_eq!(trial.name(), "C2");
    }
}
