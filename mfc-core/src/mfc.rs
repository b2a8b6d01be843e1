//! The Metric Forest Completion engine: exact per-cluster MSTs stitched
//! together with one representative inter-cluster edge per cluster pair.

#![expect(
    clippy::indexing_slicing,
    reason = "member-list and representative indices are bounded by the same cluster sizes they \
              were produced from, earlier in this module"
)]

use std::{collections::HashMap, time::Instant};

use crate::{
    index::{GlobalIndex, LocalIndex},
    mst::{MinimumSpanningForest, WeightedEdge, array_coloured_mst},
    timing::elapsed_ms,
};

/// Result of running MFC on `(points, cluster_count, assignments)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricForestCompletion {
    cluster_edges: Vec<Vec<WeightedEdge>>,
    completion_edges: Vec<WeightedEdge>,
    sub_cluster_runtime_ms: f64,
    completion_edges_runtime_ms: f64,
    completion_runtime_ms: f64,
}

impl MetricForestCompletion {
    /// Returns, for each cluster, the edges of its exact MST (global point
    /// indices; empty for clusters with at most one member).
    #[must_use]
    pub fn cluster_edges(&self) -> &[Vec<WeightedEdge>] {
        &self.cluster_edges
    }

    /// Returns the inter-cluster completion edges (global point indices).
    #[must_use]
    pub fn completion_edges(&self) -> &[WeightedEdge] {
        &self.completion_edges
    }

    /// Returns the total weight of every cluster MST edge.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "summing weights across all cluster MSTs is the purpose of this accessor"
    )]
    pub fn cluster_weight(&self) -> f32 {
        self.cluster_edges
            .iter()
            .flat_map(|edges| edges.iter())
            .fold(0.0_f32, |acc, e| acc + e.weight())
    }

    /// Returns `cluster_weight() + completion_edges` total weight: the total
    /// cost of this MFC approximation.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "accumulating total approximation cost is the purpose of this accessor"
    )]
    pub fn total_cost(&self) -> f32 {
        let completion_weight = self
            .completion_edges
            .iter()
            .fold(0.0_f32, |acc, e| acc + e.weight());
        self.cluster_weight() + completion_weight
    }

    /// Time spent computing the per-cluster MSTs, in milliseconds.
    #[must_use]
    pub const fn sub_cluster_runtime_ms(&self) -> f64 {
        self.sub_cluster_runtime_ms
    }

    /// Time spent selecting inter-cluster completion-edge candidates, in
    /// milliseconds.
    #[must_use]
    pub const fn completion_edges_runtime_ms(&self) -> f64 {
        self.completion_edges_runtime_ms
    }

    /// Time spent running the final MST over the cluster graph, in
    /// milliseconds.
    #[must_use]
    pub const fn completion_runtime_ms(&self) -> f64 {
        self.completion_runtime_ms
    }
}

fn group_members(cluster_count: usize, assignments: &[usize]) -> Vec<Vec<GlobalIndex>> {
    let mut members = vec![Vec::new(); cluster_count];
    for (i, &cluster) in assignments.iter().enumerate() {
        if let Some(bucket) = members.get_mut(cluster) {
            bucket.push(GlobalIndex::new(i));
        }
    }
    members
}

fn cluster_mst<P>(
    points: &[P],
    members: &[GlobalIndex],
    dist: &impl Fn(&P, &P) -> f32,
) -> Vec<WeightedEdge> {
    if members.len() < 2 {
        return Vec::new();
    }

    let mut local_edges = Vec::new();
    for i in 0..members.len() - 1 {
        for j in i + 1..members.len() {
            let local_a = LocalIndex::new(i);
            let local_b = LocalIndex::new(j);
            let a = members[local_a.get()].get();
            let b = members[local_b.get()].get();
            local_edges.push(WeightedEdge::new(
                dist(&points[a], &points[b]),
                local_a.get(),
                local_b.get(),
            ));
        }
    }

    // Remap the cluster-local MST back onto global point indices before it
    // leaves the cluster boundary.
    array_coloured_mst(members.len(), &local_edges)
        .edges()
        .iter()
        .map(|e| {
            let global_a = members[LocalIndex::new(e.a()).get()];
            let global_b = members[LocalIndex::new(e.b()).get()];
            WeightedEdge::new(e.weight(), global_a.get(), global_b.get())
        })
        .collect()
}

struct CompletionCandidate {
    cluster_a: usize,
    cluster_b: usize,
    rep_a: usize,
    rep_b: usize,
    weight: f32,
}

/// Selects the single representative completion-edge candidate between two
/// non-empty clusters: fix local representative index 0 in each cluster and
/// scan the other cluster's members against it from both sides, keeping the
/// minimum-weight pair seen. This is an intentional O(|i| + |j|)
/// approximation of the true O(|i|*|j|) nearest-pair search.
fn completion_candidate<P>(
    points: &[P],
    cluster_a: usize,
    cluster_b: usize,
    members_a: &[GlobalIndex],
    members_b: &[GlobalIndex],
    dist: &impl Fn(&P, &P) -> f32,
) -> CompletionCandidate {
    let a_rep = members_a[0].get();
    let b_rep = members_b[0].get();

    let mut best_weight = f32::INFINITY;
    let mut best_a = a_rep;
    let mut best_b = b_rep;

    for member in members_b {
        let d = dist(&points[a_rep], &points[member.get()]);
        if d < best_weight {
            best_weight = d;
            best_a = a_rep;
            best_b = member.get();
        }
    }

    for member in members_a {
        let d = dist(&points[member.get()], &points[b_rep]);
        if d < best_weight {
            best_weight = d;
            best_a = member.get();
            best_b = b_rep;
        }
    }

    CompletionCandidate {
        cluster_a,
        cluster_b,
        rep_a: best_a,
        rep_b: best_b,
        weight: best_weight,
    }
}

/// Runs Metric Forest Completion: exact per-cluster MSTs plus a minimum
/// spanning tree over one representative completion edge per cluster pair.
///
/// `assignments[i]` must be in `[0, cluster_count)`, normally produced by
/// [`crate::k_centering::k_centering`]. Completion-pair enumeration covers
/// the normalised range `0 <= i < j < cluster_count`.
#[must_use]
pub fn metric_forest_completion<P>(
    points: &[P],
    cluster_count: usize,
    assignments: &[usize],
    dist: impl Fn(&P, &P) -> f32 + Sync,
) -> MetricForestCompletion {
    let members = group_members(cluster_count, assignments);

    let sub_cluster_start = Instant::now();
    let cluster_edges: Vec<Vec<WeightedEdge>> = members
        .iter()
        .map(|m| cluster_mst(points, m, &dist))
        .collect();
    let sub_cluster_runtime_ms = elapsed_ms(sub_cluster_start);

    let completion_edges_start = Instant::now();
    let mut candidates = Vec::new();
    for i in 0..cluster_count {
        for j in i + 1..cluster_count {
            if members[i].is_empty() || members[j].is_empty() {
                continue;
            }
            candidates.push(completion_candidate(
                points, i, j, &members[i], &members[j], &dist,
            ));
        }
    }
    let completion_edges_runtime_ms = elapsed_ms(completion_edges_start);

    let mut rep_lookup = HashMap::with_capacity(candidates.len());
    let meta_edges: Vec<WeightedEdge> = candidates
        .into_iter()
        .map(|c| {
            rep_lookup.insert((c.cluster_a, c.cluster_b), (c.rep_a, c.rep_b));
            WeightedEdge::new(c.weight, c.cluster_a, c.cluster_b)
        })
        .collect();

    let completion_start = Instant::now();
    let meta_forest: MinimumSpanningForest = array_coloured_mst(cluster_count, &meta_edges);
    let completion_runtime_ms = elapsed_ms(completion_start);

    let mut completion_edges = Vec::with_capacity(meta_forest.edges().len());
    for e in meta_forest.edges() {
        let Some(&(rep_a, rep_b)) = rep_lookup.get(&(e.a(), e.b())) else {
            continue;
        };
        completion_edges.push(WeightedEdge::new(e.weight(), rep_a, rep_b));
    }

    MetricForestCompletion {
        cluster_edges,
        completion_edges,
        sub_cluster_runtime_ms,
        completion_edges_runtime_ms,
        completion_runtime_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::metric_forest_completion;

    fn euclid_2d(a: &(f32, f32), b: &(f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn completion_edge_selects_the_representative_pair() {
        let points = [(0.0_f32, 0.0_f32), (0.0, 1.0), (100.0, 0.0), (100.0, 1.0)];
        let assignments = [0, 0, 1, 1];

        let mfc = metric_forest_completion(&points, 2, &assignments, euclid_2d);

        assert_eq!(mfc.completion_edges().len(), 1);
        let edge = &mfc.completion_edges()[0];
        assert!((edge.weight() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn empty_cluster_contributes_no_edges() {
        let points = [(0.0_f32, 0.0_f32), (1.0, 1.0)];
        let assignments = [0, 0];

        let mfc = metric_forest_completion(&points, 2, &assignments, euclid_2d);

        assert!(mfc.completion_edges().is_empty());
        assert!(mfc.cluster_edges()[1].is_empty());
    }

    #[test]
    fn clustered_gaussians_approximate_within_a_tolerance() {
        let mut points = Vec::new();
        for i in 0..50 {
            #[expect(
                clippy::cast_precision_loss,
                reason = "small loop index used only to perturb a test fixture coordinate"
            )]
            let offset = (i as f32) * 0.01;
            points.push((offset, offset));
        }
        for i in 0..50 {
            #[expect(
                clippy::cast_precision_loss,
                reason = "small loop index used only to perturb a test fixture coordinate"
            )]
            let offset = (i as f32) * 0.01;
            points.push((100.0 + offset, 100.0 + offset));
        }
        let assignments: Vec<usize> = (0..100).map(|i| usize::from(i >= 50)).collect();

        let mfc = metric_forest_completion(&points, 2, &assignments, euclid_2d);
        assert_eq!(mfc.cluster_edges().len(), 2);
        assert_eq!(mfc.completion_edges().len(), 1);
    }
}
