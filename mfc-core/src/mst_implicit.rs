//! Exact MST of the complete graph induced by a point list and a metric.

use crate::mst::{MinimumSpanningForest, WeightedEdge, array_coloured_mst};

/// Computes the exact MST of the complete graph on `points` under `dist`.
///
/// Enumerates all `n(n-1)/2` pairs, builds the weighted edge list, and
/// delegates to [`array_coloured_mst`]. Returns an empty forest if `points`
/// has fewer than two elements.
#[must_use]
pub fn mst_implicit<P>(points: &[P], dist: impl Fn(&P, &P) -> f32 + Sync) -> MinimumSpanningForest {
    if points.len() < 2 {
        return MinimumSpanningForest::default();
    }

    let mut edges = Vec::new();
    for i in 0..points.len() - 1 {
        for j in i + 1..points.len() {
            let Some(pi) = points.get(i) else {
                continue;
            };
            let Some(pj) = points.get(j) else {
                continue;
            };
            edges.push(WeightedEdge::new(dist(pi, pj), i, j));
        }
    }

    array_coloured_mst(points.len(), &edges)
}

#[cfg(test)]
mod tests {
    use super::mst_implicit;

    #[test]
    fn fewer_than_two_points_yields_empty_forest() {
        let forest = mst_implicit(&[1.0_f32], |a: &f32, b: &f32| (a - b).abs());
        assert!(forest.edges().is_empty());
    }

    #[test]
    fn line_of_floats_reproduces_tiny_mst_scenario() {
        let points = [0.0_f32, 1.0, 3.0, 7.0];
        let forest = mst_implicit(&points, |a: &f32, b: &f32| (a - b).abs());

        assert_eq!(forest.edges().len(), 3);
        assert!((forest.total_weight() - 7.0).abs() < 1e-6);
    }
}
