//! Exact minimum spanning tree over an explicit weighted edge list.
//!
//! Uses an array-coloured variant of Kruskal's algorithm rather than
//! union-find: a colour array `c[0..n)` tracks each node's current component,
//! and merging a pair of components repaints every node carrying the old
//! colour. For the node counts this crate ever calls it with (a single
//! cluster, or the cluster count itself) the linear repaint is faster in
//! practice than union-find's pointer chasing, and it carries no shared
//! mutable state across invocations. Do not "upgrade" this to union-find.

use std::cmp::Ordering;

/// A single weighted edge between two nodes in `[0, n)`.
///
/// Endpoints are unordered; `a == b` is a caller error (self-edges are never
/// produced by [`crate::mst_implicit`] or the MFC engine's completion-edge
/// scan, so this is not validated here).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedEdge {
    weight: f32,
    a: usize,
    b: usize,
}

impl WeightedEdge {
    /// Builds an edge from its weight and endpoints.
    #[must_use]
    pub const fn new(weight: f32, a: usize, b: usize) -> Self {
        Self { weight, a, b }
    }

    /// Returns the edge weight.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns the first endpoint.
    #[must_use]
    pub const fn a(&self) -> usize {
        self.a
    }

    /// Returns the second endpoint.
    #[must_use]
    pub const fn b(&self) -> usize {
        self.b
    }
}

impl Eq for WeightedEdge {}

impl Ord for WeightedEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.a.cmp(&other.a))
            .then_with(|| self.b.cmp(&other.b))
    }
}

impl PartialOrd for WeightedEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected this is a tree with `n - 1` edges;
/// otherwise it holds one tree per connected component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinimumSpanningForest {
    edges: Vec<WeightedEdge>,
}

impl MinimumSpanningForest {
    /// Returns the forest's edges.
    #[must_use]
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Returns the sum of all edge weights.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "summing edge weights is the whole point of this accessor"
    )]
    pub fn total_weight(&self) -> f32 {
        self.edges.iter().fold(0.0_f32, |acc, e| acc + e.weight())
    }
}

/// Computes a minimum spanning forest using array-coloured Kruskal.
///
/// `edges` need not be sorted; this function sorts a local copy. Non-finite
/// weights participate in the ordinary weight ordering and are never
/// rejected — callers that must reject them do so before calling in.
///
/// Returns a forest with at most `node_count - 1` edges. An empty or
/// single-node graph returns an empty forest.
#[must_use]
pub fn array_coloured_mst(node_count: usize, edges: &[WeightedEdge]) -> MinimumSpanningForest {
    if node_count < 2 || edges.is_empty() {
        return MinimumSpanningForest::default();
    }

    let mut sorted: Vec<WeightedEdge> = edges.to_vec();
    sorted.sort_unstable();

    let mut colour: Vec<usize> = (0..node_count).collect();
    let mut forest = Vec::with_capacity(node_count.saturating_sub(1));

    for edge in sorted {
        let (Some(&colour_a), Some(&colour_b)) =
            (colour.get(edge.a()), colour.get(edge.b()))
        else {
            continue;
        };

        if colour_a == colour_b {
            continue;
        }

        forest.push(edge);

        for c in &mut colour {
            if *c == colour_b {
                *c = colour_a;
            }
        }
    }

    MinimumSpanningForest { edges: forest }
}

#[cfg(test)]
mod tests;
