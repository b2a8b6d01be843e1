use super::{WeightedEdge, array_coloured_mst};

#[test]
fn empty_graph_yields_empty_forest() {
    let forest = array_coloured_mst(0, &[]);
    assert!(forest.edges().is_empty());
}

#[test]
fn single_node_yields_empty_forest() {
    let forest = array_coloured_mst(1, &[]);
    assert!(forest.edges().is_empty());
}

#[test]
fn tiny_line_mst_matches_expected_edges() {
    // Four points on a line at 0, 1, 3, 7 under Euclidean distance.
    let edges = [
        WeightedEdge::new(1.0, 0, 1),
        WeightedEdge::new(3.0, 0, 2),
        WeightedEdge::new(7.0, 0, 3),
        WeightedEdge::new(2.0, 1, 2),
        WeightedEdge::new(6.0, 1, 3),
        WeightedEdge::new(4.0, 2, 3),
    ];

    let forest = array_coloured_mst(4, &edges);

    assert_eq!(forest.edges().len(), 3);
    assert!((forest.total_weight() - 7.0).abs() < 1e-6);

    let mut weights: Vec<f32> = forest.edges().iter().map(WeightedEdge::weight).collect();
    weights.sort_by(f32::total_cmp);
    assert_eq!(weights, vec![1.0, 2.0, 4.0]);
}

#[test]
fn disconnected_graph_yields_a_forest_per_component() {
    let edges = [WeightedEdge::new(1.0, 0, 1), WeightedEdge::new(1.0, 2, 3)];

    let forest = array_coloured_mst(4, &edges);

    assert_eq!(forest.edges().len(), 2);
}

#[test]
fn duplicate_weights_still_form_a_spanning_tree() {
    let edges = [
        WeightedEdge::new(1.0, 0, 1),
        WeightedEdge::new(1.0, 1, 2),
        WeightedEdge::new(1.0, 0, 2),
    ];

    let forest = array_coloured_mst(3, &edges);

    assert_eq!(forest.edges().len(), 2);
}

#[test]
fn non_finite_weights_propagate_without_error() {
    let edges = [
        WeightedEdge::new(f32::INFINITY, 0, 1),
        WeightedEdge::new(1.0, 1, 2),
    ];

    let forest = array_coloured_mst(3, &edges);

    assert_eq!(forest.edges().len(), 2);
    assert!(forest.total_weight().is_infinite());
}

proptest::proptest! {
    #[test]
    fn forest_never_exceeds_n_minus_one_edges(
        n in 2_usize..20,
        raw_edges in proptest::collection::vec((0.0_f32..100.0, 0_usize..20, 0_usize..20), 0..60),
    ) {
        let edges: Vec<WeightedEdge> = raw_edges
            .into_iter()
            .filter(|&(_, a, b)| a < n && b < n && a != b)
            .map(|(w, a, b)| WeightedEdge::new(w, a, b))
            .collect();

        let forest = array_coloured_mst(n, &edges);
        proptest::prop_assert!(forest.edges().len() < n);
    }
}
