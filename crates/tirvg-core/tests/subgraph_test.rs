//! Prefix subgraphs must agree with freshly built graphs over the
//! truncated series, and a full-length prefix must reproduce the parent
//! exactly.

use tirvg_core::{
    DegreeKind, EdgeKind, FastNaturalVisibility, Graph, GraphError, RefinedConfig, RefinedGraph,
    TimeSeries,
};

const VALUES: [f64; 14] = [
    0.62, 0.11, 0.85, 0.42, 0.93, 0.07, 0.58, 0.31, 0.76, 0.24, 0.49, 0.88, 0.16, 0.67,
];

fn base_graph(values: &[f64]) -> Graph {
    let series = TimeSeries::from_slice(values).unwrap();
    Graph::build(series, "base", Some(4), &FastNaturalVisibility).unwrap()
}

fn refined_graph(values: &[f64]) -> RefinedGraph {
    let series = TimeSeries::from_slice(values).unwrap();
    RefinedGraph::build(
        series,
        "refined",
        RefinedConfig {
            window_width: 2,
            ..RefinedConfig::default()
        },
    )
    .unwrap()
}

#[test]
fn full_length_prefix_reproduces_the_parent() {
    let g = base_graph(&VALUES);
    let prefix = g.prefix(VALUES.len()).unwrap();
    for kind in [DegreeKind::Degree, DegreeKind::InDegree, DegreeKind::OutDegree] {
        assert_eq!(prefix.degree_sequence(kind), g.degree_sequence(kind));
        assert_eq!(
            prefix.degree_count_distribution(kind),
            g.degree_count_distribution(kind)
        );
    }
    assert_eq!(
        prefix.compute_irreversibility().unwrap(),
        g.compute_irreversibility().unwrap()
    );
}

#[test]
fn base_prefix_matches_a_fresh_build_on_the_truncated_series() {
    // Visibility of a pair depends only on the points between its
    // endpoints, so the induced prefix equals the graph built from the
    // truncated series.
    let g = base_graph(&VALUES);
    for len in [5usize, 8, 11] {
        let prefix = g.prefix(len).unwrap();
        let fresh = base_graph(&VALUES[..len]);
        let prefix_edges: Vec<_> = prefix.edges().collect();
        assert_eq!(prefix_edges, fresh.edges());
        for kind in [DegreeKind::InDegree, DegreeKind::OutDegree] {
            assert_eq!(prefix.degree_sequence(kind), fresh.degree_sequence(kind));
        }
        assert_eq!(
            prefix.compute_irreversibility().unwrap(),
            fresh.compute_irreversibility().unwrap()
        );
    }
}

#[test]
fn refined_full_length_prefix_reproduces_the_parent() {
    let g = refined_graph(&VALUES);
    let prefix = g.prefix(VALUES.len()).unwrap();
    for view in [DegreeKind::InDegree, DegreeKind::OutDegree] {
        assert_eq!(
            prefix.pattern_sequence(view).unwrap(),
            g.pattern_sequence(view).unwrap()
        );
        assert_eq!(
            prefix.pattern_distribution(view, None).unwrap(),
            g.pattern_distribution(view, None).unwrap()
        );
    }
    assert_eq!(
        prefix.compute_irreversibility(None).unwrap(),
        g.compute_irreversibility(None).unwrap()
    );
}

#[test]
fn refined_prefix_matches_a_fresh_build_on_the_truncated_series() {
    let g = refined_graph(&VALUES);
    for len in [6usize, 9, 12] {
        let prefix = g.prefix(len).unwrap();
        let fresh = refined_graph(&VALUES[..len]);
        let prefix_edges: Vec<_> = prefix.edges().collect();
        assert_eq!(prefix_edges, fresh.edges());
        for kind in EdgeKind::ALL {
            for view in [DegreeKind::InDegree, DegreeKind::OutDegree] {
                assert_eq!(
                    prefix.kind_degree_sequence(kind, view),
                    fresh.kind_degree_sequence(kind, view)
                );
            }
        }
        assert_eq!(
            prefix.compute_irreversibility(None).unwrap(),
            fresh.compute_irreversibility(None).unwrap()
        );
    }
}

#[test]
fn degenerate_prefixes_are_rejected() {
    let g = base_graph(&VALUES);
    assert!(matches!(g.prefix(0), Err(GraphError::EmptySeries)));

    let r = refined_graph(&VALUES);
    // A prefix not longer than the window leaves no trimmed nodes.
    assert!(matches!(
        r.prefix(2),
        Err(GraphError::SeriesTooShort {
            len: 2,
            window_width: 2
        })
    ));
}

#[test]
fn prefixes_past_the_series_end_are_rejected() {
    let g = base_graph(&VALUES);
    assert!(matches!(
        g.prefix(VALUES.len() + 1),
        Err(GraphError::InvalidRange { len: 14, .. })
    ));

    let r = refined_graph(&VALUES);
    assert!(matches!(
        r.prefix(VALUES.len() + 3),
        Err(GraphError::InvalidRange { len: 14, .. })
    ));
}
