//! Directed acyclic graph over time-indexed nodes, plus the builder
//! seam that the visibility variants plug into.
//!
//! A [`Graph`] owns the series, a name label and the edge list produced
//! by a [`GraphBuilder`]. Query logic (degree sequences, tabulated
//! distributions, the irreversibility score) is shared by every variant;
//! builders differ only in the edge predicate.

use std::fmt;
use std::str::FromStr;

use crate::divergence::{CountDistribution, DEFAULT_DELTA, kld};
use crate::error::GraphError;
use crate::series::TimeSeries;
use crate::subgraph::PrefixSubgraph;

/// Degree-view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeKind {
    /// In-degree plus out-degree.
    Degree,
    /// Edges incident as target.
    InDegree,
    /// Edges incident as source.
    OutDegree,
}

impl DegreeKind {
    /// Selector string as used by external drivers and result tables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DegreeKind::Degree => "degree",
            DegreeKind::InDegree => "indegree",
            DegreeKind::OutDegree => "outdegree",
        }
    }
}

impl fmt::Display for DegreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DegreeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degree" => Ok(DegreeKind::Degree),
            "indegree" => Ok(DegreeKind::InDegree),
            "outdegree" => Ok(DegreeKind::OutDegree),
            other => Err(GraphError::InvalidDegreeKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Directed edge from an earlier to a later time index.
///
/// `source < target` for every edge any builder produces; the graph is
/// a DAG whose edges always point forward in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
}

impl Edge {
    #[must_use]
    pub fn new(source: usize, target: usize) -> Self {
        debug_assert!(source < target);
        Self { source, target }
    }

    /// Time-index gap spanned by the edge.
    #[must_use]
    pub fn span(self) -> usize {
        self.target - self.source
    }
}

/// Capability to produce the forward edge list for a series.
///
/// `window_width` caps the maximum time-index gap an edge may span;
/// `None` means unbounded. Implementations must emit only edges with
/// `source < target` and, when the window is finite, `span <= window`.
pub trait GraphBuilder {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge>;
}

/// A built visibility-family graph with queryable degree sequences.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    series: TimeSeries,
    window_width: Option<usize>,
    edges: Vec<Edge>,
    indegree: Vec<u64>,
    outdegree: Vec<u64>,
}

impl Graph {
    /// Build a graph over `series` using the given edge predicate.
    ///
    /// Fails with [`GraphError::InvalidWindowWidth`] when a finite
    /// window of width 0 is requested.
    pub fn build(
        series: TimeSeries,
        name: impl Into<String>,
        window_width: Option<usize>,
        builder: &dyn GraphBuilder,
    ) -> Result<Self, GraphError> {
        if window_width == Some(0) {
            return Err(GraphError::InvalidWindowWidth(0));
        }
        let edges = builder.build_edges(&series, window_width);
        debug_assert!(edges.iter().all(|e| {
            e.source < e.target && window_width.is_none_or(|w| e.span() <= w)
        }));
        let (indegree, outdegree) = tally_degrees(edges.iter().copied(), series.len());
        Ok(Self {
            name: name.into(),
            series,
            window_width,
            edges,
            indegree,
            outdegree,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    #[must_use]
    pub fn window_width(&self) -> Option<usize> {
        self.window_width
    }

    /// Number of nodes; equal to the series length.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Per-node degrees for the chosen view, over every node `1..=N`.
    ///
    /// Index 0 of the returned vector is node 1. Nodes without edges
    /// appear with degree 0.
    #[must_use]
    pub fn degree_sequence(&self, kind: DegreeKind) -> Vec<u64> {
        degree_sequence_from(&self.indegree, &self.outdegree, kind)
    }

    /// Tabulated `degree value -> node count` for the chosen view.
    #[must_use]
    pub fn degree_count_distribution(&self, kind: DegreeKind) -> CountDistribution {
        tabulate(&self.degree_sequence(kind))
    }

    /// KL divergence of the indegree distribution (P) from the
    /// outdegree distribution (Q). Order matters.
    pub fn compute_irreversibility(&self) -> Result<f64, GraphError> {
        kld(
            &self.degree_count_distribution(DegreeKind::InDegree),
            &self.degree_count_distribution(DegreeKind::OutDegree),
            DEFAULT_DELTA,
        )
    }

    /// Read-only restriction to the first `len` nodes, reusing the
    /// already-built edge list.
    pub fn prefix(&self, len: usize) -> Result<PrefixSubgraph<'_>, GraphError> {
        PrefixSubgraph::new(self, len)
    }
}

/// Tally in- and out-degrees over nodes `1..=n`.
pub(crate) fn tally_degrees(
    edges: impl Iterator<Item = Edge>,
    n: usize,
) -> (Vec<u64>, Vec<u64>) {
    let mut indegree = vec![0u64; n];
    let mut outdegree = vec![0u64; n];
    for edge in edges {
        outdegree[edge.source - 1] += 1;
        indegree[edge.target - 1] += 1;
    }
    (indegree, outdegree)
}

pub(crate) fn degree_sequence_from(
    indegree: &[u64],
    outdegree: &[u64],
    kind: DegreeKind,
) -> Vec<u64> {
    match kind {
        DegreeKind::Degree => indegree
            .iter()
            .zip(outdegree)
            .map(|(i, o)| i + o)
            .collect(),
        DegreeKind::InDegree => indegree.to_vec(),
        DegreeKind::OutDegree => outdegree.to_vec(),
    }
}

/// Tabulate a sequence of discrete values into occurrence counts.
pub(crate) fn tabulate(values: &[u64]) -> CountDistribution {
    let mut counts = CountDistribution::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}
