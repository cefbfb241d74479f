//! Prefix restrictions of already-built graphs.
//!
//! A prefix subgraph keeps the parent's edge list and drops every edge
//! whose target lies past the prefix; no visibility predicate is ever
//! re-evaluated. This is how irreversibility estimates are studied as a
//! function of effective sample size while the underlying realization
//! stays fixed: build once over the full series, then query prefixes.

use crate::divergence::{CountDistribution, DEFAULT_DELTA, kld};
use crate::error::GraphError;
use crate::graph::{DegreeKind, Edge, Graph, degree_sequence_from, tabulate, tally_degrees};
use crate::refined::{
    EdgeKind, KindCounts, PatternTable, RefinedEdge, RefinedGraph, tally_kind_counts,
};

/// Read-only restriction of a [`Graph`] to its first `len` nodes.
#[derive(Debug)]
pub struct PrefixSubgraph<'g> {
    parent: &'g Graph,
    len: usize,
    indegree: Vec<u64>,
    outdegree: Vec<u64>,
}

impl<'g> PrefixSubgraph<'g> {
    pub(crate) fn new(parent: &'g Graph, len: usize) -> Result<Self, GraphError> {
        if len == 0 {
            return Err(GraphError::EmptySeries);
        }
        if len > parent.node_count() {
            return Err(GraphError::InvalidRange {
                start: 1,
                end: len + 1,
                len: parent.node_count(),
            });
        }
        let (indegree, outdegree) = tally_degrees(
            parent.edges().iter().copied().filter(|e| e.target <= len),
            len,
        );
        Ok(Self {
            parent,
            len,
            indegree,
            outdegree,
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len
    }

    /// Parent edges with both endpoints inside the prefix.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.parent
            .edges()
            .iter()
            .copied()
            .filter(move |e| e.target <= self.len)
    }

    #[must_use]
    pub fn degree_sequence(&self, kind: DegreeKind) -> Vec<u64> {
        degree_sequence_from(&self.indegree, &self.outdegree, kind)
    }

    #[must_use]
    pub fn degree_count_distribution(&self, kind: DegreeKind) -> CountDistribution {
        tabulate(&self.degree_sequence(kind))
    }

    /// Same contract as [`Graph::compute_irreversibility`].
    pub fn compute_irreversibility(&self) -> Result<f64, GraphError> {
        kld(
            &self.degree_count_distribution(DegreeKind::InDegree),
            &self.degree_count_distribution(DegreeKind::OutDegree),
            DEFAULT_DELTA,
        )
    }
}

/// Read-only restriction of a [`RefinedGraph`] to its first `len` nodes.
#[derive(Debug)]
pub struct RefinedPrefixSubgraph<'g> {
    parent: &'g RefinedGraph,
    len: usize,
    in_counts: Vec<KindCounts>,
    out_counts: Vec<KindCounts>,
}

impl<'g> RefinedPrefixSubgraph<'g> {
    pub(crate) fn new(parent: &'g RefinedGraph, len: usize) -> Result<Self, GraphError> {
        if len > parent.node_count() {
            return Err(GraphError::InvalidRange {
                start: 1,
                end: len + 1,
                len: parent.node_count(),
            });
        }
        if len <= parent.window_width() {
            return Err(GraphError::SeriesTooShort {
                len,
                window_width: parent.window_width(),
            });
        }
        let (in_counts, out_counts) = tally_kind_counts(
            parent.edges().iter().copied().filter(|e| e.target <= len),
            len,
        );
        Ok(Self {
            parent,
            len,
            in_counts,
            out_counts,
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn window_width(&self) -> usize {
        self.parent.window_width()
    }

    /// Parent edges with both endpoints inside the prefix.
    pub fn edges(&self) -> impl Iterator<Item = RefinedEdge> + '_ {
        self.parent
            .edges()
            .iter()
            .copied()
            .filter(move |e| e.target <= self.len)
    }

    #[must_use]
    pub fn kind_degree_sequence(&self, kind: EdgeKind, view: DegreeKind) -> Vec<u64> {
        let k = kind.index();
        match view {
            DegreeKind::Degree => self
                .in_counts
                .iter()
                .zip(&self.out_counts)
                .map(|(i, o)| i[k] + o[k])
                .collect(),
            DegreeKind::InDegree => self.in_counts.iter().map(|c| c[k]).collect(),
            DegreeKind::OutDegree => self.out_counts.iter().map(|c| c[k]).collect(),
        }
    }

    fn table(&self) -> PatternTable<'_> {
        PatternTable {
            in_counts: &self.in_counts,
            out_counts: &self.out_counts,
            window_width: self.parent.window_width(),
        }
    }

    /// Same contract as [`RefinedGraph::pattern_sequence`].
    pub fn pattern_sequence(&self, view: DegreeKind) -> Result<Vec<u64>, GraphError> {
        self.table().sequence(view)
    }

    /// Same contract as [`RefinedGraph::pattern_distribution`].
    pub fn pattern_distribution(
        &self,
        view: DegreeKind,
        range: Option<(usize, usize)>,
    ) -> Result<CountDistribution, GraphError> {
        self.table().distribution(view, range)
    }

    /// Same contract as [`RefinedGraph::compute_irreversibility`].
    pub fn compute_irreversibility(
        &self,
        range: Option<(usize, usize)>,
    ) -> Result<f64, GraphError> {
        self.table().irreversibility(range, self.parent.delta())
    }
}
