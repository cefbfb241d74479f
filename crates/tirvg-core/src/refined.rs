//! Windowed visibility graph with four-way edge-kind classification.
//!
//! This is the builder behind the primary irreversibility measure. Every
//! candidate pair within the (mandatory, finite) window is classified
//! rather than merely decided: the slope sign splits rise from fall, and
//! the intermediate run is either entirely strictly below the reference
//! line (visible) or entirely on or above it (invisible). An edge exists
//! exactly when one of the two holds.
//!
//! Boundary choices here are load-bearing for reproducibility and must
//! not be "fixed":
//! - zero slope counts as fall (`slope <= 0`);
//! - visible uses strict `<`, invisible uses `>=`;
//! - an adjacent pair has an empty intermediate run, is therefore both
//!   visible and invisible, and resolves to the visible kind because
//!   the kinds are checked in the fixed order RV, RIV, FV, FIV.
//!
//! Per-node counts of the four kinds collapse into a single pattern
//! code by powers of ten. The weight order differs between the views:
//! indegree packs (RV, RIV, FV, FIV), outdegree packs (FV, FIV, RV,
//! RIV). Time reversal exchanges rise with fall and source with target,
//! so this cross-wiring is what makes the two code distributions
//! comparable as time-reversed counterparts.

use std::fmt;

use crate::divergence::{CountDistribution, DEFAULT_DELTA, kld};
use crate::error::GraphError;
use crate::graph::{DegreeKind, tabulate};
use crate::series::TimeSeries;
use crate::subgraph::RefinedPrefixSubgraph;

/// Geometric class of a refined edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    RiseVisible,
    RiseInvisible,
    FallVisible,
    FallInvisible,
}

impl EdgeKind {
    /// All kinds, in classification order.
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::RiseVisible,
        EdgeKind::RiseInvisible,
        EdgeKind::FallVisible,
        EdgeKind::FallInvisible,
    ];

    /// Short label as used in result tables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::RiseVisible => "RV",
            EdgeKind::RiseInvisible => "RIV",
            EdgeKind::FallVisible => "FV",
            EdgeKind::FallInvisible => "FIV",
        }
    }

    /// Position in the per-node count vector.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            EdgeKind::RiseVisible => 0,
            EdgeKind::RiseInvisible => 1,
            EdgeKind::FallVisible => 2,
            EdgeKind::FallInvisible => 3,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed, kind-labeled edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefinedEdge {
    pub source: usize,
    pub target: usize,
    pub kind: EdgeKind,
}

/// Construction parameters for [`RefinedGraph`].
#[derive(Debug, Clone, Copy)]
pub struct RefinedConfig {
    /// Maximum time-index gap an edge may span. Must be at least 1.
    pub window_width: usize,
    /// Smoothing constant for the divergence estimator.
    pub delta: f64,
}

impl Default for RefinedConfig {
    fn default() -> Self {
        Self {
            window_width: 2,
            delta: DEFAULT_DELTA,
        }
    }
}

/// Per-node count vector, one slot per [`EdgeKind`].
pub(crate) type KindCounts = [u64; 4];

/// Windowed, pattern-classifying visibility graph.
#[derive(Debug, Clone)]
pub struct RefinedGraph {
    name: String,
    series: TimeSeries,
    window_width: usize,
    delta: f64,
    edges: Vec<RefinedEdge>,
    in_counts: Vec<KindCounts>,
    out_counts: Vec<KindCounts>,
}

impl RefinedGraph {
    /// Build the refined graph over `series`.
    ///
    /// Fails with [`GraphError::InvalidWindowWidth`] on a zero window
    /// and [`GraphError::SeriesTooShort`] when the series is not longer
    /// than the window (the trimmed pattern range would be empty).
    pub fn build(
        series: TimeSeries,
        name: impl Into<String>,
        config: RefinedConfig,
    ) -> Result<Self, GraphError> {
        let w = config.window_width;
        if w == 0 {
            return Err(GraphError::InvalidWindowWidth(0));
        }
        let n = series.len();
        if n <= w {
            return Err(GraphError::SeriesTooShort {
                len: n,
                window_width: w,
            });
        }

        let mut edges = Vec::new();
        for ta in 1..=n {
            let ya = series.value(ta);
            for tb in ta + 1..=n.min(ta + w) {
                let yb = series.value(tb);
                let slope = (yb - ya) / ((tb - ta) as f64);
                let mut visible = true;
                let mut invisible = true;
                for tc in ta + 1..tb {
                    let yc = series.value(tc);
                    let line = ya + slope * ((tc - ta) as f64);
                    visible &= yc < line;
                    invisible &= yc >= line;
                    if !visible && !invisible {
                        break;
                    }
                }
                if visible || invisible {
                    let kind = classify(slope, visible, invisible)
                        .ok_or(GraphError::InvalidEdgeClassification { ta, tb })?;
                    edges.push(RefinedEdge {
                        source: ta,
                        target: tb,
                        kind,
                    });
                }
            }
        }

        let (in_counts, out_counts) = tally_kind_counts(edges.iter().copied(), n);
        Ok(Self {
            name: name.into(),
            series,
            window_width: w,
            delta: config.delta,
            edges,
            in_counts,
            out_counts,
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
    pub fn window_width(&self) -> usize {
        self.window_width
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn edges(&self) -> &[RefinedEdge] {
        &self.edges
    }

    fn table(&self) -> PatternTable<'_> {
        PatternTable {
            in_counts: &self.in_counts,
            out_counts: &self.out_counts,
            window_width: self.window_width,
        }
    }

    /// Per-node counts of one edge kind under the chosen degree view,
    /// over every node `1..=N`.
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

    /// Per-node pattern codes for the indegree or outdegree view.
    pub fn pattern_sequence(&self, view: DegreeKind) -> Result<Vec<u64>, GraphError> {
        self.table().sequence(view)
    }

    /// Tabulated pattern codes with the window-sized trim applied.
    ///
    /// `range` is 1-based and end-exclusive; `None` covers the whole
    /// series. The first `w` nodes of the range are dropped from the
    /// indegree view and the last `w` from the outdegree view, since
    /// those nodes cannot carry a full backward- or forward-looking
    /// neighborhood.
    ///
    /// A range outside the series bounds fails with
    /// [`GraphError::InvalidRange`]; one not longer than the window
    /// fails with [`GraphError::SeriesTooShort`].
    pub fn pattern_distribution(
        &self,
        view: DegreeKind,
        range: Option<(usize, usize)>,
    ) -> Result<CountDistribution, GraphError> {
        self.table().distribution(view, range)
    }

    /// KL divergence of the trimmed indegree pattern distribution (P)
    /// from the trimmed outdegree pattern distribution (Q), over the
    /// whole series or an explicit `[start, end)` sub-range.
    pub fn compute_irreversibility(
        &self,
        range: Option<(usize, usize)>,
    ) -> Result<f64, GraphError> {
        self.table().irreversibility(range, self.delta)
    }

    /// Read-only restriction to the first `len` nodes, reusing the
    /// already-classified edge list.
    pub fn prefix(&self, len: usize) -> Result<RefinedPrefixSubgraph<'_>, GraphError> {
        RefinedPrefixSubgraph::new(self, len)
    }
}

/// Resolve the edge kind, checking visible before invisible so that
/// adjacent pairs (empty intermediate run, both flags set) land on the
/// visible kind.
fn classify(slope: f64, visible: bool, invisible: bool) -> Option<EdgeKind> {
    let rise = slope > 0.0;
    if rise && visible {
        Some(EdgeKind::RiseVisible)
    } else if rise && invisible {
        Some(EdgeKind::RiseInvisible)
    } else if !rise && visible {
        Some(EdgeKind::FallVisible)
    } else if !rise && invisible {
        Some(EdgeKind::FallInvisible)
    } else {
        None
    }
}

/// Tally per-node kind counts over nodes `1..=n`.
pub(crate) fn tally_kind_counts(
    edges: impl Iterator<Item = RefinedEdge>,
    n: usize,
) -> (Vec<KindCounts>, Vec<KindCounts>) {
    let mut in_counts = vec![[0u64; 4]; n];
    let mut out_counts = vec![[0u64; 4]; n];
    for edge in edges {
        let k = edge.kind.index();
        out_counts[edge.source - 1][k] += 1;
        in_counts[edge.target - 1][k] += 1;
    }
    (in_counts, out_counts)
}

/// Pattern-code queries over per-node kind counts. Shared between the
/// full graph and its prefix restrictions.
pub(crate) struct PatternTable<'a> {
    pub in_counts: &'a [KindCounts],
    pub out_counts: &'a [KindCounts],
    pub window_width: usize,
}

impl PatternTable<'_> {
    fn node_count(&self) -> usize {
        self.in_counts.len()
    }

    pub(crate) fn sequence(&self, view: DegreeKind) -> Result<Vec<u64>, GraphError> {
        let counts = match view {
            DegreeKind::InDegree => self.in_counts,
            DegreeKind::OutDegree => self.out_counts,
            DegreeKind::Degree => {
                return Err(GraphError::InvalidDegreeKind {
                    kind: view.as_str().to_string(),
                });
            }
        };
        Ok(counts.iter().map(|c| pattern_code(c, view)).collect())
    }

    pub(crate) fn distribution(
        &self,
        view: DegreeKind,
        range: Option<(usize, usize)>,
    ) -> Result<CountDistribution, GraphError> {
        let codes = self.sequence(view)?;
        let n = self.node_count();
        let w = self.window_width;
        let (start, end) = range.unwrap_or((1, n + 1));
        if start < 1 || start >= end || end > n + 1 {
            return Err(GraphError::InvalidRange { start, end, len: n });
        }
        if end - start <= w {
            return Err(GraphError::SeriesTooShort {
                len: end - start,
                window_width: w,
            });
        }
        // Trimmed node span, inclusive on both sides.
        let (first, last) = match view {
            DegreeKind::InDegree => (start + w, end - 1),
            DegreeKind::OutDegree => (start, end - 1 - w),
            DegreeKind::Degree => unreachable!("rejected by sequence()"),
        };
        Ok(tabulate(&codes[first - 1..last]))
    }

    pub(crate) fn irreversibility(
        &self,
        range: Option<(usize, usize)>,
        delta: f64,
    ) -> Result<f64, GraphError> {
        let p = self.distribution(DegreeKind::InDegree, range)?;
        let q = self.distribution(DegreeKind::OutDegree, range)?;
        kld(&p, &q, delta)
    }
}

/// Collapse a kind-count vector into a pattern code.
///
/// The indegree view packs (RV, RIV, FV, FIV) into descending powers of
/// ten; the outdegree view packs (FV, FIV, RV, RIV). Counts reaching 10
/// alias neighboring positions, exactly as the weighting defines.
pub(crate) fn pattern_code(counts: &KindCounts, view: DegreeKind) -> u64 {
    let [rv, riv, fv, fiv] = *counts;
    match view {
        DegreeKind::InDegree => rv * 1000 + riv * 100 + fv * 10 + fiv,
        DegreeKind::OutDegree => fv * 1000 + fiv * 100 + rv * 10 + riv,
        DegreeKind::Degree => unreachable!("pattern codes have no total-degree view"),
    }
}
