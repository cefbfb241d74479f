//! Divide-and-conquer natural-visibility construction.
//!
//! The direct predicate is O(N^2), which is too slow for Monte Carlo
//! runs at N ~ 10^5. This builder splits every range on its first
//! maximum: no pair can see across the range maximum (the maximum is at
//! or above the reference line of any spanning pair), so the edges of a
//! range are the edges incident to the pivot plus the edges of the two
//! sub-ranges.
//!
//! Pivot incidences use the slope form of the visibility test. For
//! `a < m`, the intermediate `c` sits on or above the line of `(a, m)`
//! exactly when `pair_slope(c, m) <= pair_slope(a, m)`; so `a` sees `m`
//! iff its slope into the pivot undercuts the running minimum over the
//! closer points, and symmetrically `m` sees `b` iff its slope out of
//! the pivot exceeds the running maximum. Every slope goes through
//! [`pair_slope`], the same expression the direct builder compares, so
//! the two paths decide every pair, ties included, with identical
//! floating-point results. `tests/visibility_equivalence_test.rs` holds
//! that contract.
//!
//! Two devices keep trending series off the quadratic path. Range
//! maxima come from a precomputed sparse table instead of a rescan, and
//! the pivot scans walk the range by halving segments: a segment whose
//! best conceivable slope (its maximum value over the farthest gap,
//! monotone in both operands under rounding, hence never optimistic)
//! cannot beat the running bound is skipped whole. On drifting walks
//! and curved trends, where the pivot sits near one end of every range,
//! the skips cut each scan to a handful of segments. Exactly collinear
//! ramps still degenerate to pointwise scans: every pair there is a
//! tie that the direct reference resolves individually, and matching it
//! exactly means evaluating the same comparisons.
//!
//! Ranges are processed from an explicit work stack, so a monotone
//! series deepens the stack instead of the call stack. A finite window
//! is applied as a post-filter on the spanned gap, which keeps the two
//! paths comparable edge for edge.

use crate::graph::{Edge, GraphBuilder};
use crate::series::TimeSeries;
use crate::visibility::pair_slope;

/// Fast natural-visibility builder.
pub struct FastNaturalVisibility;

impl GraphBuilder for FastNaturalVisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        let mut edges = visibility_edges(series);
        if let Some(w) = window_width {
            edges.retain(|e| e.span() <= w);
        }
        edges.sort_unstable();
        edges
    }
}

/// Sparse table answering first-maximum queries over the series in
/// O(1) after O(N log N) setup.
struct RangeMaxTable<'a> {
    values: &'a [f64],
    /// `rows[k][i]` is the 0-based index of the first maximum over
    /// `[i, i + 2^k)`. Ties resolve to the earlier index at every
    /// merge, which preserves the first-maximum property.
    rows: Vec<Vec<usize>>,
}

impl<'a> RangeMaxTable<'a> {
    fn new(values: &'a [f64]) -> Self {
        let n = values.len();
        let mut rows = vec![(0..n).collect::<Vec<_>>()];
        let mut width = 1;
        while width * 2 <= n {
            let next: Vec<usize> = {
                let prev = &rows[rows.len() - 1];
                (0..=n - width * 2)
                    .map(|i| {
                        let a = prev[i];
                        let b = prev[i + width];
                        if values[a] >= values[b] { a } else { b }
                    })
                    .collect()
            };
            rows.push(next);
            width *= 2;
        }
        Self { values, rows }
    }

    /// First maximum of the 1-based inclusive range `[lo, hi]`.
    fn first_max(&self, lo: usize, hi: usize) -> usize {
        let (lo0, hi0) = (lo - 1, hi - 1);
        let k = (hi0 - lo0 + 1).ilog2() as usize;
        let a = self.rows[k][lo0];
        let b = self.rows[k][hi0 + 1 - (1 << k)];
        (if self.values[a] >= self.values[b] { a } else { b }) + 1
    }

    fn max_value(&self, lo: usize, hi: usize) -> f64 {
        self.values[self.first_max(lo, hi) - 1]
    }
}

/// All natural-visibility edges of the series, in no particular order.
fn visibility_edges(series: &TimeSeries) -> Vec<Edge> {
    let n = series.len();
    let mut edges = Vec::new();
    if n < 2 {
        return edges;
    }
    let table = RangeMaxTable::new(series.values());
    let mut ranges = vec![(1usize, n)];
    while let Some((lo, hi)) = ranges.pop() {
        if hi <= lo {
            continue;
        }
        let m = table.first_max(lo, hi);
        if m > lo {
            let mut min_slope = f64::INFINITY;
            predecessors(series, &table, m, lo, m - 1, &mut min_slope, &mut edges);
            ranges.push((lo, m - 1));
        }
        if m < hi {
            let mut max_slope = f64::NEG_INFINITY;
            successors(series, &table, m, m + 1, hi, &mut max_slope, &mut edges);
            ranges.push((m + 1, hi));
        }
    }
    edges
}

/// Emit pivot predecessors `(a, m)` for `a` in `[x1, x2]`, walking the
/// segment right to left by halving.
///
/// `min_slope` carries the minimum slope into the pivot over every
/// point already passed. A whole segment is skipped when even its
/// highest point over the farthest gap cannot undercut that minimum;
/// the bound underestimates every slope in the segment, under rounding
/// too, so a skip can never drop an edge or perturb the minimum.
fn predecessors(
    series: &TimeSeries,
    table: &RangeMaxTable<'_>,
    m: usize,
    x1: usize,
    x2: usize,
    min_slope: &mut f64,
    edges: &mut Vec<Edge>,
) {
    let floor = (series.value(m) - table.max_value(x1, x2)) / ((m - x1) as f64);
    if floor >= *min_slope {
        return;
    }
    if x1 == x2 {
        let slope = pair_slope(series, x1, m);
        if slope < *min_slope {
            edges.push(Edge::new(x1, m));
            *min_slope = slope;
        }
        return;
    }
    let mid = x1 + (x2 - x1) / 2;
    predecessors(series, table, m, mid + 1, x2, min_slope, edges);
    predecessors(series, table, m, x1, mid, min_slope, edges);
}

/// Emit pivot successors `(m, b)` for `b` in `[x1, x2]`, walking the
/// segment left to right by halving. Mirror image of [`predecessors`]
/// with a running maximum slope out of the pivot.
fn successors(
    series: &TimeSeries,
    table: &RangeMaxTable<'_>,
    m: usize,
    x1: usize,
    x2: usize,
    max_slope: &mut f64,
    edges: &mut Vec<Edge>,
) {
    let ceiling = (table.max_value(x1, x2) - series.value(m)) / ((x2 - m) as f64);
    if ceiling <= *max_slope {
        return;
    }
    if x1 == x2 {
        let slope = pair_slope(series, m, x1);
        if slope > *max_slope {
            edges.push(Edge::new(m, x1));
            *max_slope = slope;
        }
        return;
    }
    let mid = x1 + (x2 - x1) / 2;
    successors(series, table, m, x1, mid, max_slope, edges);
    successors(series, table, m, mid + 1, x2, max_slope, edges);
}
