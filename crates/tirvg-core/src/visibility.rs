//! Direct implementations of the visibility predicate family.
//!
//! Each builder enumerates candidate pairs `(ta, tb)` with `ta < tb`
//! (bounded by the window width when one is given, so the windowed cost
//! is O(N*w) instead of O(N^2)):
//!
//! - visibility: connect iff every intermediate lies strictly below the
//!   straight line from `(ta, ya)` to `(tb, yb)`;
//! - invisibility: connect iff every intermediate lies on or above it;
//! - horizontal visibility: connect iff no intermediate rises above
//!   `min(ya, yb)` (the slope is ignored);
//! - rise/fall restricted variants additionally require `ya < yb` or
//!   `ya > yb`; equal endpoints connect in neither.
//!
//! The visibility test is not evaluated against the line directly.
//! [`sees`] compares chord slopes anchored at the higher endpoint,
//! through the shared [`pair_slope`] helper, so that every comparison
//! is performed with the same floating-point operands and rounding as
//! in [`crate::FastNaturalVisibility`], whose edge set must match this
//! one exactly. Evaluating the line per intermediate instead rounds
//! differently on near-collinear runs and the two builders would then
//! disagree on those ties. The invisibility and horizontal variants
//! have no fast counterpart and keep the per-intermediate line test.

use crate::graph::{Edge, GraphBuilder};
use crate::series::TimeSeries;

/// Endpoint direction constraint for the restricted variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Any,
    Rise,
    Fall,
}

impl Direction {
    fn admits(self, ya: f64, yb: f64) -> bool {
        match self {
            Direction::Any => true,
            Direction::Rise => ya < yb,
            Direction::Fall => ya > yb,
        }
    }
}

/// Chord slope between two points of the series, `ta < tb`.
///
/// Both the direct and the divide-and-conquer visibility builders
/// route every slope through this one expression; identical operands
/// and operation order are what make their tie decisions identical.
#[inline]
pub(crate) fn pair_slope(series: &TimeSeries, ta: usize, tb: usize) -> f64 {
    (series.value(tb) - series.value(ta)) / ((tb - ta) as f64)
}

/// Natural-visibility test for the pair `(ta, tb)`.
///
/// The pair is blocked outright when some intermediate is the first
/// maximum of the closed span, and is otherwise decided by comparing
/// chord slopes anchored at the higher endpoint: anchored at `tb` when
/// `yb > ya` (every intermediate chord into `tb` must be steeper than
/// the pair's), anchored at `ta` otherwise (every intermediate chord
/// out of `ta` must be shallower). In exact arithmetic this is the
/// usual strictly-below-the-line rule; the anchored form is the one
/// the fast builder evaluates, bit for bit.
pub(crate) fn sees(series: &TimeSeries, ta: usize, tb: usize) -> bool {
    let ya = series.value(ta);
    let yb = series.value(tb);
    for tc in ta + 1..tb {
        let yc = series.value(tc);
        if yc > ya && yc >= yb {
            return false;
        }
    }
    let s = pair_slope(series, ta, tb);
    if yb > ya {
        (ta + 1..tb).all(|tc| pair_slope(series, tc, tb) > s)
    } else {
        (ta + 1..tb).all(|tc| pair_slope(series, ta, tc) < s)
    }
}

/// True when every intermediate of `(ta, tb)` satisfies `pred(yc, line)`
/// with `line` the reference line evaluated at `tc`.
fn line_test(
    series: &TimeSeries,
    ta: usize,
    tb: usize,
    pred: impl Fn(f64, f64) -> bool,
) -> bool {
    let ya = series.value(ta);
    let yb = series.value(tb);
    let slope = (yb - ya) / ((tb - ta) as f64);
    (ta + 1..tb).all(|tc| pred(series.value(tc), ya + slope * ((tc - ta) as f64)))
}

/// Enumerate windowed forward pairs and keep those `connects` accepts.
fn scan_pairs(
    series: &TimeSeries,
    window_width: Option<usize>,
    connects: impl Fn(usize, usize) -> bool,
) -> Vec<Edge> {
    let n = series.len();
    let mut edges = Vec::new();
    for ta in 1..=n {
        let limit = match window_width {
            Some(w) => n.min(ta + w),
            None => n,
        };
        for tb in ta + 1..=limit {
            if connects(ta, tb) {
                edges.push(Edge::new(ta, tb));
            }
        }
    }
    edges
}

fn build_line_variant(
    series: &TimeSeries,
    window_width: Option<usize>,
    direction: Direction,
    pred: impl Fn(f64, f64) -> bool + Copy,
) -> Vec<Edge> {
    scan_pairs(series, window_width, |ta, tb| {
        direction.admits(series.value(ta), series.value(tb))
            && line_test(series, ta, tb, pred)
    })
}

fn build_sees_variant(
    series: &TimeSeries,
    window_width: Option<usize>,
    direction: Direction,
) -> Vec<Edge> {
    scan_pairs(series, window_width, |ta, tb| {
        direction.admits(series.value(ta), series.value(tb)) && sees(series, ta, tb)
    })
}

/// Natural visibility: intermediates strictly below the line.
pub struct NaturalVisibility;

impl GraphBuilder for NaturalVisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        build_sees_variant(series, window_width, Direction::Any)
    }
}

/// Invisibility: intermediates on or above the line.
pub struct Invisibility;

impl GraphBuilder for Invisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        build_line_variant(series, window_width, Direction::Any, |yc, line| yc >= line)
    }
}

/// Horizontal visibility: intermediates not above `min(ya, yb)`.
pub struct HorizontalVisibility;

impl GraphBuilder for HorizontalVisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        scan_pairs(series, window_width, |ta, tb| {
            let bound = series.value(ta).min(series.value(tb));
            (ta + 1..tb).all(|tc| series.value(tc) <= bound)
        })
    }
}

/// Visibility restricted to rising pairs (`ya < yb`).
pub struct RiseVisibility;

impl GraphBuilder for RiseVisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        build_sees_variant(series, window_width, Direction::Rise)
    }
}

/// Visibility restricted to falling pairs (`ya > yb`).
pub struct FallVisibility;

impl GraphBuilder for FallVisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        build_sees_variant(series, window_width, Direction::Fall)
    }
}

/// Invisibility restricted to rising pairs.
pub struct RiseInvisibility;

impl GraphBuilder for RiseInvisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        build_line_variant(series, window_width, Direction::Rise, |yc, line| yc >= line)
    }
}

/// Invisibility restricted to falling pairs.
pub struct FallInvisibility;

impl GraphBuilder for FallInvisibility {
    fn build_edges(&self, series: &TimeSeries, window_width: Option<usize>) -> Vec<Edge> {
        build_line_variant(series, window_width, Direction::Fall, |yc, line| yc >= line)
    }
}
