//! Time-resolved irreversibility over sliding windows.

use crate::error::GraphError;
use crate::refined::RefinedGraph;

/// Irreversibility trajectory of a pre-built refined graph.
///
/// One score per admissible window start `i = 1 ..= N - L + 1`, each
/// equal to `graph.compute_irreversibility(Some((i, i + L)))`. The
/// graph is built once and only re-scored per window; construction
/// dominates cost, so this reuse is what makes long trajectories
/// tractable.
///
/// `window_len` must exceed the graph's window width (otherwise every
/// trimmed sub-range would be empty, [`GraphError::SeriesTooShort`])
/// and must not exceed the series length
/// ([`GraphError::InvalidRange`]), so a batch driver can propagate a
/// bad window choice instead of aborting.
pub fn sliding_window_tir(
    graph: &RefinedGraph,
    window_len: usize,
) -> Result<Vec<f64>, GraphError> {
    let n = graph.node_count();
    let w = graph.window_width();
    if window_len <= w {
        return Err(GraphError::SeriesTooShort {
            len: window_len,
            window_width: w,
        });
    }
    if window_len > n {
        return Err(GraphError::InvalidRange {
            start: 1,
            end: window_len + 1,
            len: n,
        });
    }
    (1..=n - window_len + 1)
        .map(|start| graph.compute_irreversibility(Some((start, start + window_len))))
        .collect()
}
