//! Error types shared by every graph variant.

use thiserror::Error;

/// Contract violations surfaced by the graph and divergence layers.
///
/// Every variant is a fail-fast error: computations are deterministic,
/// so none of these are transient and none are retried. A batch driver
/// is expected to propagate them rather than skip failed trials
/// silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A graph was requested over a series with no values.
    #[error("time series must contain at least one value")]
    EmptySeries,

    /// A degree-view selector that is not recognized in this context.
    #[error("unsupported degree kind `{kind}`")]
    InvalidDegreeKind { kind: String },

    /// A connected pair matched none of the four edge kinds.
    /// Unreachable given the classification rules, but surfaced rather
    /// than panicking.
    #[error("edge ({ta}, {tb}) is neither visible nor invisible")]
    InvalidEdgeClassification { ta: usize, tb: usize },

    /// An all-zero count mapping was handed to the divergence estimator.
    #[error("empty count distribution; divergence is undefined")]
    EmptyDistribution,

    /// A finite window width is required and must be at least 1.
    #[error("window width must be a positive integer, got {0}")]
    InvalidWindowWidth(usize),

    /// The usable range is not longer than the window width, so the
    /// trimmed pattern distributions would be empty.
    #[error("range of length {len} leaves no trimmed nodes for window width {window_width}")]
    SeriesTooShort { len: usize, window_width: usize },

    /// A 1-based, end-exclusive node range outside the series bounds.
    #[error("range [{start}, {end}) is not a valid node range for {len} nodes")]
    InvalidRange { start: usize, end: usize, len: usize },
}
