//! Errors specific to the synthetic-series layer.

use thiserror::Error;
use tirvg_core::GraphError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// A series-kind name that matches none of the known processes.
    #[error("unknown series kind `{name}`")]
    UnknownSeriesKind { name: String },

    /// The realization is too short to hold any interior sample window.
    #[error("series of length {len} has no interior window of length {sample_len} to sample")]
    NoSampleWindow { len: usize, sample_len: usize },

    /// A trial failed inside the core graph layer.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
