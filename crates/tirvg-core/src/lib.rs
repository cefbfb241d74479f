//! # tirvg-core
//!
//! Time-series irreversibility via directed visibility graphs.
//!
//! A numeric sequence becomes a forward-pointing DAG whose edges encode
//! geometric visibility between time points; comparing the graph's
//! in-degree and out-degree (or pattern-code) distributions with a
//! smoothed KL divergence yields a scalar measure of time-reversal
//! asymmetry.
//!
//! This crate provides:
//! - the direct visibility predicate family ([`visibility`]) and the
//!   fast divide-and-conquer construction ([`fast_visibility`]);
//! - the pattern-classifying windowed builder ([`refined`]) behind the
//!   primary irreversibility measure;
//! - prefix subgraph extraction ([`subgraph`]) and sliding-window
//!   irreversibility trajectories ([`tir`]);
//! - the smoothed divergence estimator ([`divergence`]).
//!
//! The core is single-threaded, performs no I/O and holds no shared
//! mutable state; callers may parallelize independent trials freely.

#![deny(unsafe_code)]

pub mod divergence;
pub mod error;
pub mod fast_visibility;
pub mod graph;
pub mod refined;
pub mod series;
pub mod subgraph;
pub mod tir;
pub mod visibility;

pub use divergence::{CountDistribution, DEFAULT_DELTA, kld};
pub use error::GraphError;
pub use fast_visibility::FastNaturalVisibility;
pub use graph::{DegreeKind, Edge, Graph, GraphBuilder};
pub use refined::{EdgeKind, RefinedConfig, RefinedEdge, RefinedGraph};
pub use series::TimeSeries;
pub use subgraph::{PrefixSubgraph, RefinedPrefixSubgraph};
pub use tir::sliding_window_tir;
pub use visibility::{
    FallInvisibility, FallVisibility, HorizontalVisibility, Invisibility, NaturalVisibility,
    RiseInvisibility, RiseVisibility,
};
