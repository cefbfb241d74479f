//! # tirvg-synth
//!
//! Synthetic time-series generators and Monte Carlo helpers for the
//! visibility-graph irreversibility engine. Everything is deterministic
//! per seed; nothing here performs I/O.

#![deny(unsafe_code)]

pub mod error;
pub mod garch;
pub mod generators;
pub mod monte_carlo;

pub use error::SynthError;
pub use garch::Garch11;
pub use generators::{SeriesKind, generate};
pub use monte_carlo::{McSummary, refined_tir, sample_trials, shuffle_trials};
