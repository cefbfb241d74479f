//! Monte Carlo helpers around the refined irreversibility score.
//!
//! Shuffle trials destroy temporal structure (a permuted series should
//! score near zero, giving a null distribution for significance
//! checks); sample trials score random fixed-length windows of a longer
//! realization. A failed trial propagates immediately rather than being
//! skipped, since a failure means the input invalidates the statistical
//! interpretation of the batch.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use tirvg_core::{GraphError, RefinedConfig, RefinedGraph, TimeSeries};

use crate::error::SynthError;

/// Refined-graph irreversibility of a raw value slice in one call.
pub fn refined_tir(values: &[f64], window_width: usize) -> Result<f64, GraphError> {
    let series = TimeSeries::from_slice(values)?;
    let graph = RefinedGraph::build(
        series,
        "trial",
        RefinedConfig {
            window_width,
            ..RefinedConfig::default()
        },
    )?;
    graph.compute_irreversibility(None)
}

/// Scores of a batch of Monte Carlo trials.
#[derive(Debug, Clone, Serialize)]
pub struct McSummary {
    pub scores: Vec<f64>,
    pub mean: f64,
    /// Population standard deviation (no Bessel correction).
    pub std: f64,
}

impl McSummary {
    fn from_scores(scores: Vec<f64>) -> Self {
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let var = scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        Self {
            scores,
            mean,
            std: var.sqrt(),
        }
    }
}

/// Score `n_iter` random permutations of `original`.
pub fn shuffle_trials(
    original: &[f64],
    window_width: usize,
    n_iter: usize,
    seed: u64,
) -> Result<McSummary, SynthError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scores = Vec::with_capacity(n_iter);
    for _ in 0..n_iter {
        let mut trial = original.to_vec();
        trial.shuffle(&mut rng);
        scores.push(refined_tir(&trial, window_width)?);
    }
    Ok(McSummary::from_scores(scores))
}

/// Score `n_iter` random windows of length `sample_len` drawn from
/// `original`.
///
/// Fails with [`SynthError::NoSampleWindow`] when `original` is not
/// longer than `sample_len + 1`; there would be no admissible window
/// start.
pub fn sample_trials(
    original: &[f64],
    sample_len: usize,
    window_width: usize,
    n_iter: usize,
    seed: u64,
) -> Result<McSummary, SynthError> {
    if original.len() <= sample_len + 1 {
        return Err(SynthError::NoSampleWindow {
            len: original.len(),
            sample_len,
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scores = Vec::with_capacity(n_iter);
    for _ in 0..n_iter {
        let start = rng.gen_range(1..original.len() - sample_len);
        scores.push(refined_tir(
            &original[start..start + sample_len],
            window_width,
        )?);
    }
    Ok(McSummary::from_scores(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{SeriesKind, generate};

    #[test]
    fn refined_tir_matches_the_long_form() {
        let values = generate(SeriesKind::WhiteNoise, 120, 3);
        let series = TimeSeries::from_slice(&values).unwrap();
        let graph = RefinedGraph::build(series, "long-form", RefinedConfig::default()).unwrap();
        assert_eq!(
            refined_tir(&values, 2).unwrap(),
            graph.compute_irreversibility(None).unwrap()
        );
    }

    #[test]
    fn shuffle_trials_are_reproducible() {
        let values = generate(SeriesKind::AdditiveRandomWalk, 150, 5);
        let a = shuffle_trials(&values, 2, 5, 0).unwrap();
        let b = shuffle_trials(&values, 2, 5, 0).unwrap();
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.scores.len(), 5);
        assert!(a.std >= 0.0);
    }

    #[test]
    fn sample_trials_score_windows_of_the_original() {
        let values = generate(SeriesKind::WhiteNoise, 300, 9);
        let summary = sample_trials(&values, 100, 2, 4, 1).unwrap();
        assert_eq!(summary.scores.len(), 4);
        assert!(summary.scores.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn failed_trials_propagate() {
        // Too short for the window: every trial fails, and the first
        // failure surfaces instead of an empty summary.
        let values = [1.0, 2.0];
        assert!(matches!(
            shuffle_trials(&values, 2, 3, 0),
            Err(SynthError::Graph(GraphError::SeriesTooShort { .. }))
        ));
    }

    #[test]
    fn sampling_from_a_too_short_series_is_rejected() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            sample_trials(&values, 3, 2, 2, 0),
            Err(SynthError::NoSampleWindow {
                len: 4,
                sample_len: 3
            })
        ));
    }

    #[test]
    fn summary_serializes_for_the_output_layer() {
        let values = generate(SeriesKind::WhiteNoise, 100, 2);
        let summary = shuffle_trials(&values, 2, 3, 0).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"mean\""));
        assert!(json.contains("\"std\""));
    }
}
