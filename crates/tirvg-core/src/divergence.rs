//! Smoothed Kullback-Leibler divergence between count distributions.
//!
//! The irreversibility score of every graph variant reduces to
//! `kld(indegree_counts, outdegree_counts, delta)`. The estimator is
//! asymmetric in its arguments; argument order is part of the contract.

use std::collections::BTreeMap;

use crate::error::GraphError;

/// Occurrence counts keyed by degree value or pattern code.
pub type CountDistribution = BTreeMap<u64, u64>;

/// Default additive smoothing constant for the divergence estimator.
///
/// Added to both the numerator and the denominator of every probability
/// ratio so that cells with zero mass in `Q` contribute a large but
/// finite term instead of an infinity.
pub const DEFAULT_DELTA: f64 = 1e-10;

/// Smoothed KL divergence `sum_k p(k) * ln((p(k)+delta)/(q(k)+delta))`.
///
/// Each count map is normalized over its own total. Keys present in `P`
/// but absent from `Q` are treated as `q(k) = 0`; keys absent from `P`
/// contribute nothing to the sum.
///
/// Properties:
/// - non-negative up to smoothing error,
/// - exactly 0 when the two count maps induce identical distributions.
///
/// Returns [`GraphError::EmptyDistribution`] when either map carries no
/// mass, which would otherwise be a silent division by zero.
pub fn kld(
    p_counts: &CountDistribution,
    q_counts: &CountDistribution,
    delta: f64,
) -> Result<f64, GraphError> {
    let p_total: u64 = p_counts.values().sum();
    let q_total: u64 = q_counts.values().sum();
    if p_total == 0 || q_total == 0 {
        return Err(GraphError::EmptyDistribution);
    }
    let p_total = p_total as f64;
    let q_total = q_total as f64;

    let mut sum = 0.0;
    for (key, &count) in p_counts {
        if count == 0 {
            continue;
        }
        let p = count as f64 / p_total;
        let q = q_counts.get(key).map_or(0.0, |&c| c as f64 / q_total);
        sum += p * ((p + delta) / (q + delta)).ln();
    }
    Ok(sum)
}
