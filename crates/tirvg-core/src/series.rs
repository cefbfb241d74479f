//! Time-series container with 1-based time indices.

use crate::error::GraphError;

/// An ordered sequence of real values, one per time step.
///
/// Time indices are 1-based throughout the crate: the first observation
/// is node 1, the last is node `len()`. The series is immutable once it
/// has been handed to a graph builder. Values are assumed finite; NaN
/// and infinity filtering is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
}

impl TimeSeries {
    /// Wrap a non-empty vector of observations.
    pub fn new(values: Vec<f64>) -> Result<Self, GraphError> {
        if values.is_empty() {
            return Err(GraphError::EmptySeries);
        }
        Ok(Self { values })
    }

    /// Copy a non-empty slice of observations.
    pub fn from_slice(values: &[f64]) -> Result<Self, GraphError> {
        Self::new(values.to_vec())
    }

    /// Number of observations (and of graph nodes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed series; kept for slice-like APIs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at 1-based time index `t`.
    ///
    /// # Panics
    /// Panics when `t` is 0 or past the end of the series.
    #[must_use]
    pub fn value(&self, t: usize) -> f64 {
        self.values[t - 1]
    }

    /// Raw observations in time order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(t, value)` pairs with `t` running from 1 to `len()`.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &y)| (i + 1, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_based_indexing() {
        let ts = TimeSeries::from_slice(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.value(1), 10.0);
        assert_eq!(ts.value(3), 30.0);
        let points: Vec<_> = ts.points().collect();
        assert_eq!(points, vec![(1, 10.0), (2, 20.0), (3, 30.0)]);
    }

    #[test]
    fn empty_series_rejected() {
        assert_eq!(TimeSeries::new(Vec::new()), Err(GraphError::EmptySeries));
    }
}
