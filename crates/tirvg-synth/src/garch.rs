//! GARCH(1,1) path simulation.
//!
//! Only simulation lives here; calibrating the coefficients against a
//! real return series is an external concern, and the resulting
//! parameters are consumed as plain inputs.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// GARCH(1,1) coefficients for the conditional-variance recursion
/// `h_t = gamma + beta * h_{t-1} + alpha * y_{t-1}^2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Garch11 {
    /// Constant term.
    pub gamma: f64,
    /// Weight of the previous conditional variance.
    pub beta: f64,
    /// Weight of the previous squared return.
    pub alpha: f64,
}

impl Garch11 {
    /// Coefficients used for the simulated volatility-clustering walk.
    #[must_use]
    pub fn paper_defaults() -> Self {
        Self {
            gamma: 0.1,
            beta: 0.6,
            alpha: 0.3,
        }
    }

    /// Persistence `alpha + beta`; below 1 for a covariance-stationary
    /// process.
    #[must_use]
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Simulated return sequence, starting from `y_0 = 0`, `h_0 = 1`.
    pub fn simulate_returns<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<f64> {
        let mut y = vec![0.0; size];
        let mut h = 1.0;
        for t in 1..size {
            h = self.gamma + self.beta * h + self.alpha * y[t - 1] * y[t - 1];
            let z: f64 = StandardNormal.sample(rng);
            y[t] = h.sqrt() * z;
        }
        y
    }

    /// Multiplicative price path: returns are scaled down by 100 and
    /// compounded as `prod(exp(y_t / 100))`.
    pub fn simulate_path<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<f64> {
        let returns = self.simulate_returns(size, rng);
        let mut level = 1.0;
        returns
            .into_iter()
            .map(|y| {
                level *= (y / 100.0).exp();
                level
            })
            .collect()
    }
}
