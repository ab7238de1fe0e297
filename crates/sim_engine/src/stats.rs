//! Summary statistics of simulated terminal prices.
//!
//! Variance is the population (divide-by-N) variance computed from raw
//! moments, `Σx²/N − mean²`, clamped at zero before the square root to
//! absorb floating-point cancellation. When every terminal price is equal
//! the mean is that price and the variance is exactly zero. The unbiased
//! (N−1) figure is available separately via [`Statistics::sample_std_dev`].

use crate::error::{SimError, SimResult};
use crate::matrix::PathMatrix;
use crate::params::SimulationParameters;

/// Statistics of the final column of a [`PathMatrix`].
///
/// # Examples
///
/// ```rust
/// use sim_engine::{stats, PathMatrix, SimulationParameters};
///
/// let params = SimulationParameters::builder()
///     .step_count(1)
///     .path_count(2)
///     .build()
///     .unwrap();
/// let matrix = PathMatrix::from_flat(2, 1, vec![100.0, 90.0, 100.0, 110.0]).unwrap();
///
/// let summary = stats::summarize(&matrix, &params).unwrap();
/// assert_eq!(summary.mean, 100.0);
/// assert_eq!(summary.std_dev, 10.0);
/// assert_eq!((summary.min, summary.max), (90.0, 110.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Statistics {
    /// Number of paths summarised.
    pub n_paths: usize,
    /// Mean terminal price.
    pub mean: f64,
    /// Population variance of terminal prices.
    pub variance: f64,
    /// Population standard deviation, `sqrt(max(variance, 0))`.
    pub std_dev: f64,
    /// Smallest terminal price.
    pub min: f64,
    /// Largest terminal price.
    pub max: f64,
    /// Closed-form expectation `S₀ exp(μT)`.
    pub theoretical_mean: f64,
}

impl Statistics {
    /// Standard error of the mean, `std_dev / √N`.
    #[inline]
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.n_paths as f64).sqrt()
    }

    /// Simulated mean minus the closed-form expectation.
    #[inline]
    pub fn mean_deviation(&self) -> f64 {
        self.mean - self.theoretical_mean
    }

    /// Standard deviation with the unbiased N−1 divisor.
    ///
    /// Returns 0 for a single path.
    pub fn sample_std_dev(&self) -> f64 {
        if self.n_paths < 2 {
            return 0.0;
        }
        let n = self.n_paths as f64;
        (self.variance.max(0.0) * n / (n - 1.0)).sqrt()
    }
}

/// Summarises the terminal prices of `matrix`.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if the matrix is empty or its path count
///   differs from `params.path_count()`
/// - [`SimError::NumericAnomaly`] if a terminal price is not finite
pub fn summarize(matrix: &PathMatrix, params: &SimulationParameters) -> SimResult<Statistics> {
    let n_paths = matrix.n_paths();
    if n_paths == 0 {
        return Err(SimError::invalid("matrix", "cannot summarise an empty matrix"));
    }
    if n_paths != params.path_count() {
        return Err(SimError::invalid(
            "matrix",
            format!(
                "path count {} does not match parameters ({})",
                n_paths,
                params.path_count()
            ),
        ));
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for (path, row) in matrix.rows().enumerate() {
        let price = row[matrix.n_steps()];
        if !price.is_finite() {
            return Err(SimError::NumericAnomaly {
                path,
                step: matrix.n_steps(),
                value: price,
            });
        }
        sum += price;
        sum_sq += price * price;
        min = min.min(price);
        max = max.max(price);
    }

    // Raw moments leave rounding residue on identical values.
    let (mean, variance) = if min == max {
        (min, 0.0)
    } else {
        let n = n_paths as f64;
        let mean = sum / n;
        (mean, sum_sq / n - mean * mean)
    };

    Ok(Statistics {
        n_paths,
        mean,
        variance,
        std_dev: variance.max(0.0).sqrt(),
        min,
        max,
        theoretical_mean: params.theoretical_mean(),
    })
}
