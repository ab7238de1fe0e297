//! Geometric Brownian motion path generation.
//!
//! Each path is advanced with the exact log-space update
//!
//! ```text
//! S(t+dt) = S(t) × exp((μ - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! drawing one independent standard normal `Z` per path per step. The
//! multiplicative form keeps prices positive for any finite draw; every
//! generated price is still checked, and a NaN, infinite or non-positive value
//! aborts the simulation with [`SimError::NumericAnomaly`].
//!
//! Two drivers are provided:
//!
//! - [`simulate`]: sequential, consumes a caller-owned [`RandomSampler`]
//! - [`simulate_parallel`]: rows filled concurrently with Rayon, each path
//!   drawing from its own [`SimRng::for_stream`] generator

use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::matrix::PathMatrix;
use crate::params::SimulationParameters;
use crate::rng::{RandomSampler, SimRng};

/// Simulates `path_count` GBM paths sequentially.
///
/// Draw order is path-major, step-minor.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if `params` fail validation (checked
///   before the matrix is allocated)
/// - [`SimError::NumericAnomaly`] if a generated price is not finite and
///   positive
///
/// # Examples
///
/// ```rust
/// use sim_engine::{gbm, rng::SimRng, SimulationParameters};
///
/// let params = SimulationParameters::builder()
///     .step_count(12)
///     .path_count(100)
///     .build()
///     .unwrap();
/// let mut rng = SimRng::from_seed(42);
///
/// let paths = gbm::simulate(&params, &mut rng).unwrap();
/// assert_eq!(paths.n_paths(), 100);
/// assert_eq!(paths.row_len(), 13);
/// ```
pub fn simulate<S: RandomSampler>(
    params: &SimulationParameters,
    mut sampler: S,
) -> SimResult<PathMatrix> {
    params.validate()?;

    let mut matrix = PathMatrix::zeros(params.path_count(), params.step_count());
    let stepper = Stepper::new(params);
    let row_len = matrix.row_len();

    for (path, row) in matrix.as_mut_slice().chunks_exact_mut(row_len).enumerate() {
        stepper.evolve(path, row, &mut sampler)?;
    }

    Ok(matrix)
}

/// Simulates `path_count` GBM paths in parallel.
///
/// Path `i` draws from `SimRng::for_stream(base_seed, i)`, so the result is
/// a pure function of `(params, base_seed)` whatever the thread count.
///
/// # Errors
///
/// Same as [`simulate`]. When several paths hit an anomaly, which one is
/// reported is unspecified.
pub fn simulate_parallel(params: &SimulationParameters, base_seed: u64) -> SimResult<PathMatrix> {
    params.validate()?;

    let mut matrix = PathMatrix::zeros(params.path_count(), params.step_count());
    let stepper = Stepper::new(params);
    let row_len = matrix.row_len();

    matrix
        .as_mut_slice()
        .par_chunks_mut(row_len)
        .enumerate()
        .try_for_each(|(path, row)| {
            let mut rng = SimRng::for_stream(base_seed, path as u64);
            stepper.evolve(path, row, &mut rng)
        })?;

    Ok(matrix)
}

/// Per-step constants, hoisted out of the path loop.
#[derive(Clone, Copy, Debug)]
struct Stepper {
    initial_price: f64,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl Stepper {
    fn new(params: &SimulationParameters) -> Self {
        Self {
            initial_price: params.initial_price(),
            drift_dt: params.drift_dt(),
            vol_sqrt_dt: params.vol_sqrt_dt(),
        }
    }

    /// Fills one row: column 0 is the initial price, then one draw per step.
    #[inline]
    fn evolve<S: RandomSampler>(&self, path: usize, row: &mut [f64], sampler: &mut S) -> SimResult<()> {
        row[0] = self.initial_price;

        for step in 1..row.len() {
            let z = sampler.normal();
            let price = row[step - 1] * (self.drift_dt + self.vol_sqrt_dt * z).exp();

            if !(price.is_finite() && price > 0.0) {
                return Err(SimError::NumericAnomaly {
                    path,
                    step,
                    value: price,
                });
            }
            row[step] = price;
        }

        Ok(())
    }
}
