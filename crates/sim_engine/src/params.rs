//! Geometric Brownian motion simulation parameters.
//!
//! [`SimulationParameters`] is an immutable, validated value. Construct it
//! with [`SimulationParameters::new`] or the fluent
//! [`SimulationParameters::builder`]; both reject invalid inputs with
//! [`SimError::InvalidArgument`] before anything is allocated.

use crate::error::{SimError, SimResult};

/// Maximum number of prices a simulation may store,
/// `path_count * (step_count + 1)`: 2 GB of `f64`.
pub const MAX_CELLS: usize = 250_000_000;

/// Parameters of a GBM path simulation.
///
/// # Model
///
/// ```text
/// dS = μ S dt + σ S dW
/// ```
///
/// discretised over `step_count` equal steps of length `dt = T / step_count`.
///
/// # Examples
///
/// ```rust
/// use sim_engine::SimulationParameters;
///
/// let params = SimulationParameters::builder()
///     .initial_price(100.0)
///     .drift(0.05)
///     .volatility(0.2)
///     .horizon_years(1.0)
///     .step_count(252)
///     .path_count(1000)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.step_count(), 252);
/// assert!((params.theoretical_mean() - 100.0 * 0.05_f64.exp()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationParameters {
    /// Initial price (S₀).
    pub(crate) initial_price: f64,
    /// Annualised drift (μ).
    pub(crate) drift: f64,
    /// Annualised volatility (σ).
    pub(crate) volatility: f64,
    /// Horizon (T) in years.
    pub(crate) horizon_years: f64,
    /// Number of time steps per path.
    pub(crate) step_count: usize,
    /// Number of independent paths.
    pub(crate) path_count: usize,
}

impl SimulationParameters {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] naming the first invalid field.
    pub fn new(
        initial_price: f64,
        drift: f64,
        volatility: f64,
        horizon_years: f64,
        step_count: usize,
        path_count: usize,
    ) -> SimResult<Self> {
        let params = Self {
            initial_price,
            drift,
            volatility,
            horizon_years,
            step_count,
            path_count,
        };
        params.validate()?;
        Ok(params)
    }

    /// Creates a new builder seeded with the reference defaults.
    #[inline]
    pub fn builder() -> SimulationParametersBuilder {
        SimulationParametersBuilder::default()
    }

    /// Returns the initial price.
    #[inline]
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Returns the annualised drift.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the horizon in years.
    #[inline]
    pub fn horizon_years(&self) -> f64 {
        self.horizon_years
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the number of paths.
    #[inline]
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    /// Time step length `T / step_count`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon_years / self.step_count as f64
    }

    /// Square root of the time step.
    #[inline]
    pub fn sqrt_dt(&self) -> f64 {
        self.dt().sqrt()
    }

    /// Deterministic log-increment per step: `(μ - ½σ²) dt`.
    #[inline]
    pub fn drift_dt(&self) -> f64 {
        (self.drift - 0.5 * self.volatility * self.volatility) * self.dt()
    }

    /// Diffusion scale per step: `σ √dt`.
    #[inline]
    pub fn vol_sqrt_dt(&self) -> f64 {
        self.volatility * self.sqrt_dt()
    }

    /// Closed-form GBM expectation `S₀ exp(μT)`.
    ///
    /// Reported alongside the simulated mean for comparison only.
    #[inline]
    pub fn theoretical_mean(&self) -> f64 {
        self.initial_price * (self.drift * self.horizon_years).exp()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if:
    /// - `initial_price` is not finite or not positive
    /// - `drift` is not finite
    /// - `volatility` is not finite or negative
    /// - `horizon_years` is not finite or not positive
    /// - `step_count` or `path_count` is 0
    /// - the path matrix would hold more than [`MAX_CELLS`] prices
    pub fn validate(&self) -> SimResult<()> {
        if !(self.initial_price.is_finite() && self.initial_price > 0.0) {
            return Err(SimError::invalid(
                "initial_price",
                format!("must be finite and positive, got {}", self.initial_price),
            ));
        }
        if !self.drift.is_finite() {
            return Err(SimError::invalid(
                "drift",
                format!("must be finite, got {}", self.drift),
            ));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(SimError::invalid(
                "volatility",
                format!("must be finite and non-negative, got {}", self.volatility),
            ));
        }
        if !(self.horizon_years.is_finite() && self.horizon_years > 0.0) {
            return Err(SimError::invalid(
                "horizon_years",
                format!("must be finite and positive, got {}", self.horizon_years),
            ));
        }
        if self.step_count == 0 {
            return Err(SimError::invalid("step_count", "must be at least 1, got 0"));
        }
        if self.path_count == 0 {
            return Err(SimError::invalid("path_count", "must be at least 1, got 0"));
        }
        if self.cell_count().map_or(true, |cells| cells > MAX_CELLS) {
            return Err(SimError::invalid(
                "cells",
                format!(
                    "{} paths of {} steps exceed the limit of {} stored prices",
                    self.path_count, self.step_count, MAX_CELLS
                ),
            ));
        }
        Ok(())
    }

    /// Number of prices in the path matrix, `path_count * (step_count + 1)`,
    /// or `None` on overflow.
    #[inline]
    pub fn cell_count(&self) -> Option<usize> {
        self.step_count
            .checked_add(1)
            .and_then(|row_len| self.path_count.checked_mul(row_len))
    }
}

impl Default for SimulationParameters {
    /// The reference configuration: daily steps over one year, 1000 paths.
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            drift: 0.05,
            volatility: 0.20,
            horizon_years: 1.0,
            step_count: 252,
            path_count: 1000,
        }
    }
}

/// Builder for [`SimulationParameters`].
///
/// Unset fields keep the reference defaults.
///
/// ```rust
/// use sim_engine::SimulationParameters;
///
/// let params = SimulationParameters::builder()
///     .volatility(0.0)
///     .path_count(5)
///     .step_count(10)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.initial_price(), 100.0);
/// assert_eq!(params.path_count(), 5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationParametersBuilder {
    params: SimulationParameters,
}

impl SimulationParametersBuilder {
    /// Sets the initial price.
    #[inline]
    pub fn initial_price(mut self, initial_price: f64) -> Self {
        self.params.initial_price = initial_price;
        self
    }

    /// Sets the annualised drift.
    #[inline]
    pub fn drift(mut self, drift: f64) -> Self {
        self.params.drift = drift;
        self
    }

    /// Sets the annualised volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.params.volatility = volatility;
        self
    }

    /// Sets the horizon in years.
    #[inline]
    pub fn horizon_years(mut self, horizon_years: f64) -> Self {
        self.params.horizon_years = horizon_years;
        self
    }

    /// Sets the number of time steps.
    #[inline]
    pub fn step_count(mut self, step_count: usize) -> Self {
        self.params.step_count = step_count;
        self
    }

    /// Sets the number of paths.
    #[inline]
    pub fn path_count(mut self, path_count: usize) -> Self {
        self.params.path_count = path_count;
        self
    }

    /// Builds and validates the parameters.
    ///
    /// # Errors
    ///
    /// See [`SimulationParameters::validate`].
    pub fn build(self) -> SimResult<SimulationParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}
