//! # Simulation Engine
//!
//! Numerical kernels for two independent Monte Carlo pipelines:
//!
//! 1. **π estimation** ([`pi`]): uniform points in the unit square, counted
//!    against the quarter disc.
//! 2. **GBM paths** ([`gbm`] → [`stats`] → [`writer`]): geometric Brownian
//!    motion trajectories, summary statistics of terminal prices, and
//!    delimited-text persistence.
//!
//! Both pipelines draw from an explicitly owned generator ([`rng::SimRng`]);
//! there is no global generator state. Parallel variants give every worker
//! its own derived stream, so results depend on the seed only.
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_engine::{gbm, pi, rng::SimRng, stats, SimulationParameters};
//!
//! let mut rng = SimRng::from_seed(42);
//!
//! let estimate = pi::estimate_pi(10_000, &mut rng).unwrap();
//! assert!((0.0..=4.0).contains(&estimate));
//!
//! let params = SimulationParameters::builder()
//!     .path_count(200)
//!     .step_count(52)
//!     .build()
//!     .unwrap();
//! let paths = gbm::simulate(&params, &mut rng).unwrap();
//! let summary = stats::summarize(&paths, &params).unwrap();
//! assert!(summary.min > 0.0);
//! ```
//!
//! ## Error Taxonomy
//!
//! See [`SimError`]: invalid arguments and numeric anomalies abort the
//! pipeline that raised them; I/O failures are recoverable.

pub mod error;
pub mod gbm;
pub mod matrix;
pub mod params;
pub mod pi;
pub mod rng;
pub mod stats;
pub mod writer;

// Re-exports for convenient access
pub use error::{SimError, SimResult};
pub use matrix::PathMatrix;
pub use params::{SimulationParameters, SimulationParametersBuilder, MAX_CELLS};
pub use pi::{PiEstimate, Sampling, DEFAULT_SAMPLE_SIZES};
pub use rng::{RandomSampler, SimRng};
pub use stats::Statistics;
pub use writer::PathWriter;
