//! Monte Carlo estimation of π.
//!
//! Uniform points `(x, y)` in the unit square are counted when they fall in
//! the quarter disc `x² + y² ≤ 1` (boundary inclusive); the ratio of hits to
//! samples, times four, estimates π. Counters are `u64` so sample counts well
//! beyond 10⁷ cannot overflow.

use rayon::prelude::*;

use crate::error::{SimError, SimResult};
use crate::rng::{RandomSampler, SimRng};

/// Sample sizes evaluated by the convergence run, in ascending order.
pub const DEFAULT_SAMPLE_SIZES: [u64; 5] = [1_000, 10_000, 100_000, 1_000_000, 10_000_000];

/// Number of point pairs drawn by one parallel work item.
pub const PARALLEL_CHUNK: u64 = 1 << 16;

/// Result of one π estimation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PiEstimate {
    /// Number of point pairs drawn.
    pub samples: u64,
    /// Number of pairs inside the quarter disc.
    pub inside: u64,
    /// `4 * inside / samples`.
    pub estimate: f64,
    /// `|estimate - π|`.
    pub abs_error: f64,
}

impl PiEstimate {
    fn from_counts(samples: u64, inside: u64) -> Self {
        let estimate = 4.0 * inside as f64 / samples as f64;
        Self {
            samples,
            inside,
            estimate,
            abs_error: (estimate - std::f64::consts::PI).abs(),
        }
    }
}

/// How sampling is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sampling {
    /// Single generator, single thread.
    Sequential,
    /// Rayon chunks, each with `SimRng::for_stream(base_seed, chunk)`.
    Parallel {
        /// Seed from which chunk streams are derived.
        base_seed: u64,
    },
}

/// Estimates π from `num_points` uniform pairs drawn from `sampler`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] if `num_points` is zero.
///
/// # Examples
///
/// ```rust
/// use sim_engine::{pi, rng::SimRng};
///
/// let mut rng = SimRng::from_seed(42);
/// let estimate = pi::estimate_pi(100_000, &mut rng).unwrap();
/// assert!((estimate - std::f64::consts::PI).abs() < 0.05);
/// ```
pub fn estimate_pi<S: RandomSampler>(num_points: u64, sampler: S) -> SimResult<f64> {
    Ok(estimate_pi_detailed(num_points, sampler)?.estimate)
}

/// Like [`estimate_pi`], returning the hit count and error as well.
pub fn estimate_pi_detailed<S: RandomSampler>(num_points: u64, mut sampler: S) -> SimResult<PiEstimate> {
    check_points(num_points)?;
    let inside = count_inside(num_points, &mut sampler);
    Ok(PiEstimate::from_counts(num_points, inside))
}

/// Estimates π using Rayon, splitting the draws into [`PARALLEL_CHUNK`]-sized
/// work items with independent generator streams.
///
/// The result depends on `(num_points, base_seed)` only, not on the number
/// of worker threads.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] if `num_points` is zero.
pub fn estimate_pi_parallel(num_points: u64, base_seed: u64) -> SimResult<PiEstimate> {
    check_points(num_points)?;

    let chunks = num_points.div_ceil(PARALLEL_CHUNK);
    let inside: u64 = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * PARALLEL_CHUNK;
            let len = PARALLEL_CHUNK.min(num_points - start);
            let mut rng = SimRng::for_stream(base_seed, chunk);
            count_inside(len, &mut rng)
        })
        .sum();

    Ok(PiEstimate::from_counts(num_points, inside))
}

/// Evaluates every size in `sizes`, in order.
///
/// All sizes are validated before any sampling. In sequential mode the
/// sizes share `sampler`; in parallel mode the sampler is unused and size
/// `i` derives its streams from `base_seed + i`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] if `sizes` is empty or contains a
/// zero.
pub fn run_convergence<S: RandomSampler>(
    sizes: &[u64],
    sampling: Sampling,
    mut sampler: S,
) -> SimResult<Vec<PiEstimate>> {
    if sizes.is_empty() {
        return Err(SimError::invalid("sample_sizes", "at least one sample size is required"));
    }
    for &size in sizes {
        check_points(size)?;
    }

    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| match sampling {
            Sampling::Sequential => estimate_pi_detailed(size, &mut sampler),
            Sampling::Parallel { base_seed } => {
                estimate_pi_parallel(size, base_seed.wrapping_add(i as u64))
            }
        })
        .collect()
}

#[inline]
fn check_points(num_points: u64) -> SimResult<()> {
    if num_points == 0 {
        return Err(SimError::invalid("num_points", "must be positive, got 0"));
    }
    Ok(())
}

#[inline]
fn count_inside<S: RandomSampler>(num_points: u64, sampler: &mut S) -> u64 {
    let mut inside = 0u64;
    for _ in 0..num_points {
        let x = sampler.uniform();
        let y = sampler.uniform();
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }
    inside
}
