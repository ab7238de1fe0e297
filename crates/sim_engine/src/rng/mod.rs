//! # Random Number Generation
//!
//! Random draws for both Monte Carlo pipelines.
//!
//! - **Explicit ownership**: every pipeline run owns its generator; there is
//!   no global generator state.
//! - **Reproducibility**: generators can be seeded explicitly; entropy-seeded
//!   generators record the seed they drew so a run can be replayed.
//! - **Independent streams**: parallel workers derive their own generator via
//!   [`SimRng::for_stream`] instead of sharing one.
//!
//! ## Module Structure
//!
//! - [`prng`]: [`SimRng`], the `StdRng`-backed generator
//! - [`RandomSampler`]: the sampling seam used by the kernels
//!
//! ## Usage Example
//!
//! ```rust
//! use sim_engine::rng::{RandomSampler, SimRng};
//!
//! let mut rng = SimRng::from_seed(12345);
//!
//! let u = rng.uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let _z = rng.normal();
//! ```

mod prng;

pub use prng::{entropy_seed, SimRng};

/// Source of uniform and standard-normal draws.
///
/// The kernels are generic over this trait (static dispatch) so tests can
/// drive them with scripted samplers.
pub trait RandomSampler {
    /// Draws a uniform value in [0, 1).
    fn uniform(&mut self) -> f64;

    /// Draws a standard normal value (mean 0, standard deviation 1).
    fn normal(&mut self) -> f64;
}

impl RandomSampler for SimRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.gen_uniform()
    }

    #[inline]
    fn normal(&mut self) -> f64 {
        self.gen_normal()
    }
}

impl<S: RandomSampler + ?Sized> RandomSampler for &mut S {
    #[inline]
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    #[inline]
    fn normal(&mut self) -> f64 {
        (**self).normal()
    }
}
