//! π estimation command
//!
//! Evaluates every configured sample size in order and prints one line per
//! size: the sample count, the estimate and its absolute error against π.

use std::time::Instant;

use sim_engine::pi::{self, PiEstimate, Sampling};
use sim_engine::SimRng;
use tracing::{debug, info};

use crate::config::PiConfig;
use crate::Result;

/// Run the π pipeline
pub fn run(config: &PiConfig, parallel: bool, rng: &mut SimRng) -> Result<Vec<PiEstimate>> {
    info!(
        sizes = ?config.sample_sizes,
        parallel,
        "Starting pi estimation"
    );

    let sampling = if parallel {
        Sampling::Parallel {
            base_seed: rng.seed(),
        }
    } else {
        Sampling::Sequential
    };

    let start = Instant::now();
    let estimates = pi::run_convergence(&config.sample_sizes, sampling, &mut *rng)?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Sampling finished");

    println!("Monte Carlo Pi Estimation");
    println!("----------------");
    for estimate in &estimates {
        println!("{}", format_estimate(estimate));
    }

    info!("Pi estimation complete");
    Ok(estimates)
}

/// Format one report line
pub fn format_estimate(estimate: &PiEstimate) -> String {
    format!(
        "Samples: {:>10} | Pi Estimate: {:.10} | Error: {:.10}",
        estimate.samples, estimate.estimate, estimate.abs_error
    )
}
