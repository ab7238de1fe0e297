//! GBM simulation command
//!
//! Simulates price paths, prints summary statistics of the terminal prices
//! and saves the paths. A failed save is logged and does not fail the
//! command.

use sim_engine::{gbm, stats, PathWriter, SimRng, SimulationParameters, Statistics};
use tracing::{debug, error, info};

use crate::config::GbmConfig;
use crate::Result;

/// Run the GBM pipeline
pub fn run(config: &GbmConfig, parallel: bool, rng: &mut SimRng) -> Result<Statistics> {
    let params = config.to_params()?;

    info!(
        paths = params.path_count(),
        steps = params.step_count(),
        parallel,
        "Starting GBM simulation"
    );

    let paths = if parallel {
        gbm::simulate_parallel(&params, rng.seed())?
    } else {
        gbm::simulate(&params, &mut *rng)?
    };
    debug!(bytes = paths.memory_usage(), "Path matrix allocated");
    let summary = stats::summarize(&paths, &params)?;

    println!("Stock price simulation using geometric brownian motion");
    println!("---------------------");
    for line in format_statistics(&params, &summary) {
        println!("{}", line);
    }

    let writer = PathWriter::new(&config.output);
    match writer.write(&paths) {
        Ok(()) => {
            println!("Simulation results saved to {}", writer.path().display());
        }
        Err(err) if err.is_recoverable() => {
            error!(error = %err, "Could not save simulation paths");
        }
        Err(err) => return Err(err.into()),
    }

    info!(
        mean = summary.mean,
        theoretical_mean = summary.theoretical_mean,
        std_error = summary.std_error(),
        "GBM simulation complete"
    );
    Ok(summary)
}

/// Format the statistics block
pub fn format_statistics(params: &SimulationParameters, summary: &Statistics) -> Vec<String> {
    vec![
        "Simulation Statistics:".to_string(),
        "---------------------".to_string(),
        format!("Number of paths: {}", params.path_count()),
        format!("Initial price: ${}", params.initial_price()),
        format!("Time period: {} years", params.horizon_years()),
        format!("Mean final price: ${:.2}", summary.mean),
        format!("Standard deviation: ${:.2}", summary.std_dev),
        format!("Min final price: ${:.2}", summary.min),
        format!("Max final price: ${:.2}", summary.max),
        format!("Theoretical expected price: ${:.2}", summary.theoretical_mean),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use sim_engine::SimError;

    fn small_config(output: std::path::PathBuf) -> GbmConfig {
        GbmConfig {
            step_count: 10,
            path_count: 20,
            output,
            ..Default::default()
        }
    }

    #[test]
    fn test_format_statistics() {
        let params = SimulationParameters::default();
        let summary = Statistics {
            n_paths: 1000,
            mean: 105.456,
            variance: 450.0,
            std_dev: 21.2132,
            min: 55.004,
            max: 198.996,
            theoretical_mean: params.theoretical_mean(),
        };

        let lines = format_statistics(&params, &summary);
        assert_eq!(
            lines[2..],
            [
                "Number of paths: 1000",
                "Initial price: $100",
                "Time period: 1 years",
                "Mean final price: $105.46",
                "Standard deviation: $21.21",
                "Min final price: $55.00",
                "Max final price: $199.00",
                "Theoretical expected price: $105.13",
            ]
        );
    }

    #[test]
    fn test_run_writes_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path().join("paths.csv"));
        let mut rng = SimRng::from_seed(5);

        let summary = run(&config, false, &mut rng).unwrap();
        assert_eq!(summary.n_paths, 20);

        let parsed = PathWriter::new(&config.output).read().unwrap();
        assert_eq!(parsed.n_paths(), 20);
        assert_eq!(parsed.n_steps(), 10);
    }

    #[test]
    fn test_unwritable_output_does_not_fail() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config(dir.path().join("missing").join("paths.csv"));
        let mut rng = SimRng::from_seed(5);

        assert!(run(&config, true, &mut rng).is_ok());
    }

    #[test]
    fn test_invalid_parameters_abort() {
        let config = GbmConfig {
            path_count: 0,
            ..Default::default()
        };
        let mut rng = SimRng::from_seed(5);

        assert!(matches!(
            run(&config, false, &mut rng),
            Err(CliError::Simulation(SimError::InvalidArgument { name: "path_count", .. }))
        ));
    }

    #[test]
    fn test_degenerate_parameters_are_flat() {
        let dir = tempfile::tempdir().unwrap();
        let config = GbmConfig {
            drift: 0.0,
            volatility: 0.0,
            step_count: 10,
            path_count: 5,
            output: dir.path().join("flat.csv"),
            ..Default::default()
        };
        let mut rng = SimRng::from_seed(5);

        let summary = run(&config, false, &mut rng).unwrap();
        assert_eq!(summary.mean, 100.0);
        assert_eq!(summary.std_dev, 0.0);
        approx::assert_relative_eq!(summary.theoretical_mean, 100.0);
    }
}
