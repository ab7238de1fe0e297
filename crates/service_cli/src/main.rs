//! mcsim - Monte Carlo simulation CLI
//!
//! Runs two independent pipelines:
//!
//! - `mcsim pi` - Estimate π over increasing sample sizes
//! - `mcsim gbm` - Simulate GBM price paths, report statistics, save paths
//! - `mcsim` / `mcsim all` - Run both, π first
//!
//! A failure in one pipeline is logged and does not prevent the other from
//! running. Failing to save the path file is logged and otherwise ignored.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sim_engine::{SimError, SimRng};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{build_config, CliArgs, LogLevel};
pub use error::{CliError, Result};

/// Generator stream reserved for each pipeline.
const PI_STREAM: u64 = 0;
const GBM_STREAM: u64 = 1;

/// Monte Carlo π estimation and GBM path simulation
#[derive(Parser)]
#[command(name = "mcsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Fixed seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Sample with Rayon worker threads
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate π by random point sampling
    Pi {
        /// Sample sizes, evaluated in order
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<u64>>,
    },

    /// Simulate geometric Brownian motion price paths
    Gbm {
        /// Output file for the simulated paths
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of paths
        #[arg(long)]
        paths: Option<usize>,

        /// Number of time steps per path
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Run both pipelines
    All,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            seed: self.seed,
            parallel: self.parallel,
            ..Default::default()
        };
        match &self.command {
            Some(Commands::Pi { sizes }) => args.sample_sizes = sizes.clone(),
            Some(Commands::Gbm {
                output,
                paths,
                steps,
            }) => {
                args.output = output.clone();
                args.path_count = *paths;
                args.step_count = *steps;
            }
            Some(Commands::All) | None => {}
        }
        args
    }

    fn runs_pi(&self) -> bool {
        !matches!(self.command, Some(Commands::Gbm { .. }))
    }

    fn runs_gbm(&self) -> bool {
        !matches!(self.command, Some(Commands::Pi { .. }))
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn startup_level(cli: &Cli, configured: LogLevel) -> &'static str {
    if cli.verbose {
        "debug"
    } else {
        configured.as_filter_str()
    }
}

fn report_failure(pipeline: &str, err: &CliError) {
    match err {
        CliError::Simulation(SimError::NumericAnomaly { path, step, value }) => {
            error!(pipeline, path, step, value, "Numeric anomaly in generated prices");
        }
        other => error!(pipeline, error = %other, "Pipeline aborted"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match build_config(&cli.config_args()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing(startup_level(&cli, LogLevel::default()));
            error!(error = %err, "Invalid configuration");
            return Err(err.into());
        }
    };

    init_tracing(startup_level(&cli, config.log_level));

    let seed = match config.seed {
        Some(seed) => seed,
        None => sim_engine::rng::entropy_seed()?,
    };
    info!(seed, parallel = config.parallel, "Generator seeded");

    let mut failures = 0usize;

    if cli.runs_pi() {
        let mut rng = SimRng::for_stream(seed, PI_STREAM);
        if let Err(err) = commands::pi::run(&config.pi, config.parallel, &mut rng) {
            report_failure("pi", &err);
            failures += 1;
        }
        if cli.runs_gbm() {
            println!();
        }
    }

    if cli.runs_gbm() {
        let mut rng = SimRng::for_stream(seed, GBM_STREAM);
        if let Err(err) = commands::gbm::run(&config.gbm, config.parallel, &mut rng) {
            report_failure("gbm", &err);
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(CliError::PipelineFailed(failures));
    }
    Ok(())
}
