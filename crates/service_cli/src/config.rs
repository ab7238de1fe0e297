//! Run configuration management
//!
//! Handles loading configuration from a TOML file and CLI arguments.
//! Every field has a default, so a missing file or a partial file yields
//! the reference configuration.

use serde::Deserialize;
use sim_engine::{SimResult, SimulationParameters, DEFAULT_SAMPLE_SIZES};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default destination of the simulated paths.
pub const DEFAULT_OUTPUT: &str = "stockPrices.csv";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// π pipeline settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PiConfig {
    /// Point counts, evaluated in order
    pub sample_sizes: Vec<u64>,
}

impl Default for PiConfig {
    fn default() -> Self {
        Self {
            sample_sizes: DEFAULT_SAMPLE_SIZES.to_vec(),
        }
    }
}

/// GBM pipeline settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GbmConfig {
    pub initial_price: f64,
    pub drift: f64,
    pub volatility: f64,
    pub horizon_years: f64,
    pub step_count: usize,
    pub path_count: usize,
    /// Destination of the path file
    pub output: PathBuf,
}

impl Default for GbmConfig {
    fn default() -> Self {
        let params = SimulationParameters::default();
        Self {
            initial_price: params.initial_price(),
            drift: params.drift(),
            volatility: params.volatility(),
            horizon_years: params.horizon_years(),
            step_count: params.step_count(),
            path_count: params.path_count(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl GbmConfig {
    /// Validate into simulation parameters.
    ///
    /// Deferred to the GBM pipeline so a bad value aborts that pipeline only.
    pub fn to_params(&self) -> SimResult<SimulationParameters> {
        SimulationParameters::builder()
            .initial_price(self.initial_price)
            .drift(self.drift)
            .volatility(self.volatility)
            .horizon_years(self.horizon_years)
            .step_count(self.step_count)
            .path_count(self.path_count)
            .build()
    }
}

/// Run configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Fixed seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Use Rayon-parallel sampling
    pub parallel: bool,
    pub pi: PiConfig,
    pub gbm: GbmConfig,
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if cli.parallel {
            self.parallel = true;
        }
        if let Some(sizes) = &cli.sample_sizes {
            self.pi.sample_sizes = sizes.clone();
        }
        if let Some(output) = &cli.output {
            self.gbm.output = output.clone();
        }
        if let Some(path_count) = cli.path_count {
            self.gbm.path_count = path_count;
        }
        if let Some(step_count) = cli.step_count {
            self.gbm.step_count = step_count;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Seed override
    pub seed: Option<u64>,
    /// Enable parallel sampling
    pub parallel: bool,
    /// π sample sizes override
    pub sample_sizes: Option<Vec<u64>>,
    /// Path file override
    pub output: Option<PathBuf>,
    /// GBM path count override
    pub path_count: Option<usize>,
    /// GBM step count override
    pub step_count: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Config file
/// 3. Default values
pub fn build_config(cli: &CliArgs) -> Result<SimConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };

    config.merge_with_cli(cli)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
        assert_eq!(
            config.pi.sample_sizes,
            vec![1_000, 10_000, 100_000, 1_000_000, 10_000_000]
        );
        assert_eq!(config.gbm.output, PathBuf::from("stockPrices.csv"));
        assert_eq!(config.gbm.to_params().unwrap(), SimulationParameters::default());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
        assert_eq!(LogLevel::Error.as_filter_str(), "error");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            seed = 42
            parallel = true

            [pi]
            sample_sizes = [10, 100]

            [gbm]
            initial_price = 50.0
            drift = 0.01
            volatility = 0.3
            horizon_years = 2.0
            step_count = 24
            path_count = 10
            output = "out/paths.csv"
        "#;

        let config = SimConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.seed, Some(42));
        assert!(config.parallel);
        assert_eq!(config.pi.sample_sizes, vec![10, 100]);

        let params = config.gbm.to_params().unwrap();
        assert_eq!(params.initial_price(), 50.0);
        assert_eq!(params.step_count(), 24);
        assert_eq!(params.path_count(), 10);
        assert_eq!(config.gbm.output, PathBuf::from("out/paths.csv"));
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            [gbm]
            path_count = 5
        "#;

        let config = SimConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.gbm.path_count, 5);
        assert_eq!(config.gbm.step_count, 252);
        assert_eq!(config.gbm.initial_price, 100.0);
        assert_eq!(config.pi, PiConfig::default());
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_log_level_in_toml() {
        let result = SimConfig::from_toml_str(r#"log_level = "loud""#);
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_invalid_gbm_values_deferred_to_pipeline() {
        let config = SimConfig::from_toml_str("[gbm]\nstep_count = 0\n").unwrap();
        assert!(config.gbm.to_params().is_err());
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = SimConfig::default();
        let cli = CliArgs {
            log_level: Some("warn".to_string()),
            seed: Some(7),
            parallel: true,
            sample_sizes: Some(vec![1_000]),
            output: Some(PathBuf::from("elsewhere.csv")),
            path_count: Some(20),
            step_count: Some(12),
            config_file: None,
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.seed, Some(7));
        assert!(config.parallel);
        assert_eq!(config.pi.sample_sizes, vec![1_000]);
        assert_eq!(config.gbm.output, PathBuf::from("elsewhere.csv"));
        assert_eq!(config.gbm.path_count, 20);
        assert_eq!(config.gbm.step_count, 12);
    }

    #[test]
    fn test_cli_invalid_log_level() {
        let mut config = SimConfig::default();
        let cli = CliArgs {
            log_level: Some("verbose".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.merge_with_cli(&cli),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_build_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcsim.toml");
        std::fs::write(&path, "seed = 3\n[pi]\nsample_sizes = [500]\n").unwrap();

        let cli = CliArgs {
            config_file: Some(path),
            seed: Some(9),
            ..Default::default()
        };
        let config = build_config(&cli).unwrap();

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.pi.sample_sizes, vec![500]);
    }

    #[test]
    fn test_build_config_missing_file() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/mcsim.toml")),
            ..Default::default()
        };
        assert!(matches!(build_config(&cli), Err(ConfigError::FileError(_))));
    }
}
