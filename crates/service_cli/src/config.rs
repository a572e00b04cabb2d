//! Pipeline configuration management
//!
//! Handles loading configuration from TOML files, environment variables, and CLI arguments.

use composite_core::{InterpolationMethod, ValidRange};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::export::Rounding;

/// Environment variable prefix shared by every override.
pub const ENV_PREFIX: &str = "RADAR_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid valid range: fmin ({fmin}) must not exceed fmax ({fmax})")]
    InvalidRange { fmin: f64, fmax: f64 },

    #[error("At least one fill method is required")]
    NoFillMethods,

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
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

/// Pipeline configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Lowest valid measurement (inclusive)
    pub fmin: f64,
    /// Highest valid measurement (inclusive)
    pub fmax: f64,
    /// Apply the 2x2 minimum filter after compositing
    pub smooth: bool,
    /// Draw cells equal to the scale minimum in rendered images
    pub plot_zero: bool,
    /// GapFiller passes, applied in order
    pub fill_methods: Vec<InterpolationMethod>,
    /// Integer conversion at export
    #[serde(deserialize_with = "deserialize_rounding")]
    pub rounding: Rounding,
    /// Directory receiving every artifact
    pub output_dir: PathBuf,
    /// Whether to write PGM snapshots
    pub render: bool,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_rounding<'de, D>(deserializer: D) -> Result<Rounding, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Rounding::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fmin: ValidRange::DEFAULT_FMIN,
            fmax: ValidRange::DEFAULT_FMAX,
            smooth: true,
            plot_zero: true,
            fill_methods: vec![InterpolationMethod::Linear, InterpolationMethod::Nearest],
            rounding: Rounding::Truncate,
            output_dir: PathBuf::from("."),
            render: true,
            log_level: LogLevel::Info,
        }
    }
}

/// Parse a boolean environment value.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvError(format!(
            "{}: '{}' is not a boolean",
            key, value
        ))),
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}: '{}' is not a number", key, value)))
}

impl PipelineConfig {
    /// Create a new PipelineConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: PipelineConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from `RADAR_*` variables supplied by `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, value)) = var("FMIN") {
            self.fmin = parse_number(&key, &value)?;
        }
        if let Some((key, value)) = var("FMAX") {
            self.fmax = parse_number(&key, &value)?;
        }
        if let Some((key, value)) = var("SMOOTH") {
            self.smooth = parse_bool(&key, &value)?;
        }
        if let Some((key, value)) = var("PLOT_ZERO") {
            self.plot_zero = parse_bool(&key, &value)?;
        }
        if let Some((_, value)) = var("LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }
        if let Some((_, value)) = var("OUTPUT_DIR") {
            self.output_dir = PathBuf::from(value);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if ValidRange::new(self.fmin, self.fmax).is_err() {
            return Err(ConfigError::InvalidRange {
                fmin: self.fmin,
                fmax: self.fmax,
            });
        }
        if self.fill_methods.is_empty() {
            return Err(ConfigError::NoFillMethods);
        }
        Ok(())
    }

    /// The configured valid range
    pub fn valid_range(&self) -> Result<ValidRange, ConfigError> {
        ValidRange::new(self.fmin, self.fmax).map_err(|_| ConfigError::InvalidRange {
            fmin: self.fmin,
            fmax: self.fmax,
        })
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(fmin) = cli.fmin {
            self.fmin = fmin;
        }
        if let Some(fmax) = cli.fmax {
            self.fmax = fmax;
        }
        if cli.no_smooth {
            self.smooth = false;
        }
        if cli.no_plot_zero {
            self.plot_zero = false;
        }
        if cli.no_render {
            self.render = false;
        }
        if let Some(methods) = &cli.fill_methods {
            self.fill_methods = methods.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            self.output_dir = output_dir.clone();
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Lower bound override
    pub fmin: Option<f64>,
    /// Upper bound override
    pub fmax: Option<f64>,
    /// Disable compositing smoothing
    pub no_smooth: bool,
    /// Mask the scale minimum in rendered images
    pub no_plot_zero: bool,
    /// Skip PGM snapshots
    pub no_render: bool,
    /// Fill pass override
    pub fill_methods: Option<Vec<InterpolationMethod>>,
    /// Output directory override
    pub output_dir: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<PipelineConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults or file config
    let mut config = if let Some(config_path) = &cli.config_file {
        PipelineConfig::from_file(config_path)?
    } else {
        PipelineConfig::default()
    };

    // Override with environment variables
    config.apply_env_from(lookup)?;

    // Override with CLI arguments
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
