//! Configuration file format.
//!
//! Every section has a usable default, so an empty file (or no file at
//! all) yields the classroom defaults: numbers 1 to 100 with 7 excluded.

use crate::capture::CaptureConfig;
use crate::draw::{DrawConfig, RangeConfig};
use crate::reel::ReelConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("sample retention must be at least 1")]
    InvalidRetention,
    #[error("min_samples ({min_samples}) must be between 1 and the retention bound ({retention})")]
    InvalidMinSamples { min_samples: usize, retention: usize },
    #[error("capture region must have a positive, finite area")]
    InvalidRegion,
    #[error("reel must have at least one slot")]
    InvalidSlotCount,
    #[error("winning window {min}..={max} does not fit a reel of {total} slots")]
    InvalidWinningWindow { min: usize, max: usize, total: usize },
    #[error("presentation timeout must be positive")]
    InvalidTimeout,
    #[error("samples_per_draw must be at least 1")]
    InvalidSamplesPerDraw,
    #[error("invalid default range: {0}")]
    InvalidRange(String),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub reel: ReelConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the command-line driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of draws to run if not continuous.
    pub draws: u32,
    /// Synthetic pointer moves fed in before each draw.
    pub samples_per_draw: usize,
    /// Keep drawing until interrupted.
    pub continuous: bool,
    /// Metrics server port (0 to disable).
    pub metrics_port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            draws: 5,
            samples_per_draw: 150,
            continuous: false,
            metrics_port: 9090,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// The default range is checked too, so a broken file fails at startup
    /// rather than on the first draw.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capture.validate()?;
        self.reel.validate()?;
        self.draw.validate()?;
        if self.output.samples_per_draw == 0 {
            return Err(ConfigError::InvalidSamplesPerDraw);
        }
        self.range
            .candidates()
            .map_err(|e| ConfigError::InvalidRange(e.to_string()))?;
        Ok(())
    }
}
