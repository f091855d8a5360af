//! Pointer capture configuration.

use super::sample::CaptureRegion;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for pointer-motion capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Number of most recent samples kept in the sliding window.
    pub retention: usize,
    /// Samples required before a draw is permitted.
    pub min_samples: usize,
    /// Capture surface bounds in client coordinates.
    pub region: CaptureRegion,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            retention: 200,
            min_samples: 100,
            region: CaptureRegion::default(),
        }
    }
}

impl CaptureConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention == 0 {
            return Err(ConfigError::InvalidRetention);
        }
        // A threshold the window can never reach would block every draw.
        if self.min_samples == 0 || self.min_samples > self.retention {
            return Err(ConfigError::InvalidMinSamples {
                min_samples: self.min_samples,
                retention: self.retention,
            });
        }
        if !self.region.is_valid() {
            return Err(ConfigError::InvalidRegion);
        }
        Ok(())
    }
}
