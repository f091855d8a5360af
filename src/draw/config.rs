//! Draw and presentation settings.

use super::prf::PrfKind;
use crate::capture::HashAlgorithm;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Settings for winner selection and the presentation that follows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Seed scrambling transform.
    pub prf: PrfKind,
    /// Hash used for sample digests in draw records.
    pub digest: HashAlgorithm,
    /// How long a presentation may run before the session gives up
    /// waiting for its completion signal.
    pub presentation_timeout_ms: u64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            prf: PrfKind::Sine,
            digest: HashAlgorithm::Blake3,
            presentation_timeout_ms: 15_000, // reel animation runs ~10s
        }
    }
}

impl DrawConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.presentation_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(DrawConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_invalid() {
        let config = DrawConfig {
            presentation_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
    }
}
