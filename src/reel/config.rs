//! Reel geometry.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Size of the reel and the window the winner may land in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Total slots on the reel.
    pub total_slots: usize,
    /// Lowest slot the winner may occupy.
    pub winning_index_min: usize,
    /// Highest slot the winner may occupy, inclusive.
    pub winning_index_max: usize,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            total_slots: 100,
            winning_index_min: 80,
            winning_index_max: 90,
        }
    }
}

impl ReelConfig {
    /// Slots the winner may be placed in.
    pub fn winning_window(&self) -> RangeInclusive<usize> {
        self.winning_index_min..=self.winning_index_max
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_slots == 0 {
            return Err(ConfigError::InvalidSlotCount);
        }
        if self.winning_index_min > self.winning_index_max
            || self.winning_index_max >= self.total_slots
        {
            return Err(ConfigError::InvalidWinningWindow {
                min: self.winning_index_min,
                max: self.winning_index_max,
                total: self.total_slots,
            });
        }
        Ok(())
    }
}
