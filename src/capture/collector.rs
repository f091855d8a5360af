//! Sliding-window accumulation of pointer samples.
//!
//! Pointer events arrive at whatever rate the user moves the mouse, so the
//! collector keeps a fixed-size window of the most recent positions and
//! exposes the sample count for the caller to gate draws on.

use super::config::CaptureConfig;
use super::sample::{CaptureRegion, PointerSample};
use std::collections::VecDeque;

/// Bounded, time-ordered pool of pointer samples.
pub struct EntropyCollector {
    /// Retained samples, oldest at the front.
    samples: VecDeque<PointerSample>,
    /// Maximum number of retained samples.
    retention: usize,
    /// Region used to localize client coordinates.
    region: CaptureRegion,
    /// Whether new samples are accepted.
    enabled: bool,
    /// Samples accepted over the collector's lifetime (for metrics).
    total_recorded: u64,
}

impl EntropyCollector {
    /// Creates a collector from capture settings. Capture starts enabled.
    pub fn new(config: &CaptureConfig) -> Self {
        let retention = config.retention.max(1);
        Self {
            samples: VecDeque::with_capacity(retention),
            retention,
            region: config.region,
            enabled: true,
            total_recorded: 0,
        }
    }

    /// Appends a region-local sample, evicting the oldest past the window.
    ///
    /// Returns false without recording if capture is disabled or either
    /// coordinate is NaN or infinite.
    pub fn record_sample(&mut self, x: f64, y: f64) -> bool {
        if !self.enabled {
            return false;
        }
        if !x.is_finite() || !y.is_finite() {
            tracing::debug!(x, y, "Dropped non-finite pointer sample");
            return false;
        }

        if self.samples.len() == self.retention {
            self.samples.pop_front();
        }
        self.samples.push_back(PointerSample::new(x, y));
        self.total_recorded += 1;

        tracing::trace!(x, y, retained = self.samples.len(), "Recorded pointer sample");
        true
    }

    /// Records a position given in client coordinates.
    pub fn record_client(&mut self, client_x: f64, client_y: f64) -> bool {
        let local = self.region.localize(client_x, client_y);
        self.record_sample(local.x, local.y)
    }

    /// Returns a snapshot of the retained samples in arrival order.
    pub fn current_samples(&self) -> Vec<PointerSample> {
        self.samples.iter().copied().collect()
    }

    /// Drops every retained sample.
    pub fn reset(&mut self) {
        self.samples.clear();
        tracing::debug!("Entropy collector reset");
    }

    /// Enables or disables sample capture.
    ///
    /// Disabling clears the window, so samples gathered before a draw
    /// never leak into the next one.
    pub fn set_capture_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            tracing::debug!(enabled, "Pointer capture toggled");
        }
        if self.enabled && !enabled {
            self.samples.clear();
        }
        self.enabled = enabled;
    }

    /// Returns true if samples are currently accepted.
    pub fn is_capture_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Retention bound of the sliding window.
    pub fn capacity(&self) -> usize {
        self.retention
    }

    /// Returns true once at least `min_samples` are retained.
    pub fn is_ready(&self, min_samples: usize) -> bool {
        self.samples.len() >= min_samples
    }

    /// Samples accepted since construction, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Region used for client-coordinate localization.
    pub fn region(&self) -> &CaptureRegion {
        &self.region
    }
}

impl Default for EntropyCollector {
    fn default() -> Self {
        Self::new(&CaptureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_collector(retention: usize) -> EntropyCollector {
        EntropyCollector::new(&CaptureConfig {
            retention,
            ..Default::default()
        })
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut collector = small_collector(3);

        for i in 0..5 {
            collector.record_sample(i as f64, 0.0);
        }

        let xs: Vec<f64> = collector.current_samples().iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(collector.total_recorded(), 5);
    }

    #[test]
    fn test_default_retention_is_200() {
        let mut collector = EntropyCollector::default();
        for i in 0..250 {
            collector.record_sample(i as f64, 1.0);
        }
        assert_eq!(collector.len(), 200);
        assert_eq!(collector.current_samples()[0].x, 50.0);
    }

    #[test]
    fn test_disabled_capture_ignores_samples() {
        let mut collector = EntropyCollector::default();
        collector.set_capture_enabled(false);

        assert!(!collector.record_sample(1.0, 1.0));
        assert!(collector.is_empty());

        collector.set_capture_enabled(true);
        assert!(collector.record_sample(1.0, 1.0));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_disabling_capture_clears_window() {
        let mut collector = EntropyCollector::default();
        for i in 0..10 {
            collector.record_sample(i as f64, 1.0);
        }

        collector.set_capture_enabled(false);
        assert!(collector.is_empty());
        assert_eq!(collector.total_recorded(), 10);

        // Re-enabling does not bring anything back
        collector.set_capture_enabled(true);
        assert!(collector.current_samples().is_empty());
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let mut collector = EntropyCollector::default();

        assert!(!collector.record_sample(f64::NAN, 1.0));
        assert!(!collector.record_sample(1.0, f64::INFINITY));
        assert!(!collector.record_sample(f64::NEG_INFINITY, f64::NAN));
        assert!(collector.is_empty());
        assert_eq!(collector.total_recorded(), 0);

        assert!(collector.record_sample(1.0, 2.0));
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut collector = EntropyCollector::default();
        collector.record_sample(3.0, 4.0);

        collector.reset();
        assert!(collector.current_samples().is_empty());
        collector.reset();
        assert!(collector.current_samples().is_empty());
    }

    #[test]
    fn test_record_client_localizes() {
        let mut collector = EntropyCollector::new(&CaptureConfig {
            region: CaptureRegion {
                left: 10.0,
                top: 20.0,
                width: 100.0,
                height: 100.0,
            },
            ..Default::default()
        });

        collector.record_client(15.0, 27.0);
        assert_eq!(collector.current_samples(), vec![PointerSample::new(5.0, 7.0)]);
    }

    #[test]
    fn test_ready_threshold() {
        let mut collector = EntropyCollector::default();
        for _ in 0..99 {
            collector.record_sample(1.0, 1.0);
        }
        assert!(!collector.is_ready(100));
        collector.record_sample(1.0, 1.0);
        assert!(collector.is_ready(100));
    }
}
