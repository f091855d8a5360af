//! Metrics collection and registry.

use crate::session::{DrawSession, RecordSink, SessionStats};
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Rejection reasons exported as label values.
const REJECTION_REASONS: [&str; 5] = [
    "invalid_range",
    "empty_candidates",
    "insufficient_entropy",
    "degenerate_seed",
    "in_progress",
];

/// A snapshot of session state for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Lifetime session counters.
    pub stats: SessionStats,
    /// Whether a draw is presenting.
    pub is_drawing: bool,
    /// Samples currently retained by the collector.
    pub samples_current: usize,
    /// Samples accepted over the collector's lifetime.
    pub samples_recorded: u64,
}

impl MetricsSnapshot {
    /// Captures the current state of a session.
    pub fn from_session<S: RecordSink>(session: &DrawSession<S>) -> Self {
        Self {
            stats: session.stats().clone(),
            is_drawing: session.is_drawing(),
            samples_current: session.collector().len(),
            samples_recorded: session.collector().total_recorded(),
        }
    }

    fn rejections(&self, reason: &str) -> u64 {
        match reason {
            "invalid_range" => self.stats.rejected_invalid_range,
            "empty_candidates" => self.stats.rejected_empty_candidates,
            "insufficient_entropy" => self.stats.rejected_insufficient_entropy,
            "degenerate_seed" => self.stats.rejected_degenerate_seed,
            "in_progress" => self.stats.rejected_in_progress,
            _ => 0,
        }
    }
}

/// Prometheus metrics registry for a roulette session.
pub struct MetricsRegistry {
    registry: Registry,

    draws_total: IntCounter,
    rejections_total: IntCounterVec,
    presentation_timeouts_total: IntCounter,
    drawing: IntGauge,
    last_winner: IntGauge,

    samples_current: IntGauge,
    samples_recorded_total: IntCounter,
}

impl MetricsRegistry {
    /// Creates a new registry with all session metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let draws_total = IntCounter::new("roulette_draws_total", "Successful draws")?;
        let rejections_total = IntCounterVec::new(
            Opts::new("roulette_rejections_total", "Rejected draw requests by reason"),
            &["reason"],
        )?;
        let presentation_timeouts_total = IntCounter::new(
            "roulette_presentation_timeouts_total",
            "Presentations ended by timeout instead of a completion signal",
        )?;
        let drawing = IntGauge::new(
            "roulette_drawing",
            "Whether a draw is being presented (1=presenting, 0=idle)",
        )?;
        let last_winner = IntGauge::new("roulette_last_winner", "Most recent winning number")?;
        let samples_current = IntGauge::new(
            "roulette_samples_current",
            "Pointer samples currently retained",
        )?;
        let samples_recorded_total = IntCounter::new(
            "roulette_samples_recorded_total",
            "Pointer samples accepted since startup",
        )?;

        registry.register(Box::new(draws_total.clone()))?;
        registry.register(Box::new(rejections_total.clone()))?;
        registry.register(Box::new(presentation_timeouts_total.clone()))?;
        registry.register(Box::new(drawing.clone()))?;
        registry.register(Box::new(last_winner.clone()))?;
        registry.register(Box::new(samples_current.clone()))?;
        registry.register(Box::new(samples_recorded_total.clone()))?;

        // Touch every label so all reasons appear before the first rejection.
        for reason in REJECTION_REASONS {
            rejections_total.with_label_values(&[reason]);
        }

        Ok(Self {
            registry,
            draws_total,
            rejections_total,
            presentation_timeouts_total,
            drawing,
            last_winner,
            samples_current,
            samples_recorded_total,
        })
    }

    /// Updates all metrics from a snapshot.
    ///
    /// Counters only move forward, by the difference to the snapshot.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        advance(&self.draws_total, snapshot.stats.draws);
        advance(
            &self.presentation_timeouts_total,
            snapshot.stats.presentation_timeouts,
        );
        advance(&self.samples_recorded_total, snapshot.samples_recorded);

        for reason in REJECTION_REASONS {
            advance(
                &self.rejections_total.with_label_values(&[reason]),
                snapshot.rejections(reason),
            );
        }

        self.drawing.set(i64::from(snapshot.is_drawing));
        self.samples_current.set(snapshot.samples_current as i64);
        if let Some(winner) = snapshot.stats.last_winner {
            self.last_winner.set(winner);
        }
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn advance(counter: &IntCounter, target: u64) {
    let current = counter.get();
    if target > current {
        counter.inc_by(target - current);
    }
}
