//! Prometheus metrics for a roulette session.
//!
//! # Metrics Exposed
//!
//! - `roulette_draws_total` - Successful draws
//! - `roulette_rejections_total{reason}` - Rejected draw requests
//! - `roulette_presentation_timeouts_total` - Presentations ended by timeout
//! - `roulette_drawing` - 1 while a draw is presenting
//! - `roulette_last_winner` - Most recent winning number
//! - `roulette_samples_current` - Pointer samples currently retained
//! - `roulette_samples_recorded_total` - Pointer samples accepted
//!
//! With the `metrics` feature, [`MetricsServer`] serves them over HTTP.

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, MetricsState, ServerError};
