//! The stateful shell around the pure draw core.
//!
//! # State machine
//!
//! ```text
//!            trigger_draw (ok)
//!   Idle ───────────────────────▶ Presenting { draw_id, started_at }
//!    ▲                                   │
//!    └── complete_presentation(draw_id) ─┤
//!    └── expire_stale(now)  (timeout) ───┘
//! ```
//!
//! While presenting, pointer capture is off and further draws are
//! rejected without touching state. Completion is idempotent: duplicate or
//! stale signals are ignored, and a signal that never arrives is covered
//! by the timeout.

use super::journal::RecordSink;
use super::record::DrawRecord;
use crate::capture::{EntropyCollector, HashAlgorithm, SampleDigest};
use crate::config::{ConfigError, FileConfig};
use crate::draw::{DrawEngine, DrawError, RangeConfig};
use crate::reel::{Reel, ReelConfig};
use chrono::{DateTime, Duration, Utc};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// Whether a draw is currently being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    /// Ready for a new draw.
    Idle,
    /// A draw's animation is playing.
    Presenting {
        /// Id of the draw being shown.
        draw_id: u64,
        /// When the draw was triggered.
        started_at: DateTime<Utc>,
    },
}

/// Everything the rendering collaborator needs for one draw.
#[derive(Debug, Clone)]
pub struct DrawTicket {
    /// Id to pass back to [`DrawSession::complete_presentation`].
    pub draw_id: u64,
    /// The winning number.
    pub winner: i64,
    /// Decoy reel with the winner at `reel.winning_index()`.
    pub reel: Reel,
    /// Record emitted to the sink.
    pub record: DrawRecord,
}

/// Counters describing a session's lifetime (for metrics).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Successful draws.
    pub draws: u64,
    /// Rejected: invalid or non-numeric range.
    pub rejected_invalid_range: u64,
    /// Rejected: exclusion left nothing to draw.
    pub rejected_empty_candidates: u64,
    /// Rejected: too few samples.
    pub rejected_insufficient_entropy: u64,
    /// Rejected: zero or non-finite seed.
    pub rejected_degenerate_seed: u64,
    /// Rejected: a draw was already presenting.
    pub rejected_in_progress: u64,
    /// Presentations ended by timeout rather than completion.
    pub presentation_timeouts: u64,
    /// Most recent winner.
    pub last_winner: Option<i64>,
}

impl SessionStats {
    fn count_rejection(&mut self, err: &DrawError) {
        match err {
            DrawError::InvalidNumber { .. }
            | DrawError::InvalidRange { .. }
            | DrawError::RangeTooWide { .. } => self.rejected_invalid_range += 1,
            DrawError::EmptyCandidateSet { .. } => self.rejected_empty_candidates += 1,
            DrawError::InsufficientEntropy { .. } => self.rejected_insufficient_entropy += 1,
            DrawError::DegenerateSeed => self.rejected_degenerate_seed += 1,
            DrawError::InProgress => self.rejected_in_progress += 1,
            DrawError::Reel(_) => {}
        }
    }

    /// Total rejected draw requests.
    pub fn rejected_total(&self) -> u64 {
        self.rejected_invalid_range
            + self.rejected_empty_candidates
            + self.rejected_insufficient_entropy
            + self.rejected_degenerate_seed
            + self.rejected_in_progress
    }
}

/// One user's roulette session.
pub struct DrawSession<S: RecordSink> {
    collector: EntropyCollector,
    engine: DrawEngine,
    reel_config: ReelConfig,
    digest: HashAlgorithm,
    timeout: Duration,
    state: DrawState,
    reel: Option<Reel>,
    sink: S,
    /// Decoy randomness. Never seeded from pointer samples.
    rng: ChaCha20Rng,
    next_id: u64,
    stats: SessionStats,
}

impl<S: RecordSink> DrawSession<S> {
    /// Creates a session from validated configuration.
    pub fn new(config: &FileConfig, sink: S) -> Result<Self, ConfigError> {
        Self::with_rng(config, sink, ChaCha20Rng::from_entropy())
    }

    /// Creates a session with a caller-supplied decoy RNG.
    pub fn with_rng(config: &FileConfig, sink: S, rng: ChaCha20Rng) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            collector: EntropyCollector::new(&config.capture),
            engine: DrawEngine::new(config.capture.min_samples, config.draw.prf),
            reel_config: config.reel.clone(),
            digest: config.draw.digest,
            timeout: Duration::milliseconds(
                i64::try_from(config.draw.presentation_timeout_ms).unwrap_or(i64::MAX),
            ),
            state: DrawState::Idle,
            reel: None,
            sink,
            rng,
            next_id: 1,
            stats: SessionStats::default(),
        })
    }

    /// Feeds a region-local pointer position. Ignored while presenting.
    pub fn record_pointer(&mut self, x: f64, y: f64) -> bool {
        self.collector.record_sample(x, y)
    }

    /// Feeds a client-coordinate pointer position.
    pub fn record_client_pointer(&mut self, client_x: f64, client_y: f64) -> bool {
        self.collector.record_client(client_x, client_y)
    }

    /// Builds a placeholder reel for the idle screen.
    ///
    /// Does nothing while a draw is presenting, so the live reel is never
    /// replaced mid-animation.
    pub fn prepare_idle_reel(&mut self, range: &RangeConfig) -> Result<&Reel, DrawError> {
        if matches!(self.state, DrawState::Idle) || self.reel.is_none() {
            let candidates = range.candidates()?;
            let reel = Reel::placeholder(&candidates, &self.reel_config, &mut self.rng)?;
            self.reel = Some(reel);
        }
        self.reel.as_ref().ok_or(DrawError::InProgress)
    }

    /// Triggers a draw at the current wall-clock time.
    pub fn trigger_draw(&mut self, range: &RangeConfig) -> Result<DrawTicket, DrawError> {
        self.trigger_draw_at(range, Utc::now())
    }

    /// Triggers a draw as if at `now`.
    ///
    /// On success the samples are consumed, capture is disabled and the
    /// session enters `Presenting`. On failure nothing changes.
    pub fn trigger_draw_at(
        &mut self,
        range: &RangeConfig,
        now: DateTime<Utc>,
    ) -> Result<DrawTicket, DrawError> {
        let result = self.try_draw(range, now);
        if let Err(ref err) = result {
            self.stats.count_rejection(err);
            tracing::debug!(reason = err.reason(), error = %err, "Draw rejected");
        }
        result
    }

    fn try_draw(&mut self, range: &RangeConfig, now: DateTime<Utc>) -> Result<DrawTicket, DrawError> {
        if let DrawState::Presenting { .. } = self.state {
            return Err(DrawError::InProgress);
        }

        let samples = self.collector.current_samples();
        // Pre-epoch clocks clamp to 0, which the degenerate-seed check rejects.
        let timestamp_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let outcome = self.engine.draw(range, &samples, timestamp_ms)?;
        let reel = Reel::build(
            &outcome.candidates,
            outcome.winner,
            &self.reel_config,
            &mut self.rng,
        )?;

        let draw_id = self.next_id;
        self.next_id += 1;

        let record = DrawRecord {
            id: draw_id,
            value: outcome.winner,
            timestamp: now,
            sample_count: outcome.sample_count,
            entropy_digest: SampleDigest::compute(&samples, self.digest).to_hex(),
        };

        self.collector.reset();
        self.collector.set_capture_enabled(false);
        self.state = DrawState::Presenting {
            draw_id,
            started_at: now,
        };
        self.reel = Some(reel.clone());
        self.sink.record(&record);
        self.stats.draws += 1;
        self.stats.last_winner = Some(outcome.winner);

        tracing::info!(
            draw_id,
            winner = outcome.winner,
            winning_index = reel.winning_index(),
            samples = outcome.sample_count,
            "Draw completed"
        );

        Ok(DrawTicket {
            draw_id,
            winner: outcome.winner,
            reel,
            record,
        })
    }

    /// Handles the presentation-complete signal for `draw_id`.
    ///
    /// Returns true if this call ended the presentation. Duplicate, stale
    /// or unexpected signals return false and change nothing.
    pub fn complete_presentation(&mut self, draw_id: u64) -> bool {
        match self.state {
            DrawState::Presenting { draw_id: current, .. } if current == draw_id => {
                self.finish_presentation();
                tracing::debug!(draw_id, "Presentation complete");
                true
            }
            _ => {
                tracing::trace!(draw_id, "Ignoring stale presentation signal");
                false
            }
        }
    }

    /// Ends a presentation that has outlived the timeout.
    ///
    /// Returns true if the session was returned to `Idle`.
    pub fn expire_stale(&mut self, now: DateTime<Utc>) -> bool {
        match self.state {
            DrawState::Presenting {
                draw_id,
                started_at,
            } if now - started_at >= self.timeout => {
                self.finish_presentation();
                self.stats.presentation_timeouts += 1;
                tracing::warn!(draw_id, "Presentation timed out without completion signal");
                true
            }
            _ => false,
        }
    }

    fn finish_presentation(&mut self) {
        self.state = DrawState::Idle;
        self.collector.set_capture_enabled(true);
    }

    /// Returns true while a draw is presenting.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawState::Presenting { .. })
    }

    /// Current state.
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Most recent reel, live or placeholder.
    pub fn reel(&self) -> Option<&Reel> {
        self.reel.as_ref()
    }

    /// The entropy collector.
    pub fn collector(&self) -> &EntropyCollector {
        &self.collector
    }

    /// Samples required before a draw is accepted.
    pub fn min_samples(&self) -> usize {
        self.engine.min_samples()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// The record sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the record sink (e.g. to edit notes).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionJournal;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn session() -> DrawSession<SessionJournal> {
        DrawSession::with_rng(
            &FileConfig::default(),
            SessionJournal::new(),
            ChaCha20Rng::seed_from_u64(9),
        )
        .unwrap()
    }

    fn feed(session: &mut DrawSession<SessionJournal>, n: usize) {
        for i in 0..n {
            session.record_pointer((i % 37) as f64, (i % 23) as f64 + 1.0);
        }
    }

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn test_successful_draw_consumes_samples() {
        let mut session = session();
        feed(&mut session, 150);

        let ticket = session.trigger_draw_at(&RangeConfig::default(), at(T0)).unwrap();

        assert!(session.is_drawing());
        assert!(session.collector().is_empty());
        assert!(!session.collector().is_capture_enabled());
        assert_eq!(ticket.reel.winner(), ticket.winner);
        assert_eq!(session.sink().history()[0].value, ticket.winner);
        assert_eq!(ticket.record.sample_count, 150);
        assert_eq!(ticket.record.entropy_digest.len(), 64);
    }

    #[test]
    fn test_stray_nan_pointer_does_not_poison_draws() {
        let mut session = session();
        assert!(!session.record_pointer(f64::NAN, 10.0));
        assert!(!session.record_client_pointer(f64::INFINITY, 10.0));
        feed(&mut session, 100);

        let ticket = session.trigger_draw_at(&RangeConfig::default(), at(T0)).unwrap();
        assert_eq!(ticket.record.sample_count, 100);
        assert_eq!(session.stats().rejected_degenerate_seed, 0);
    }

    #[test]
    fn test_draw_while_presenting_is_noop() {
        let mut session = session();
        feed(&mut session, 150);
        session.trigger_draw_at(&RangeConfig::default(), at(T0)).unwrap();

        let before = session.state();
        let result = session.trigger_draw_at(&RangeConfig::default(), at(T0 + 10));

        assert_eq!(result.unwrap_err(), DrawError::InProgress);
        assert_eq!(session.state(), before);
        assert_eq!(session.sink().history().len(), 1);
        // Capture is off, so motion during the animation is dropped.
        assert!(!session.record_pointer(1.0, 1.0));
    }

    #[test]
    fn test_completion_is_idempotent() {
        let mut session = session();
        feed(&mut session, 150);
        let ticket = session.trigger_draw_at(&RangeConfig::default(), at(T0)).unwrap();

        assert!(!session.complete_presentation(ticket.draw_id + 1));
        assert!(session.is_drawing());

        assert!(session.complete_presentation(ticket.draw_id));
        assert!(!session.complete_presentation(ticket.draw_id));
        assert_eq!(session.state(), DrawState::Idle);
        assert!(session.collector().is_capture_enabled());
    }

    #[test]
    fn test_missing_completion_times_out() {
        let mut session = session();
        feed(&mut session, 150);
        session.trigger_draw_at(&RangeConfig::default(), at(T0)).unwrap();

        assert!(!session.expire_stale(at(T0 + 14_999)));
        assert!(session.is_drawing());
        assert!(session.expire_stale(at(T0 + 15_000)));
        assert!(!session.is_drawing());
        assert_eq!(session.stats().presentation_timeouts, 1);

        // The late signal changes nothing.
        assert!(!session.complete_presentation(1));
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut session = session();
        feed(&mut session, 150);

        let result = session.trigger_draw_at(&RangeConfig::new(5, 5, 0), at(T0));

        assert!(matches!(result, Err(DrawError::InvalidRange { .. })));
        assert_eq!(session.collector().len(), 150);
        assert!(!session.is_drawing());
        assert_eq!(session.stats().rejected_invalid_range, 1);
    }

    #[test]
    fn test_insufficient_entropy_counted() {
        let mut session = session();
        feed(&mut session, 10);

        let err = session
            .trigger_draw_at(&RangeConfig::default(), at(T0))
            .unwrap_err();

        assert!(err.needs_more_motion());
        assert_eq!(session.stats().rejected_insufficient_entropy, 1);
        assert_eq!(session.collector().len(), 10);
    }

    #[test]
    fn test_ids_increase_and_sink_sees_every_draw() {
        let mut session = session();

        for round in 0..3 {
            feed(&mut session, 120);
            let ticket = session
                .trigger_draw_at(&RangeConfig::new(1, 30, 7), at(T0 + round * 1000))
                .unwrap();
            assert_eq!(ticket.draw_id, round as u64 + 1);
            session.complete_presentation(ticket.draw_id);
        }

        assert_eq!(session.sink().history().len(), 3);
        assert_eq!(session.stats().draws, 3);
        assert!(session.sink().history().iter().all(|r| r.value != 7));
    }

    #[test]
    fn test_idle_reel_prepared_before_first_draw() {
        let mut session = session();
        assert!(session.reel().is_none());

        let reel = session.prepare_idle_reel(&RangeConfig::default()).unwrap();
        assert_eq!(reel.len(), 100);
        assert!(reel.has_distinct_neighbours());
    }

    #[test]
    fn test_idle_reel_not_replaced_mid_presentation() {
        let mut session = session();
        feed(&mut session, 150);
        let ticket = session.trigger_draw_at(&RangeConfig::default(), at(T0)).unwrap();

        let reel = session.prepare_idle_reel(&RangeConfig::new(1, 3, 2)).unwrap();
        assert_eq!(reel, &ticket.reel);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = FileConfig::default();
        config.capture.min_samples = 500;
        assert!(DrawSession::new(&config, SessionJournal::new()).is_err());
    }
}
