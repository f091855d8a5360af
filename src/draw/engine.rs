//! Winner selection from a validated range and an entropy snapshot.
//!
//! The engine is pure: given the same range, samples and timestamp it
//! always returns the same winner. All mutable state (the collector, the
//! in-progress flag) lives in the session that wraps it.

use super::{
    error::DrawError,
    prf::PrfKind,
    range::{CandidateSet, RangeConfig},
    seed::{derive_seed, Seed},
};
use crate::capture::PointerSample;

/// Result of a successful draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    /// The selected number, always a member of `candidates`.
    pub winner: i64,
    /// Seed the winner was derived from.
    pub seed: Seed,
    /// Candidate set the winner was chosen from.
    pub candidates: CandidateSet,
    /// Number of samples consumed.
    pub sample_count: usize,
}

/// Derives seeds and selects winners.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    min_samples: usize,
    prf: PrfKind,
}

impl DrawEngine {
    /// Creates an engine requiring `min_samples` samples per draw.
    pub fn new(min_samples: usize, prf: PrfKind) -> Self {
        Self { min_samples, prf }
    }

    /// Validates inputs, derives the seed and selects the winner.
    ///
    /// Checks run in order: range, sample count, seed. The first failing
    /// precondition is returned and nothing is computed past it.
    pub fn draw(
        &self,
        range: &RangeConfig,
        samples: &[PointerSample],
        timestamp_ms: u64,
    ) -> Result<DrawOutcome, DrawError> {
        let candidates = range.candidates()?;

        if samples.len() < self.min_samples {
            return Err(DrawError::InsufficientEntropy {
                got: samples.len(),
                need: self.min_samples,
            });
        }

        let seed = derive_seed(samples, timestamp_ms);
        if seed.is_degenerate() {
            return Err(DrawError::DegenerateSeed);
        }

        let winner = self.select_winner(&candidates, seed)?;

        tracing::debug!(
            winner,
            candidates = candidates.len(),
            samples = samples.len(),
            "Winner selected"
        );

        Ok(DrawOutcome {
            winner,
            seed,
            candidates,
            sample_count: samples.len(),
        })
    }

    /// Maps a seed onto the candidate set: `candidates[floor(prf(seed) * len)]`.
    pub fn select_winner(&self, candidates: &CandidateSet, seed: Seed) -> Result<i64, DrawError> {
        let fraction = self.prf.evaluate(seed);
        // Candidate sets are capped at 2^53 entries, so the product is exact
        // enough that the floor stays below len.
        let index = ((fraction * candidates.len() as f64).floor() as u64)
            .min(candidates.len().saturating_sub(1));

        candidates
            .get(index)
            .ok_or(DrawError::EmptyCandidateSet {
                min: candidates.min(),
                max: candidates.max(),
                excluded: candidates.excluded(),
            })
    }

    /// Minimum samples required per draw.
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Scrambling transform in use.
    pub fn prf(&self) -> PrfKind {
        self.prf
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new(100, PrfKind::default())
    }
}
