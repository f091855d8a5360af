//! Decoy reel synthesis.
//!
//! The reel is what the spin animation scrolls past before stopping on
//! the winner. Only the winning slot is meaningful; every other slot is a
//! cosmetic decoy drawn with ordinary randomness, constrained so that no
//! two neighbouring slots show the same number.

use super::config::ReelConfig;
use crate::draw::CandidateSet;
use rand::Rng;
use thiserror::Error;

/// Errors that can occur while building a reel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReelError {
    #[error("reel has no slots")]
    NoSlots,
    #[error("winning window {min}..={max} does not fit a reel of {total} slots")]
    InvalidWindow { min: usize, max: usize, total: usize },
    #[error("winning index {index} outside reel of {total} slots")]
    IndexOutOfBounds { index: usize, total: usize },
    #[error("winner {winner} is not in the candidate set")]
    WinnerNotCandidate { winner: i64 },
}

/// A fully populated reel with the winner at `winning_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reel {
    slots: Vec<i64>,
    winning_index: usize,
}

impl Reel {
    /// Builds a reel, picking the winning slot at random from the
    /// configured window.
    ///
    /// The slot choice is independent of the entropy seed: it only decides
    /// where the animation lands, not what it lands on.
    pub fn build<R: Rng + ?Sized>(
        candidates: &CandidateSet,
        winner: i64,
        config: &ReelConfig,
        rng: &mut R,
    ) -> Result<Self, ReelError> {
        if config.total_slots == 0 {
            return Err(ReelError::NoSlots);
        }
        if config.winning_index_min > config.winning_index_max
            || config.winning_index_max >= config.total_slots
        {
            return Err(ReelError::InvalidWindow {
                min: config.winning_index_min,
                max: config.winning_index_max,
                total: config.total_slots,
            });
        }

        let winning_index = rng.gen_range(config.winning_window());
        Self::build_at(candidates, winner, winning_index, config.total_slots, rng)
    }

    /// Builds a reel with the winner at a caller-chosen slot.
    pub fn build_at<R: Rng + ?Sized>(
        candidates: &CandidateSet,
        winner: i64,
        winning_index: usize,
        total_slots: usize,
        rng: &mut R,
    ) -> Result<Self, ReelError> {
        if total_slots == 0 {
            return Err(ReelError::NoSlots);
        }
        if winning_index >= total_slots {
            return Err(ReelError::IndexOutOfBounds {
                index: winning_index,
                total: total_slots,
            });
        }
        if !candidates.contains(winner) {
            return Err(ReelError::WinnerNotCandidate { winner });
        }

        // Adjacent distinctness is unsatisfiable with one candidate.
        if candidates.sole().is_some() {
            return Ok(Self {
                slots: vec![winner; total_slots],
                winning_index,
            });
        }

        let mut slots = vec![winner; total_slots];
        for i in winning_index + 1..total_slots {
            slots[i] = distinct_from(candidates, slots[i - 1], rng);
        }
        for i in (0..winning_index).rev() {
            slots[i] = distinct_from(candidates, slots[i + 1], rng);
        }

        Ok(Self {
            slots,
            winning_index,
        })
    }

    /// Builds an idle-time reel around an arbitrary candidate so the
    /// display is never empty before the first draw.
    pub fn placeholder<R: Rng + ?Sized>(
        candidates: &CandidateSet,
        config: &ReelConfig,
        rng: &mut R,
    ) -> Result<Self, ReelError> {
        let winner = pick(candidates, rng);
        Self::build(candidates, winner, config, rng)
    }

    /// All slots in display order.
    pub fn slots(&self) -> &[i64] {
        &self.slots
    }

    /// Slot holding the winner.
    pub fn winning_index(&self) -> usize {
        self.winning_index
    }

    /// Value at the winning slot.
    pub fn winner(&self) -> i64 {
        self.slots[self.winning_index]
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the reel has no slots. Never true for a built reel.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots within `radius` of the winner, clipped to the reel.
    pub fn window(&self, radius: usize) -> &[i64] {
        let start = self.winning_index.saturating_sub(radius);
        let end = (self.winning_index + radius + 1).min(self.slots.len());
        &self.slots[start..end]
    }

    /// Returns true if no two neighbouring slots are equal.
    pub fn has_distinct_neighbours(&self) -> bool {
        self.slots.windows(2).all(|pair| pair[0] != pair[1])
    }
}

/// Uniform candidate.
fn pick<R: Rng + ?Sized>(candidates: &CandidateSet, rng: &mut R) -> i64 {
    let index = rng.gen_range(0..candidates.len());
    candidates.get(index).unwrap_or(candidates.min())
}

/// Rejection-samples a uniform candidate different from `previous`.
///
/// Needs at least two candidates; each attempt succeeds with probability
/// at least one half.
fn distinct_from<R: Rng + ?Sized>(candidates: &CandidateSet, previous: i64, rng: &mut R) -> i64 {
    loop {
        let value = pick(candidates, rng);
        if value != previous {
            return value;
        }
    }
}
