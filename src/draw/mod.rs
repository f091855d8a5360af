//! Seed derivation and winner selection.
//!
//! Pointer samples and the draw timestamp are folded into a single seed,
//! scrambled into `[0, 1)` and mapped onto the candidate set. Every step
//! is a pure function; the session module supplies the snapshots.

mod config;
mod engine;
mod error;
mod prf;
mod range;
mod seed;

pub use config::DrawConfig;
pub use engine::{DrawEngine, DrawOutcome};
pub use error::DrawError;
pub use prf::{mulberry32, sine_scramble, PrfKind};
pub use range::{CandidateSet, RangeConfig};
pub use seed::{accumulate, derive_seed, Seed};
