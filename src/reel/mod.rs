//! Decoy reels for the reveal animation.
//!
//! A reel is a fixed-length strip of numbers with the draw result at one
//! slot. It carries no fairness requirement; the winner is decided before
//! the reel is built.

mod config;
mod strip;

pub use config::ReelConfig;
pub use strip::{Reel, ReelError};
