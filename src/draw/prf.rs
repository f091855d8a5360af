//! Seeded pseudo-random functions mapping a seed to `[0, 1)`.
//!
//! These are convenience scramblers, NOT cryptographically secure
//! generators. Unpredictability comes from the pointer samples and the
//! draw timestamp folded into the seed; the functions only spread nearby
//! seeds apart.

use super::seed::Seed;
use serde::{Deserialize, Serialize};

/// Selects which scrambling transform maps a seed to a fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrfKind {
    /// Fractional part of `sin(seed) * 10000`.
    #[default]
    Sine,
    /// One step of Mulberry32 with the seed reduced to 32 bits.
    Mulberry32,
}

impl PrfKind {
    /// Evaluates the transform. Always in `[0, 1)`.
    pub fn evaluate(self, seed: Seed) -> f64 {
        match self {
            PrfKind::Sine => sine_scramble(seed.value()),
            PrfKind::Mulberry32 => mulberry32(seed.value()),
        }
    }
}

/// `x = sin(seed) * 10000; x - floor(x)`.
pub fn sine_scramble(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    unit_interval(x - x.floor())
}

/// Single Mulberry32 output.
///
/// The increment is applied to the seed as a float before the 32-bit
/// conversion, matching the JavaScript reference for seeds past 2^53.
pub fn mulberry32(seed: f64) -> f64 {
    let mut t = to_uint32(seed + f64::from(MULBERRY_INCREMENT));
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    f64::from(t ^ (t >> 14)) / 4_294_967_296.0
}

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;

/// JavaScript `ToUint32`: truncate toward zero, then wrap modulo 2^32.
/// Non-finite values map to 0.
fn to_uint32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// Folds rounding artefacts and NaN back into `[0, 1)`.
///
/// `x - floor(x)` rounds up to exactly 1.0 for tiny negative `x`.
fn unit_interval(f: f64) -> f64 {
    if (0.0..1.0).contains(&f) {
        f
    } else {
        0.0
    }
}
