//! Pointer motion sources.
//!
//! The collector does not care where positions come from. In a browser
//! shell they are mouse-move events; the CLI and tests use a synthetic
//! random walk.

use super::sample::CaptureRegion;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// Trait for anything that yields pointer positions in client coordinates.
pub trait PointerSource {
    /// Returns the next pointer position, or `None` if the source is idle.
    fn next_position(&mut self) -> Option<(f64, f64)>;
}

/// Random-walk pointer confined to a capture region.
///
/// Stands in for a human moving the mouse. Its output is only as
/// unpredictable as its RNG seed.
pub struct SyntheticPointer {
    rng: ChaCha20Rng,
    region: CaptureRegion,
    x: f64,
    y: f64,
    max_step: f64,
}

impl SyntheticPointer {
    /// Creates a walker starting at the region's centre, seeded from the OS.
    pub fn new(region: CaptureRegion) -> Self {
        Self::with_rng(region, ChaCha20Rng::from_entropy())
    }

    /// Creates a reproducible walker.
    pub fn from_seed(region: CaptureRegion, seed: u64) -> Self {
        Self::with_rng(region, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(region: CaptureRegion, rng: ChaCha20Rng) -> Self {
        Self {
            rng,
            x: region.left + region.width / 2.0,
            y: region.top + region.height / 2.0,
            max_step: (region.width.min(region.height) / 20.0).max(1.0),
            region,
        }
    }
}

impl PointerSource for SyntheticPointer {
    fn next_position(&mut self) -> Option<(f64, f64)> {
        let dx = self.rng.gen_range(-self.max_step..=self.max_step);
        let dy = self.rng.gen_range(-self.max_step..=self.max_step);

        let right = self.region.left + self.region.width - 1.0;
        let bottom = self.region.top + self.region.height - 1.0;
        self.x = (self.x + dx).clamp(self.region.left, right.max(self.region.left));
        self.y = (self.y + dy).clamp(self.region.top, bottom.max(self.region.top));

        Some((self.x.round(), self.y.round()))
    }
}
