//! Seed derivation from pointer samples and draw time.

use crate::capture::PointerSample;

/// Scalar seed fed to the pseudo-random function.
///
/// Only reproducible if the exact sample sequence and timestamp are
/// replayed, which is what makes a draw unpredictable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed(f64);

impl Seed {
    /// Wraps a raw seed value.
    #[inline]
    pub fn from_raw(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// A zero or non-finite seed carries no usable entropy.
    pub fn is_degenerate(&self) -> bool {
        self.0 == 0.0 || !self.0.is_finite()
    }
}

/// Sums every sample's `x + y`.
pub fn accumulate(samples: &[PointerSample]) -> f64 {
    samples.iter().map(PointerSample::weight).sum()
}

/// Derives the draw seed: `Σ(x + y) * timestamp_ms`.
///
/// An empty sequence yields zero regardless of the timestamp, so callers
/// must gate draws on a minimum sample count.
pub fn derive_seed(samples: &[PointerSample], timestamp_ms: u64) -> Seed {
    Seed(accumulate(samples) * timestamp_ms as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 1_700_000_000_123;

    #[test]
    fn test_uniform_samples_scale_with_time() {
        let samples = vec![PointerSample::new(1.0, 1.0); 150];
        assert_eq!(derive_seed(&samples, T).value(), 300.0 * T as f64);
    }

    #[test]
    fn test_empty_samples_collapse_to_zero() {
        let seed = derive_seed(&[], T);
        assert_eq!(seed.value(), 0.0);
        assert!(seed.is_degenerate());
    }

    #[test]
    fn test_same_motion_different_time() {
        let samples = vec![PointerSample::new(3.0, 4.0); 120];
        assert_ne!(derive_seed(&samples, T), derive_seed(&samples, T + 1));
    }

    #[test]
    fn test_non_finite_is_degenerate() {
        assert!(Seed::from_raw(f64::INFINITY).is_degenerate());
        assert!(Seed::from_raw(f64::NAN).is_degenerate());
        assert!(!Seed::from_raw(12.5).is_degenerate());
    }
}
