//! Pointer samples and the capture region they are measured against.

use serde::{Deserialize, Serialize};

/// A single pointer position, relative to the capture region's origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Horizontal offset from the region's left edge.
    pub x: f64,
    /// Vertical offset from the region's top edge.
    pub y: f64,
}

impl PointerSample {
    /// Creates a sample from local coordinates.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `x + y`, the sample's contribution to the seed accumulator.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.x + self.y
    }
}

/// Bounding box of the capture surface in client (viewport) coordinates.
///
/// Samples are stored relative to this box so that a draw does not depend
/// on where the surface happens to sit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureRegion {
    /// Left edge in client coordinates.
    pub left: f64,
    /// Top edge in client coordinates.
    pub top: f64,
    /// Region width.
    pub width: f64,
    /// Region height.
    pub height: f64,
}

impl Default for CaptureRegion {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 600.0,
            height: 400.0,
        }
    }
}

impl CaptureRegion {
    /// Converts a client position into a region-local sample.
    #[inline]
    pub fn localize(&self, client_x: f64, client_y: f64) -> PointerSample {
        PointerSample::new(client_x - self.left, client_y - self.top)
    }

    /// Returns true if the client position falls inside the region.
    pub fn contains(&self, client_x: f64, client_y: f64) -> bool {
        client_x >= self.left
            && client_x < self.left + self.width
            && client_y >= self.top
            && client_y < self.top + self.height
    }

    /// Returns true if the region has a positive, finite area.
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}
