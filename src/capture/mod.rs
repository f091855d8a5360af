//! Pointer-motion capture.
//!
//! This module turns raw pointer movement into a bounded pool of samples
//! that the draw engine consumes as its entropy source. Coordinates are
//! kept relative to the capture region, never the full viewport.

mod collector;
mod config;
mod digest;
mod pointer;
mod sample;

pub use collector::EntropyCollector;
pub use config::CaptureConfig;
pub use digest::{HashAlgorithm, SampleDigest};
pub use pointer::{PointerSource, SyntheticPointer};
pub use sample::{CaptureRegion, PointerSample};
