//! Entropy Roulette Library
//!
//! A classroom number roulette: the user picks a range and a "lucky
//! number" to leave out, moves the pointer around a capture surface, and
//! the roulette reveals one number seeded from that motion.
//!
//! # Architecture
//!
//! ```text
//! capture → draw → reel
//!     ↓       ↓      ↓
//!        session (state, records) → metrics
//! ```
//!
//! - **capture**: sliding window of pointer samples
//! - **draw**: seed derivation, seeded PRF, winner selection (pure)
//! - **reel**: decoy strip for the reveal animation (cosmetic randomness)
//! - **session**: the "draw in progress" state machine and collaborator
//!   interfaces for rendering and persistence
//!
//! # Randomness Model
//!
//! The winner is a pure function of the pointer samples and the draw
//! timestamp, scrambled by a sine-based PRF. This is fair enough for
//! picking who answers next, but it is NOT cryptographically secure.
//! Decoy numbers on the reel use an OS-seeded ChaCha20 stream and have no
//! bearing on the result.
//!
//! # Example
//!
//! ```no_run
//! use entropy_roulette::{
//!     capture::{PointerSource, SyntheticPointer},
//!     config::FileConfig,
//!     session::{DrawSession, SessionJournal},
//! };
//!
//! let config = FileConfig::default();
//! let mut session = DrawSession::new(&config, SessionJournal::new()).unwrap();
//! let mut pointer = SyntheticPointer::new(config.capture.region);
//!
//! // Move the "mouse" until there is enough entropy
//! while !session.collector().is_ready(session.min_samples()) {
//!     if let Some((x, y)) = pointer.next_position() {
//!         session.record_client_pointer(x, y);
//!     }
//! }
//!
//! let ticket = session.trigger_draw(&config.range).unwrap();
//! println!("Winner: {}", ticket.winner);
//!
//! // The renderer signals when the animation is done
//! session.complete_presentation(ticket.draw_id);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod draw;
pub mod metrics;
pub mod reel;
pub mod session;

// Re-export commonly used types at crate root
pub use capture::{CaptureConfig, EntropyCollector, PointerSample};
pub use config::{ConfigError, FileConfig};
pub use draw::{CandidateSet, DrawEngine, DrawError, PrfKind, RangeConfig, Seed};
pub use reel::{Reel, ReelConfig, ReelError};
pub use session::{DrawRecord, DrawSession, DrawTicket, RecordSink, SessionJournal};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
