//! Session shell: draw state, records and collaborator interfaces.
//!
//! The draw and reel modules are pure. This module owns the mutable
//! pieces around them: the entropy collector, the "draw in progress"
//! flag, the decoy RNG and the sink that receives draw records.

mod journal;
mod presenter;
mod record;
mod state;

pub use journal::{RecordSink, SessionJournal};
pub use presenter::{Presenter, TextPresenter};
pub use record::{DrawRecord, Note};
pub use state::{DrawSession, DrawState, DrawTicket, SessionStats};
