//! Records emitted to the persistence collaborator.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Immutable record of one completed draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Session-local draw number, starting at 1.
    pub id: u64,
    /// The winning number.
    pub value: i64,
    /// Wall-clock time of the draw (serialized as RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Samples that fed the seed.
    pub sample_count: usize,
    /// Hex digest of the consumed sample snapshot.
    pub entropy_digest: String,
}

impl DrawRecord {
    /// ISO-8601 timestamp with millisecond precision, e.g.
    /// `2024-05-01T08:15:30.250Z`.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Notepad entry attached to a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Id of the draw this note belongs to.
    pub id: u64,
    /// The number that was drawn.
    pub number: i64,
    /// Free-form text; empty until edited.
    pub note: String,
    /// Time of the draw.
    pub timestamp: DateTime<Utc>,
}

impl From<&DrawRecord> for Note {
    fn from(record: &DrawRecord) -> Self {
        Self {
            id: record.id,
            number: record.value,
            note: String::new(),
            timestamp: record.timestamp,
        }
    }
}
