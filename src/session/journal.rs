//! Persistence collaborator interface and an in-memory implementation.
//!
//! The session only ever writes records; it never reads history back.
//! Storage, serialization and retrieval belong to whoever implements
//! [`RecordSink`].

use super::record::{DrawRecord, Note};

/// Receives one record per completed draw.
pub trait RecordSink {
    /// Stores a draw record.
    fn record(&mut self, record: &DrawRecord);
}

impl RecordSink for Vec<DrawRecord> {
    fn record(&mut self, record: &DrawRecord) {
        self.push(record.clone());
    }
}

/// Session history, notepad and archive kept in memory.
///
/// History and notes are ordered newest first, matching how the panels
/// display them.
#[derive(Debug, Default)]
pub struct SessionJournal {
    history: Vec<DrawRecord>,
    notes: Vec<Note>,
    archive: Vec<i64>,
}

impl SessionJournal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw records, newest first.
    pub fn history(&self) -> &[DrawRecord] {
        &self.history
    }

    /// Notepad entries, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Values moved out of history by [`archive_history`](Self::archive_history).
    pub fn archive(&self) -> &[i64] {
        &self.archive
    }

    /// Replaces the text of the note for draw `id`.
    ///
    /// Returns false if no such note exists.
    pub fn set_note(&mut self, id: u64, text: impl Into<String>) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.note = text.into();
                true
            }
            None => false,
        }
    }

    /// Notes for a given drawn number, newest first.
    pub fn notes_for(&self, number: i64) -> impl Iterator<Item = &Note> + '_ {
        self.notes.iter().filter(move |n| n.number == number)
    }

    /// Moves the current history values to the front of the archive and
    /// clears history. Notes are kept.
    pub fn archive_history(&mut self) {
        let values: Vec<i64> = self.history.drain(..).map(|r| r.value).collect();
        tracing::info!(archived = values.len(), "History archived");
        self.archive.splice(0..0, values);
    }

    /// Empties the archive.
    pub fn clear_archive(&mut self) {
        self.archive.clear();
        tracing::info!("Archive cleared");
    }

    /// Drops history and notes; the archive is kept.
    pub fn clear(&mut self) {
        self.history.clear();
        self.notes.clear();
    }
}

impl RecordSink for SessionJournal {
    fn record(&mut self, record: &DrawRecord) {
        self.history.insert(0, record.clone());
        self.notes.insert(0, Note::from(record));
        tracing::debug!(id = record.id, value = record.value, "Draw journaled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: u64, value: i64) -> DrawRecord {
        DrawRecord {
            id,
            value,
            timestamp: Utc::now(),
            sample_count: 100,
            entropy_digest: String::new(),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut journal = SessionJournal::new();
        journal.record(&record(1, 10));
        journal.record(&record(2, 20));

        let values: Vec<i64> = journal.history().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![20, 10]);
        assert_eq!(journal.notes()[0].number, 20);
    }

    #[test]
    fn test_set_note() {
        let mut journal = SessionJournal::new();
        journal.record(&record(1, 10));

        assert!(journal.set_note(1, "answered well"));
        assert_eq!(journal.notes()[0].note, "answered well");
        assert!(!journal.set_note(99, "nobody"));
    }

    #[test]
    fn test_archive_keeps_order_and_notes() {
        let mut journal = SessionJournal::new();
        journal.record(&record(1, 10));
        journal.record(&record(2, 20));
        journal.archive_history();
        journal.record(&record(3, 30));
        journal.archive_history();

        assert!(journal.history().is_empty());
        assert_eq!(journal.archive(), &[30, 20, 10]);
        assert_eq!(journal.notes().len(), 3);

        journal.clear_archive();
        assert!(journal.archive().is_empty());
    }

    #[test]
    fn test_notes_for_number() {
        let mut journal = SessionJournal::new();
        journal.record(&record(1, 10));
        journal.record(&record(2, 11));
        journal.record(&record(3, 10));

        let ids: Vec<u64> = journal.notes_for(10).map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<DrawRecord> = Vec::new();
        sink.record(&record(1, 5));
        assert_eq!(sink.len(), 1);
    }
}
