//! Append-only journal store.

use chrono::{DateTime, Utc};

use ledgerbook_accounting::{JournalDraft, JournalEntry, JournalKind};
use ledgerbook_core::JournalEntryId;

/// Append-only log of accepted journal entries.
///
/// Entries are never edited or deleted once appended; corrections require
/// a new offsetting entry.
#[derive(Debug, Clone, Default)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the log from a persisted entry list.
    pub fn from_entries(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    /// Accept a draft: assigns the id and creation timestamp, inserts and
    /// returns the stored entry.
    pub fn append(&mut self, draft: JournalDraft, posted_at: DateTime<Utc>) -> JournalEntry {
        let entry = JournalEntry {
            id: JournalEntryId::new(),
            date: draft.date,
            reference: draft.reference,
            description: draft.description,
            lines: draft.lines,
            posted_at,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Entries of one journal book, in insertion order. Finite and
    /// restartable; no iterator state survives between calls.
    pub fn entries_of(&self, kind: JournalKind) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().filter(move |entry| entry.kind() == kind)
    }

    /// Entries of one journal book sorted newest-first by date (creation
    /// instant as tiebreak) — the display order.
    pub fn list(&self, kind: JournalKind) -> Vec<JournalEntry> {
        let mut entries: Vec<_> = self.entries_of(kind).cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.posted_at.cmp(&a.posted_at)));
        entries
    }

    pub fn all(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
