//! Human-readable reference labels for journal entries.
//!
//! References are display labels, distinct from the internal entry id.
//! Uniqueness is "good enough" (date + random suffix), not guaranteed.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::journal::JournalKind;

/// Reference prefix per journal book.
pub fn prefix(kind: JournalKind) -> &'static str {
    match kind {
        JournalKind::Receipt => "REC",
        JournalKind::Payment => "PAY",
        JournalKind::Transfer => "TRF",
        JournalKind::General => "JNL",
    }
}

/// Generate a reference of the form `PREFIX-YYMMDD-NNN`.
pub fn generate(kind: JournalKind, at: DateTime<Utc>) -> String {
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{}-{}-{suffix:03}", prefix(kind), at.format("%y%m%d"))
}
