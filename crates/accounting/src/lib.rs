//! `ledgerbook-accounting` — double-entry bookkeeping domain logic.
//!
//! Pure domain crate: the chart of accounts, the journal entry model, the
//! journal validator and the posting engine. No IO; persistence lives in
//! `ledgerbook-infra`.

pub mod account;
pub mod journal;
pub mod posting;
pub mod reference;
pub mod summary;
pub mod validate;

pub use account::{Account, AccountKind, AccountPatch, ChartOfAccounts};
pub use journal::{
    CashLine, GeneralLine, JournalDraft, JournalEntry, JournalKind, JournalLines, TransferLine,
};
pub use summary::AccountTotals;
