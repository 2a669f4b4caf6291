//! The `Books` application service: the interface a rendering layer calls.
//!
//! Owns the chart of accounts, the journal log and the key-value handle.
//! Every mutation is applied to a working copy and swapped in only after
//! the snapshots persist, so no partial update is ever observable.

use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use ledgerbook_accounting::{
    Account, AccountKind, AccountPatch, AccountTotals, ChartOfAccounts, JournalDraft,
    JournalEntry, JournalKind, posting, reference, summary, validate,
};
use ledgerbook_core::DomainError;
use rust_decimal::Decimal;

use crate::journal::JournalStore;
use crate::kv::KeyValueStore;

/// Storage key of the account collection.
pub const ACCOUNTS_KEY: &str = "accounts";
/// Storage key of the journal entry collection.
pub const JOURNAL_KEY: &str = "journalEntries";

/// Failures surfaced by the service layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Deterministic bookkeeping failure; recoverable at the caller.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot codec failure: {0}")]
    Serialize(String),

    /// The key-value layer failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }
}

/// Input for creating an account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    /// All-digit code; generated from the kind when absent.
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub opening_balance: Decimal,
}

/// Single-user bookkeeping service over a key-value store.
#[derive(Debug)]
pub struct Books<S: KeyValueStore> {
    store: S,
    chart: ChartOfAccounts,
    journal: JournalStore,
}

impl Books<crate::kv::InMemoryKeyValueStore> {
    /// Fresh books over an in-memory store (tests, ephemeral runs).
    pub fn in_memory() -> Self {
        Self {
            store: crate::kv::InMemoryKeyValueStore::new(),
            chart: ChartOfAccounts::new(),
            journal: JournalStore::new(),
        }
    }
}

impl<S: KeyValueStore> Books<S> {
    /// Load both collections from the store; absent keys mean empty books.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let accounts: Vec<Account> = read_collection(&store, ACCOUNTS_KEY)?;
        let entries: Vec<JournalEntry> = read_collection(&store, JOURNAL_KEY)?;

        Ok(Self {
            store,
            chart: ChartOfAccounts::from_accounts(accounts)?,
            journal: JournalStore::from_entries(entries),
        })
    }

    /// All accounts in display order (numeric code ascending).
    pub fn list_accounts(&self) -> Vec<Account> {
        self.chart.list()
    }

    pub fn account(&self, code: &str) -> Option<&Account> {
        self.chart.get(code)
    }

    pub fn next_account_code(&self, kind: AccountKind) -> String {
        self.chart.next_code(kind)
    }

    /// Per-kind balance totals and the accounting equation check.
    pub fn totals(&self) -> AccountTotals {
        summary::totals(&self.chart)
    }

    pub fn add_account(&mut self, new: NewAccount) -> Result<Account, StoreError> {
        let mut fields: Vec<&str> = Vec::new();
        if new.name.trim().is_empty() {
            fields.push("name");
        }

        let code = match new.code {
            Some(code) => {
                if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                    fields.push("code");
                }
                code
            }
            None => self.chart.next_code(new.kind),
        };

        if !fields.is_empty() {
            return Err(DomainError::validation(fields).into());
        }

        let account = Account {
            code,
            name: new.name,
            kind: new.kind,
            description: new.description.filter(|d| !d.is_empty()),
            balance: new.opening_balance,
        };

        let mut chart = self.chart.clone();
        chart.add(account.clone())?;
        self.persist_accounts(&chart)?;
        self.chart = chart;
        Ok(account)
    }

    /// Edit name/description/kind; the balance is immutable through this
    /// path.
    pub fn edit_account(&mut self, code: &str, patch: AccountPatch) -> Result<Account, StoreError> {
        let mut chart = self.chart.clone();
        let updated = chart.patch(code, patch)?;
        self.persist_accounts(&chart)?;
        self.chart = chart;
        Ok(updated)
    }

    /// Delete an account; only allowed while its balance is exactly zero.
    pub fn delete_account(&mut self, code: &str) -> Result<(), StoreError> {
        let mut chart = self.chart.clone();
        chart.remove(code)?;
        self.persist_accounts(&chart)?;
        self.chart = chart;
        Ok(())
    }

    /// Validate and post a journal entry: balances update as one unit and
    /// the accepted entry is appended to the journal log.
    pub fn post_journal_entry(&mut self, mut draft: JournalDraft) -> Result<JournalEntry, StoreError> {
        validate::validate(&draft)?;

        let now = Utc::now();
        if draft.reference.is_empty() {
            draft.reference = reference::generate(draft.kind(), now);
        }

        let mut chart = self.chart.clone();
        for code in posting::apply(&mut chart, &draft.lines) {
            tracing::warn!(
                account = %code,
                reference = %draft.reference,
                "journal line references an unknown account; balance update skipped"
            );
        }

        let mut journal = self.journal.clone();
        let entry = journal.append(draft, now);

        self.persist_accounts(&chart)?;
        self.persist_journal(&journal)?;
        self.chart = chart;
        self.journal = journal;

        Ok(entry)
    }

    /// Entries of one journal book, newest first.
    pub fn list_journal_entries(&self, kind: JournalKind) -> Vec<JournalEntry> {
        self.journal.list(kind)
    }

    fn persist_accounts(&self, chart: &ChartOfAccounts) -> Result<(), StoreError> {
        let payload = encode(&chart.list())?;
        self.store.put(ACCOUNTS_KEY, &payload)?;
        Ok(())
    }

    fn persist_journal(&self, journal: &JournalStore) -> Result<(), StoreError> {
        let payload = encode(&journal.all())?;
        self.store.put(JOURNAL_KEY, &payload)?;
        Ok(())
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialize(e.to_string()))
}

fn read_collection<S: KeyValueStore, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    match store.get(key)? {
        Some(payload) => serde_json::from_str(&payload)
            .map_err(|e| StoreError::Serialize(format!("snapshot {key}: {e}"))),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use ledgerbook_accounting::{CashLine, JournalLines, TransferLine};

    use crate::kv::InMemoryKeyValueStore;

    fn new_account(code: &str, name: &str, kind: AccountKind, balance: Decimal) -> NewAccount {
        NewAccount {
            code: Some(code.to_string()),
            name: name.to_string(),
            kind,
            description: None,
            opening_balance: balance,
        }
    }

    fn seeded_books() -> Books<InMemoryKeyValueStore> {
        let mut books = Books::in_memory();
        books
            .add_account(new_account("1110", "Cash", AccountKind::Asset, dec!(4580)))
            .unwrap();
        books
            .add_account(new_account(
                "1121",
                "Checking Account",
                AccountKind::Asset,
                Decimal::ZERO,
            ))
            .unwrap();
        books
            .add_account(new_account(
                "3100",
                "Owner's Capital",
                AccountKind::Equity,
                dec!(4580),
            ))
            .unwrap();
        books
            .add_account(new_account("4100", "Sales", AccountKind::Revenue, Decimal::ZERO))
            .unwrap();
        books
    }

    fn receipt(date: NaiveDate, amount: Decimal) -> JournalDraft {
        JournalDraft {
            date,
            reference: String::new(),
            description: "Payment received".to_string(),
            lines: JournalLines::Receipt(vec![
                CashLine {
                    account: "1121".to_string(),
                    description: "Bank deposit".to_string(),
                    amount,
                },
                CashLine {
                    account: "4100".to_string(),
                    description: "Sales revenue".to_string(),
                    amount,
                },
            ]),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    #[test]
    fn add_account_generates_codes_and_rejects_duplicates() {
        let mut books = Books::in_memory();

        let generated = books
            .add_account(NewAccount {
                code: None,
                name: "Cash".to_string(),
                kind: AccountKind::Asset,
                description: None,
                opening_balance: Decimal::ZERO,
            })
            .unwrap();
        assert_eq!(generated.code, "1100");

        let err = books
            .add_account(new_account("1100", "Cash again", AccountKind::Asset, Decimal::ZERO))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::DuplicateCode(code)) if code == "1100"
        ));
    }

    #[test]
    fn add_account_validates_code_and_name() {
        let mut books = Books::in_memory();
        let err = books
            .add_account(new_account("11a0", "  ", AccountKind::Asset, Decimal::ZERO))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::Validation { fields }) if fields == ["name", "code"]
        ));
    }

    #[test]
    fn edit_account_preserves_the_balance() {
        let mut books = seeded_books();
        let updated = books
            .edit_account(
                "1110",
                AccountPatch {
                    name: Some("Petty Cash".to_string()),
                    ..AccountPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Petty Cash");
        assert_eq!(updated.balance, dec!(4580));
    }

    #[test]
    fn delete_account_enforces_the_zero_balance_rule() {
        let mut books = seeded_books();

        let err = books.delete_account("1110").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::NonZeroBalance { code, .. }) if code == "1110"
        ));

        books.delete_account("1121").unwrap();
        assert!(books.account("1121").is_none());
    }

    #[test]
    fn posting_a_receipt_updates_both_balances_and_appends() {
        let mut books = seeded_books();
        let entry = books.post_journal_entry(receipt(date(25), dec!(12800))).unwrap();

        assert!(entry.reference.starts_with("REC-"));
        assert_eq!(books.account("1121").unwrap().balance, dec!(12800));
        assert_eq!(books.account("4100").unwrap().balance, dec!(12800));
        assert_eq!(books.list_journal_entries(JournalKind::Receipt).len(), 1);
        assert!(books.totals().is_balanced());
    }

    #[test]
    fn a_rejected_entry_leaves_no_trace() {
        let mut books = seeded_books();
        let accounts_before = books.list_accounts();

        let err = books
            .post_journal_entry(JournalDraft {
                date: date(25),
                reference: String::new(),
                description: String::new(),
                lines: JournalLines::Receipt(vec![CashLine {
                    account: String::new(),
                    description: String::new(),
                    amount: Decimal::ZERO,
                }]),
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::Domain(DomainError::Validation { .. })));
        assert_eq!(books.list_accounts(), accounts_before);
        assert!(books.list_journal_entries(JournalKind::Receipt).is_empty());
    }

    #[test]
    fn unknown_account_codes_are_tolerated_but_the_entry_still_posts() {
        let mut books = seeded_books();
        let entry = books
            .post_journal_entry(JournalDraft {
                date: date(25),
                reference: String::new(),
                description: String::new(),
                lines: JournalLines::Receipt(vec![
                    CashLine {
                        account: "1121".to_string(),
                        description: String::new(),
                        amount: dec!(100),
                    },
                    CashLine {
                        account: "9999".to_string(),
                        description: String::new(),
                        amount: dec!(100),
                    },
                ]),
            })
            .unwrap();

        assert_eq!(books.account("1121").unwrap().balance, dec!(100));
        assert!(books.account("9999").is_none());
        assert_eq!(books.list_journal_entries(JournalKind::Receipt)[0].id, entry.id);
    }

    #[test]
    fn journal_listing_is_newest_first_by_date() {
        let mut books = seeded_books();
        books.post_journal_entry(receipt(date(23), dec!(10))).unwrap();
        books.post_journal_entry(receipt(date(25), dec!(20))).unwrap();
        books.post_journal_entry(receipt(date(24), dec!(30))).unwrap();

        let dates: Vec<_> = books
            .list_journal_entries(JournalKind::Receipt)
            .iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, [date(25), date(24), date(23)]);
    }

    #[test]
    fn books_reload_from_the_same_store() {
        let store = Arc::new(InMemoryKeyValueStore::new());

        let mut books = Books::open(store.clone()).unwrap();
        books
            .add_account(new_account("1121", "Checking", AccountKind::Asset, Decimal::ZERO))
            .unwrap();
        books
            .add_account(new_account("3100", "Capital", AccountKind::Equity, Decimal::ZERO))
            .unwrap();
        books
            .add_account(new_account("4100", "Sales", AccountKind::Revenue, Decimal::ZERO))
            .unwrap();
        books.post_journal_entry(receipt(date(25), dec!(12800))).unwrap();
        books
            .post_journal_entry(JournalDraft {
                date: date(25),
                reference: String::new(),
                description: String::new(),
                lines: JournalLines::Transfer(TransferLine {
                    from_account: "1121".to_string(),
                    to_account: "1121".to_string(),
                    description: String::new(),
                    amount: dec!(1),
                }),
            })
            .unwrap();

        let reloaded = Books::open(store).unwrap();
        assert_eq!(reloaded.list_accounts(), books.list_accounts());
        assert_eq!(
            reloaded.list_journal_entries(JournalKind::Receipt),
            books.list_journal_entries(JournalKind::Receipt)
        );
        assert_eq!(
            reloaded.list_journal_entries(JournalKind::Transfer),
            books.list_journal_entries(JournalKind::Transfer)
        );
        assert_eq!(reloaded.totals(), books.totals());
    }
}
