use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerbook_core::{DomainError, DomainResult};

/// High-level account kind (determines normal balance side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountKind {
    /// Leading code digit conventionally used for this kind.
    ///
    /// Display/generation convention only; codes are not validated against it.
    pub fn prefix(self) -> char {
        match self {
            AccountKind::Asset => '1',
            AccountKind::Liability => '2',
            AccountKind::Equity => '3',
            AccountKind::Revenue => '4',
            AccountKind::Expense => '5',
        }
    }

    /// Whether a debit increases this kind's balance.
    pub fn is_debit_normal(self) -> bool {
        matches!(self, AccountKind::Asset | AccountKind::Expense)
    }
}

impl core::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            AccountKind::Asset => "Asset",
            AccountKind::Liability => "Liability",
            AccountKind::Equity => "Equity",
            AccountKind::Revenue => "Revenue",
            AccountKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// A ledger account: identity, metadata and current balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique all-digit code, e.g. "1121".
    pub code: String,
    pub name: String,
    pub kind: AccountKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Signed balance; mutated only by the posting engine after creation.
    pub balance: Decimal,
}

/// Metadata edits applied to an existing account.
///
/// `None` leaves the field untouched. The balance is not editable through
/// a patch; only posting moves it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<AccountKind>,
}

/// Current snapshot of all accounts, keyed by unique code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOfAccounts {
    accounts: BTreeMap<String, Account>,
}

impl ChartOfAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a chart from a persisted account list.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> DomainResult<Self> {
        let mut chart = Self::new();
        for account in accounts {
            chart.add(account)?;
        }
        Ok(chart)
    }

    pub fn add(&mut self, account: Account) -> DomainResult<()> {
        if self.accounts.contains_key(&account.code) {
            return Err(DomainError::duplicate_code(&account.code));
        }
        self.accounts.insert(account.code.clone(), account);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code)
    }

    /// Apply metadata edits; returns the updated account.
    pub fn patch(&mut self, code: &str, patch: AccountPatch) -> DomainResult<Account> {
        let account = self
            .accounts
            .get_mut(code)
            .ok_or_else(|| DomainError::account_not_found(code))?;

        if let Some(name) = patch.name {
            account.name = name;
        }
        if let Some(description) = patch.description {
            account.description = if description.is_empty() {
                None
            } else {
                Some(description)
            };
        }
        if let Some(kind) = patch.kind {
            account.kind = kind;
        }

        Ok(account.clone())
    }

    /// Remove an account; only allowed while its balance is exactly zero.
    pub fn remove(&mut self, code: &str) -> DomainResult<Account> {
        let account = self
            .accounts
            .remove(code)
            .ok_or_else(|| DomainError::account_not_found(code))?;

        if account.balance != Decimal::ZERO {
            let err = DomainError::non_zero_balance(code, account.balance);
            self.accounts.insert(account.code.clone(), account);
            return Err(err);
        }

        Ok(account)
    }

    /// Next free code for a kind: highest existing code sharing the kind's
    /// prefix digit plus 10, or `<prefix>100` when none exist yet.
    pub fn next_code(&self, kind: AccountKind) -> String {
        let prefix = kind.prefix();
        let highest = self
            .accounts
            .values()
            .filter(|a| a.kind == kind && a.code.starts_with(prefix))
            .filter_map(|a| a.code.parse::<u64>().ok())
            .max();

        match highest {
            Some(code) => (code + 10).to_string(),
            None => format!("{prefix}100"),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// All accounts sorted by numeric code ascending (display order).
    pub fn list(&self) -> Vec<Account> {
        let mut accounts: Vec<_> = self.accounts.values().cloned().collect();
        accounts.sort_by_key(|a| a.code.parse::<u64>().unwrap_or(u64::MAX));
        accounts
    }

    /// Shift an account's balance. Returns false when the code is unknown;
    /// reserved to the posting engine.
    pub(crate) fn adjust(&mut self, code: &str, delta: Decimal) -> bool {
        match self.accounts.get_mut(code) {
            Some(account) => {
                account.balance += delta;
                true
            }
            None => false,
        }
    }
}
