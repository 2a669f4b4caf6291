//! Domain error model.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic bookkeeping failures (validation,
/// double-entry invariants, account lifecycle). Storage concerns belong
/// elsewhere.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A candidate entry or account had missing/malformed fields.
    ///
    /// `fields` lists the offending field paths (e.g. `entries[1].account`).
    #[error("validation failed: missing or invalid fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    /// A general journal entry did not balance beyond the allowed epsilon.
    #[error("journal entry is not balanced (debits: {debits}, credits: {credits})")]
    Unbalanced { debits: Decimal, credits: Decimal },

    /// An account code is already taken.
    #[error("account code already exists: {0}")]
    DuplicateCode(String),

    /// An account with a non-zero balance cannot be deleted.
    #[error("account {code} has a non-zero balance ({balance})")]
    NonZeroBalance { code: String, balance: Decimal },

    /// A referenced account code is absent from the chart.
    #[error("account not found: {0}")]
    AccountNotFound(String),
}

impl DomainError {
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unbalanced(debits: Decimal, credits: Decimal) -> Self {
        Self::Unbalanced { debits, credits }
    }

    pub fn duplicate_code(code: impl Into<String>) -> Self {
        Self::DuplicateCode(code.into())
    }

    pub fn non_zero_balance(code: impl Into<String>, balance: Decimal) -> Self {
        Self::NonZeroBalance {
            code: code.into(),
            balance,
        }
    }

    pub fn account_not_found(code: impl Into<String>) -> Self {
        Self::AccountNotFound(code.into())
    }
}
