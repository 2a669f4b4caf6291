//! Journal validation: reject structurally invalid or unbalanced entries
//! before they reach the posting engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ledgerbook_core::{DomainError, DomainResult};

use crate::journal::{JournalDraft, JournalLines};

/// Allowed absolute difference between total debits and credits.
const BALANCE_EPSILON: Decimal = dec!(0.001);

/// Validate a candidate entry. Pure function of its input; no mutation
/// happens anywhere until validation has run to completion.
///
/// Structural problems fail with [`DomainError::Validation`] listing every
/// offending field path. A general entry whose debit and credit totals
/// drift beyond the epsilon fails with [`DomainError::Unbalanced`].
pub fn validate(draft: &JournalDraft) -> DomainResult<()> {
    let mut fields: Vec<String> = Vec::new();

    match &draft.lines {
        JournalLines::Receipt(lines) | JournalLines::Payment(lines) => {
            if lines.is_empty() {
                fields.push("entries".to_string());
            }
            for (i, line) in lines.iter().enumerate() {
                if line.account.trim().is_empty() {
                    fields.push(format!("entries[{i}].account"));
                }
                if line.amount <= Decimal::ZERO {
                    fields.push(format!("entries[{i}].amount"));
                }
            }
        }
        JournalLines::Transfer(line) => {
            if line.from_account.trim().is_empty() {
                fields.push("fromAccount".to_string());
            }
            if line.to_account.trim().is_empty() {
                fields.push("toAccount".to_string());
            }
            if line.amount <= Decimal::ZERO {
                fields.push("amount".to_string());
            }
        }
        JournalLines::General(lines) => {
            if lines.is_empty() {
                fields.push("entries".to_string());
            }
            for (i, line) in lines.iter().enumerate() {
                if line.account.trim().is_empty() {
                    fields.push(format!("entries[{i}].account"));
                }
                if line.debit < Decimal::ZERO {
                    fields.push(format!("entries[{i}].debit"));
                }
                if line.credit < Decimal::ZERO {
                    fields.push(format!("entries[{i}].credit"));
                }
                // Exactly one side per line: both zero and both nonzero fail.
                let debit_set = line.debit > Decimal::ZERO;
                let credit_set = line.credit > Decimal::ZERO;
                if debit_set == credit_set {
                    fields.push(format!("entries[{i}].debit"));
                    fields.push(format!("entries[{i}].credit"));
                }
            }

            if fields.is_empty() {
                let debits: Decimal = lines.iter().map(|line| line.debit).sum();
                let credits: Decimal = lines.iter().map(|line| line.credit).sum();
                if (debits - credits).abs() > BALANCE_EPSILON {
                    return Err(DomainError::unbalanced(debits, credits));
                }
            }
        }
    }

    if !fields.is_empty() {
        return Err(DomainError::Validation { fields });
    }

    Ok(())
}
