//! Posting engine: applies a validated journal entry against the chart of
//! accounts.

use rust_decimal::Decimal;

use crate::account::ChartOfAccounts;
use crate::journal::JournalLines;

/// Apply a *validated* entry's line items to the chart, mutating balances.
///
/// Balance rules per journal kind:
/// - receipt: every line's amount is added to its account (cash in against
///   the counter-accounts);
/// - payment: the mirror — every line's amount is subtracted;
/// - transfer: amount moves from `fromAccount` to `toAccount`;
/// - general: debit-normal kinds get `debit - credit`, credit-normal kinds
///   get `credit - debit`.
///
/// Lines referencing unknown account codes are skipped; the skipped codes
/// are returned so the caller can surface them. Callers needing atomicity
/// apply this to a working copy of the chart.
pub fn apply(chart: &mut ChartOfAccounts, lines: &JournalLines) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();

    match lines {
        JournalLines::Receipt(lines) => {
            for line in lines {
                adjust(chart, &line.account, line.amount, &mut unknown);
            }
        }
        JournalLines::Payment(lines) => {
            for line in lines {
                adjust(chart, &line.account, -line.amount, &mut unknown);
            }
        }
        JournalLines::Transfer(line) => {
            adjust(chart, &line.from_account, -line.amount, &mut unknown);
            adjust(chart, &line.to_account, line.amount, &mut unknown);
        }
        JournalLines::General(lines) => {
            for line in lines {
                let Some(kind) = chart.get(&line.account).map(|a| a.kind) else {
                    record_unknown(&line.account, &mut unknown);
                    continue;
                };
                let delta = if kind.is_debit_normal() {
                    line.debit - line.credit
                } else {
                    line.credit - line.debit
                };
                chart.adjust(&line.account, delta);
            }
        }
    }

    unknown
}

fn adjust(chart: &mut ChartOfAccounts, code: &str, delta: Decimal, unknown: &mut Vec<String>) {
    if !chart.adjust(code, delta) {
        record_unknown(code, unknown);
    }
}

fn record_unknown(code: &str, unknown: &mut Vec<String>) {
    if !unknown.iter().any(|c| c == code) {
        unknown.push(code.to_string());
    }
}
