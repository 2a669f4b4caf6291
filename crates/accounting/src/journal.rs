use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerbook_core::JournalEntryId;

/// The four journal books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalKind {
    Receipt,
    Payment,
    Transfer,
    General,
}

impl JournalKind {
    pub const ALL: [JournalKind; 4] = [
        JournalKind::Receipt,
        JournalKind::Payment,
        JournalKind::Transfer,
        JournalKind::General,
    ];
}

impl core::fmt::Display for JournalKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            JournalKind::Receipt => "receipt",
            JournalKind::Payment => "payment",
            JournalKind::Transfer => "transfer",
            JournalKind::General => "general",
        };
        f.write_str(label)
    }
}

/// One line of a receipt or payment.
///
/// Line 0 is the main cash/bank account by convention; the remaining lines
/// are counter-accounts. Amounts are unsigned magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashLine {
    pub account: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
}

/// The single line of a transfer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLine {
    pub from_account: String,
    pub to_account: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
}

/// One line of a general journal entry; exactly one of debit/credit is
/// nonzero on a valid line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralLine {
    pub account: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
}

/// Line items of a journal entry, shaped per journal kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "entries", rename_all = "lowercase")]
pub enum JournalLines {
    Receipt(Vec<CashLine>),
    Payment(Vec<CashLine>),
    Transfer(TransferLine),
    General(Vec<GeneralLine>),
}

impl JournalLines {
    pub fn kind(&self) -> JournalKind {
        match self {
            JournalLines::Receipt(_) => JournalKind::Receipt,
            JournalLines::Payment(_) => JournalKind::Payment,
            JournalLines::Transfer(_) => JournalKind::Transfer,
            JournalLines::General(_) => JournalKind::General,
        }
    }

    /// Headline amount for display: the main line's amount, or the sum of
    /// debits for a general entry.
    pub fn amount(&self) -> Decimal {
        match self {
            JournalLines::Receipt(lines) | JournalLines::Payment(lines) => lines
                .first()
                .map(|line| line.amount)
                .unwrap_or(Decimal::ZERO),
            JournalLines::Transfer(line) => line.amount,
            JournalLines::General(lines) => lines.iter().map(|line| line.debit).sum(),
        }
    }
}

/// A candidate journal entry, not yet accepted into the books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalDraft {
    pub date: NaiveDate,
    /// Human-readable label; generated from the kind's prefix when empty.
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub lines: JournalLines,
}

impl JournalDraft {
    pub fn kind(&self) -> JournalKind {
        self.lines.kind()
    }
}

/// An accepted journal entry. Immutable once stored; corrections require a
/// new offsetting entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,
    pub date: NaiveDate,
    pub reference: String,
    pub description: String,
    #[serde(flatten)]
    pub lines: JournalLines,
    /// Creation instant, assigned when the entry is appended.
    pub posted_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn kind(&self) -> JournalKind {
        self.lines.kind()
    }

    pub fn amount(&self) -> Decimal {
        self.lines.amount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lines_report_their_kind_and_headline_amount() {
        let receipt = JournalLines::Receipt(vec![
            CashLine {
                account: "1121".to_string(),
                description: "Bank deposit".to_string(),
                amount: dec!(12800),
            },
            CashLine {
                account: "4100".to_string(),
                description: "Sales revenue".to_string(),
                amount: dec!(12800),
            },
        ]);
        assert_eq!(receipt.kind(), JournalKind::Receipt);
        assert_eq!(receipt.amount(), dec!(12800));

        let general = JournalLines::General(vec![
            GeneralLine {
                account: "5200".to_string(),
                description: String::new(),
                debit: dec!(1200),
                credit: Decimal::ZERO,
            },
            GeneralLine {
                account: "1200".to_string(),
                description: String::new(),
                debit: Decimal::ZERO,
                credit: dec!(1200),
            },
        ]);
        assert_eq!(general.kind(), JournalKind::General);
        assert_eq!(general.amount(), dec!(1200));
    }

    #[test]
    fn transfer_serializes_with_tagged_wire_shape() {
        let lines = JournalLines::Transfer(TransferLine {
            from_account: "1122".to_string(),
            to_account: "1121".to_string(),
            description: "Fund transfer".to_string(),
            amount: dec!(8320),
        });

        let value = serde_json::to_value(&lines).unwrap();
        assert_eq!(value["type"], "transfer");
        assert_eq!(value["entries"]["fromAccount"], "1122");
        assert_eq!(value["entries"]["toAccount"], "1121");

        let back: JournalLines = serde_json::from_value(value).unwrap();
        assert_eq!(back, lines);
    }
}
