//! First-run demo data: a small chart of accounts plus sample journal
//! drafts that exercise every journal book.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use ledgerbook_accounting::{
    AccountKind, CashLine, GeneralLine, JournalDraft, JournalLines, TransferLine,
};

use crate::books::{Books, NewAccount, StoreError};
use crate::kv::KeyValueStore;

/// Seed the demo chart of accounts. No-op unless the books are empty.
///
/// The opening balances satisfy the accounting equation, so a freshly
/// seeded ledger reads as balanced.
pub fn seed_demo<S: KeyValueStore>(books: &mut Books<S>) -> Result<(), StoreError> {
    if !books.list_accounts().is_empty() {
        return Ok(());
    }

    for (code, name, kind, balance) in demo_accounts() {
        books.add_account(NewAccount {
            code: Some(code.to_string()),
            name: name.to_string(),
            kind,
            description: None,
            opening_balance: balance,
        })?;
    }

    Ok(())
}

fn demo_accounts() -> Vec<(&'static str, &'static str, AccountKind, Decimal)> {
    vec![
        ("1110", "Cash", AccountKind::Asset, dec!(4580.00)),
        ("1121", "Checking Account", AccountKind::Asset, dec!(28450.32)),
        ("1122", "Savings Account", AccountKind::Asset, dec!(35620.00)),
        ("1130", "Accounts Receivable", AccountKind::Asset, dec!(12380.50)),
        ("1200", "Accumulated Depreciation", AccountKind::Asset, Decimal::ZERO),
        ("2110", "Accounts Payable", AccountKind::Liability, dec!(8450.75)),
        ("3100", "Owner's Capital", AccountKind::Equity, dec!(58390.07)),
        ("4100", "Sales", AccountKind::Revenue, dec!(32450.00)),
        ("5100", "Cost of Goods Sold", AccountKind::Expense, dec!(18260.00)),
        ("5200", "Depreciation Expense", AccountKind::Expense, Decimal::ZERO),
    ]
}

/// Sample drafts covering all four journal books, dated relative to
/// `today`. Safe to post against the demo chart in order.
pub fn sample_drafts(today: NaiveDate) -> Vec<JournalDraft> {
    let days_ago = |n: u64| today - Days::new(n);

    vec![
        JournalDraft {
            date: today,
            reference: String::new(),
            description: "Payment received from Karwan Khalil".to_string(),
            lines: JournalLines::Receipt(vec![
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
            ]),
        },
        JournalDraft {
            date: today,
            reference: String::new(),
            description: "Settled supplier invoice".to_string(),
            lines: JournalLines::Payment(vec![
                CashLine {
                    account: "1110".to_string(),
                    description: "Cash payment".to_string(),
                    amount: dec!(4500),
                },
                CashLine {
                    account: "2110".to_string(),
                    description: "Accounts payable settlement".to_string(),
                    amount: dec!(4500),
                },
            ]),
        },
        JournalDraft {
            date: days_ago(1),
            reference: String::new(),
            description: "Monthly depreciation entry".to_string(),
            lines: JournalLines::General(vec![
                GeneralLine {
                    account: "5200".to_string(),
                    description: "Depreciation expense".to_string(),
                    debit: dec!(1200),
                    credit: Decimal::ZERO,
                },
                GeneralLine {
                    account: "1200".to_string(),
                    description: "Accumulated depreciation".to_string(),
                    debit: Decimal::ZERO,
                    credit: dec!(1200),
                },
            ]),
        },
        JournalDraft {
            date: days_ago(2),
            reference: String::new(),
            description: "Transfer from Savings to Checking".to_string(),
            lines: JournalLines::Transfer(TransferLine {
                from_account: "1122".to_string(),
                to_account: "1121".to_string(),
                description: "Fund transfer".to_string(),
                amount: dec!(8320),
            }),
        },
    ]
}
