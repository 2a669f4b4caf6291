//! Snapshot summary over the chart of accounts: per-kind totals, net
//! income and the accounting equation check.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::account::{AccountKind, ChartOfAccounts};

/// Allowed absolute drift of the accounting equation.
const EQUATION_TOLERANCE: Decimal = dec!(0.01);

/// Balance totals per account kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccountTotals {
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub equity: Decimal,
    pub revenue: Decimal,
    pub expenses: Decimal,
}

impl AccountTotals {
    pub fn net_income(&self) -> Decimal {
        self.revenue - self.expenses
    }

    /// Equity including net income.
    pub fn total_equity(&self) -> Decimal {
        self.equity + self.net_income()
    }

    /// Assets − Liabilities − Equity(incl. net income); zero when the
    /// books balance.
    pub fn equation_drift(&self) -> Decimal {
        self.assets - self.liabilities - self.total_equity()
    }

    pub fn is_balanced(&self) -> bool {
        self.equation_drift().abs() < EQUATION_TOLERANCE
    }
}

/// Sum every account's balance into its kind's bucket.
pub fn totals(chart: &ChartOfAccounts) -> AccountTotals {
    let mut totals = AccountTotals::default();
    for account in chart.iter() {
        let bucket = match account.kind {
            AccountKind::Asset => &mut totals.assets,
            AccountKind::Liability => &mut totals.liabilities,
            AccountKind::Equity => &mut totals.equity,
            AccountKind::Revenue => &mut totals.revenue,
            AccountKind::Expense => &mut totals.expenses,
        };
        *bucket += account.balance;
    }
    totals
}
