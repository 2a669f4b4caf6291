//! Demo binary: opens (or seeds) a file-backed ledger and prints the chart
//! of accounts, the journal books and the balance summary.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;

use ledgerbook_accounting::JournalKind;
use ledgerbook_infra::{Books, JsonFileStore, seed};

fn main() -> anyhow::Result<()> {
    ledgerbook_observability::init();

    let dir = data_dir()?;
    let store = JsonFileStore::open(&dir)
        .with_context(|| format!("failed to open ledger data at {}", dir.display()))?;
    let mut books = Books::open(store).context("failed to load ledger snapshots")?;

    if books.list_accounts().is_empty() {
        tracing::info!(path = %dir.display(), "empty ledger; seeding demo data");
        seed::seed_demo(&mut books)?;
        for draft in seed::sample_drafts(Utc::now().date_naive()) {
            let entry = books.post_journal_entry(draft)?;
            tracing::info!(reference = %entry.reference, kind = %entry.kind(), "posted journal entry");
        }
    }

    println!("Chart of accounts");
    for account in books.list_accounts() {
        println!(
            "  {:<6} {:<26} {:<10} {:>14}",
            account.code, account.name, account.kind, account.balance
        );
    }

    for kind in JournalKind::ALL {
        let entries = books.list_journal_entries(kind);
        if entries.is_empty() {
            continue;
        }
        println!("\n{kind} journal");
        for entry in entries {
            println!(
                "  {}  {:<16} {:>12}  {}",
                entry.date,
                entry.reference,
                entry.amount(),
                entry.description
            );
        }
    }

    let totals = books.totals();
    let equation = if totals.is_balanced() {
        "balanced".to_string()
    } else {
        format!("unbalanced ({})", totals.equation_drift())
    };

    println!("\nSummary");
    println!("  assets       {:>14}", totals.assets);
    println!("  liabilities  {:>14}", totals.liabilities);
    println!("  equity       {:>14}", totals.total_equity());
    println!("  net income   {:>14}", totals.net_income());
    println!("  equation     {equation}");

    Ok(())
}

/// Data directory: `LEDGERBOOK_DATA_DIR`, or `{app_data_dir}/ledgerbook`.
fn data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("LEDGERBOOK_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        })
        .context("failed to resolve OS app data directory - set LEDGERBOOK_DATA_DIR")?;

    Ok(base.join("ledgerbook"))
}
