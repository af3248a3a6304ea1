//! Transaction command implementations

use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use tally_core::{
    db::Database,
    models::{NewTransaction, Transaction, TransactionFilter, TransactionKind},
};

use super::{parse_occurred_at, truncate};

pub fn cmd_transactions_list(
    db: &Database,
    user_id: i64,
    account_id: Option<i64>,
    kind: Option<&str>,
    limit: usize,
) -> Result<()> {
    let kind = kind
        .map(|k| k.parse::<TransactionKind>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let transactions = db.list_transactions(user_id, &TransactionFilter { account_id, kind })?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally transactions --user EMAIL add 12.50 --account 1 --category Food");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        print_transaction(tx);
    }

    if transactions.len() > limit {
        println!("   ... and {} more", transactions.len() - limit);
    }

    Ok(())
}

/// One row of the transaction table
pub(crate) fn print_transaction(tx: &Transaction) {
    let amount_str = match tx.kind {
        TransactionKind::Expense => format!("\x1b[31m-{:.2}\x1b[0m", tx.amount), // Red
        TransactionKind::Income => format!("\x1b[32m+{:.2}\x1b[0m", tx.amount),  // Green
        TransactionKind::Transfer => format!("{:.2}", tx.amount),
    };

    println!(
        "   {} │ {:>10} │ {:<14} │ {}",
        tx.occurred_at.format("%Y-%m-%d %H:%M"),
        amount_str,
        truncate(&tx.category, 14),
        truncate(tx.note.as_deref().unwrap_or(""), 30)
    );
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_transactions_add(
    db: &Database,
    user_id: i64,
    account_id: i64,
    amount: Decimal,
    category: &str,
    kind: &str,
    date: Option<&str>,
    note: Option<String>,
) -> Result<()> {
    let kind: TransactionKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let occurred_at = match date {
        Some(raw) => parse_occurred_at(raw)?,
        None => Local::now().naive_local(),
    };

    let tx = db.create_transaction(
        user_id,
        &NewTransaction {
            account_id,
            amount,
            category: category.to_string(),
            occurred_at,
            note,
            kind,
        },
    )?;

    println!(
        "✅ Recorded {} of {:.2} in {} (id {})",
        tx.kind, tx.amount, tx.category, tx.id
    );
    Ok(())
}
