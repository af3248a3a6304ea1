//! Account command implementations

use anyhow::Result;
use rust_decimal::Decimal;
use tally_core::{
    db::Database,
    models::{AccountKind, NewAccount},
};

use super::truncate;

pub fn cmd_accounts_list(db: &Database, user_id: i64) -> Result<()> {
    let accounts = db.list_accounts(user_id)?;

    if accounts.is_empty() {
        println!("No accounts yet. Add one with:");
        println!("  tally accounts --user EMAIL add Checking --kind bank");
        return Ok(());
    }

    println!();
    println!("🏦 Accounts");
    println!("   ─────────────────────────────────────────────────────────────");

    for account in accounts {
        println!(
            "   {:>4} │ {:<24} │ {:<6} │ {:>12.2}",
            account.id,
            truncate(&account.name, 24),
            account.kind,
            account.balance
        );
    }

    Ok(())
}

pub fn cmd_accounts_add(
    db: &Database,
    user_id: i64,
    name: &str,
    kind: &str,
    balance: Decimal,
) -> Result<()> {
    let kind: AccountKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let account = db.create_account(
        user_id,
        &NewAccount {
            name: name.to_string(),
            kind,
            balance,
            color: 0,
        },
    )?;

    println!("✅ Added account '{}' (id {})", account.name, account.id);
    Ok(())
}
