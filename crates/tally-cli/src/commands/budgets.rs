//! Budget command implementations

use anyhow::Result;
use rust_decimal::Decimal;
use tally_core::{db::Database, models::NewBudget};

pub fn cmd_budgets_list(
    db: &Database,
    user_id: i64,
    month: Option<u32>,
    year: Option<i32>,
) -> Result<()> {
    let budgets = db.list_budgets(user_id, month, year)?;

    if budgets.is_empty() {
        println!("No budgets found.");
        return Ok(());
    }

    println!();
    println!("🎯 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for budget in budgets {
        println!(
            "   {:>4} │ {}-{:02} │ {:<20} │ {:>10.2}",
            budget.id, budget.year, budget.month, budget.category, budget.amount
        );
    }

    Ok(())
}

pub fn cmd_budgets_add(
    db: &Database,
    user_id: i64,
    category: &str,
    amount: Decimal,
    month: u32,
    year: i32,
) -> Result<()> {
    let budget = db.create_budget(
        user_id,
        &NewBudget {
            category: category.to_string(),
            amount,
            month,
            year,
        },
    )?;

    println!(
        "✅ Budget of {:.2} for {} in {}-{:02} (id {})",
        budget.amount, budget.category, budget.year, budget.month, budget.id
    );
    Ok(())
}
