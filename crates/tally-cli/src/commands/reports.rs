//! Report command implementations

use anyhow::Result;
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use tally_core::{
    analytics,
    db::Database,
    models::{TransactionFilter, TransactionKind},
};

use super::{print_transaction, truncate};

const BAR_WIDTH: usize = 20;

fn expense_filter() -> TransactionFilter {
    TransactionFilter {
        account_id: None,
        kind: Some(TransactionKind::Expense),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A bar of `fraction` (0..=1) of `BAR_WIDTH` blocks
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn cmd_dashboard(db: &Database, user_id: i64, now: NaiveDateTime, json: bool) -> Result<()> {
    let transactions = db.list_transactions(user_id, &TransactionFilter::default())?;
    let summary = analytics::compute_dashboard(&transactions, now, now.month(), now.year())?;

    if json {
        return print_json(&summary);
    }

    println!();
    println!("📊 Tally Dashboard - {}", summary.date);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Today:      +{:.2} income   -{:.2} expense",
        summary.today_income, summary.today_expense
    );
    println!(
        "   {}:    +{:.2} income   -{:.2} expense",
        summary.period, summary.month_income, summary.month_expense
    );

    if !summary.top_categories.is_empty() {
        println!();
        println!("   Top categories");
        for c in &summary.top_categories {
            println!(
                "   {:<16} {} {:>10.2}",
                truncate(&c.category, 16),
                bar(c.fraction),
                c.amount
            );
        }
    }

    if !summary.recent_transactions.is_empty() {
        println!();
        println!("   Recent transactions");
        for tx in &summary.recent_transactions {
            print_transaction(tx);
        }
    }

    Ok(())
}

pub fn cmd_report_budgets(
    db: &Database,
    user_id: i64,
    month: u32,
    year: i32,
    json: bool,
) -> Result<()> {
    let budgets = db.list_budgets(user_id, Some(month), Some(year))?;
    let expenses = db.list_transactions(user_id, &expense_filter())?;
    let overview = analytics::compute_budget_progress(&budgets, &expenses, month, year)?;

    if json {
        return print_json(&overview);
    }

    println!();
    println!("🎯 Budgets - {}", overview.period);
    println!("   ─────────────────────────────────────────────────────────────");

    if overview.budgets.is_empty() {
        println!("   No budgets set for this month.");
    }

    for progress in &overview.budgets {
        let marker = if progress.is_over_budget() { "⚠️ " } else { "  " };
        println!(
            "   {}{:<16} {} {:>10.2} / {:.2} ({:.0}%, {:.2} left)",
            marker,
            truncate(&progress.budget.category, 16),
            bar(progress.ratio),
            progress.spent,
            progress.budget.amount,
            progress.ratio * 100.0,
            progress.remaining()
        );
    }

    println!();
    println!(
        "   Total: {:.2} spent of {:.2} budgeted",
        overview.total_spent, overview.total_limit
    );

    Ok(())
}

pub fn cmd_report_analytics(
    db: &Database,
    user_id: i64,
    month: u32,
    year: i32,
    window: u32,
    json: bool,
) -> Result<()> {
    let expenses = db.list_transactions(user_id, &expense_filter())?;
    let report = analytics::compute_analytics(&expenses, month, year, window)?;

    if json {
        return print_json(&report);
    }

    println!();
    println!("📈 Analytics - {}", report.period);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total expense: {:.2}", report.total_expense);

    if !report.category_shares.is_empty() {
        println!();
        println!("   By category");
        for share in &report.category_shares {
            println!(
                "   {:<16} {} {:>10.2} ({:.0}%)",
                truncate(&share.category, 16),
                bar(share.share),
                share.amount,
                share.share * 100.0
            );
        }
    }

    println!();
    println!("   Trend");
    for point in &report.trend {
        println!(
            "   {} {} {} {:>10.2}",
            point.label,
            point.period.year,
            bar(point.scaled),
            point.amount
        );
    }

    println!();
    println!("   Insights");
    for insight in &report.insights {
        println!("   💡 {}", insight);
    }

    Ok(())
}
