//! Financial aggregation engine
//!
//! Pure functions that turn transactions (and budgets) into the summaries
//! shown by the dashboard, budget and analytics screens. Nothing here touches
//! the database or holds state; callers fetch rows and pass them in.
//!
//! ## Components
//!
//! - **period** - same-day and in-month tests, calendar month arithmetic
//! - **aggregate** - per-category sums under a kind/period selection
//! - **budget** - budget progress for a month
//! - **trend** - trailing per-month totals scaled for charts
//! - **insights** - top category and month-over-month observations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::analytics;
//!
//! let txs = db.list_transactions(user.id, &TransactionFilter::default())?;
//! let report = analytics::compute_analytics(&txs, 3, 2024, analytics::DEFAULT_TREND_WIDTH)?;
//! for insight in &report.insights {
//!     println!("{}", insight);
//! }
//! ```

pub mod aggregate;
pub mod budget;
pub mod dashboard;
pub mod insights;
pub mod period;
pub mod trend;
pub mod types;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::{Budget, Transaction, TransactionKind};

pub use aggregate::{aggregate_by_category, total, CategoryTotal, CategoryTotals, Selection};
pub use budget::budget_progress;
pub use dashboard::{RECENT_TRANSACTION_LIMIT, TOP_CATEGORY_LIMIT};
pub use insights::{generate_insights, Insight};
pub use period::{is_in_month, is_same_day, MonthPeriod, PeriodFilter, MAX_YEAR, MIN_YEAR};
pub use trend::{build_trend, DEFAULT_TREND_WIDTH, MAX_TREND_WIDTH};
pub use types::{
    AnalyticsReport, BudgetOverview, BudgetProgress, CategoryExpense, CategoryShare,
    DashboardSummary, PeriodTotal,
};

/// Chart colors handed out to categories by rank, wrapping after the last
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#EF5350", "#EC407A", "#AB47BC", "#7E57C2", "#5C6BC0", "#42A5F5", "#29B6F6", "#26C6DA",
    "#26A69A", "#66BB6A",
];

/// Budget progress for every budget against the expenses of `month`/`year`
pub fn compute_budget_progress(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> Result<BudgetOverview> {
    let period = MonthPeriod::new(year, month)?;
    let expenses = aggregate_by_category(
        transactions,
        &Selection::kind_in_month(TransactionKind::Expense, period),
    );
    Ok(budget_progress(budgets, &expenses, period))
}

/// Dashboard figures for the day `now` falls on and for `month`/`year`
pub fn compute_dashboard(
    transactions: &[Transaction],
    now: NaiveDateTime,
    month: u32,
    year: i32,
) -> Result<DashboardSummary> {
    let period = MonthPeriod::new(year, month)?;
    Ok(dashboard::dashboard_summary(
        transactions,
        now.date(),
        period,
    ))
}

/// Category breakdown, `width`-month trend and insights for `month`/`year`
pub fn compute_analytics(
    transactions: &[Transaction],
    month: u32,
    year: i32,
    width: u32,
) -> Result<AnalyticsReport> {
    let period = MonthPeriod::new(year, month)?;
    let trend = build_trend(transactions, TransactionKind::Expense, period, width)?;

    let expenses = aggregate_by_category(
        transactions,
        &Selection::kind_in_month(TransactionKind::Expense, period),
    );
    let total_expense = expenses.total();
    let category_shares: Vec<CategoryShare> = expenses
        .sorted_by_amount()
        .into_iter()
        .enumerate()
        .map(|(rank, c)| CategoryShare {
            share: types::ratio(c.amount, total_expense),
            color: CATEGORY_PALETTE[rank % CATEGORY_PALETTE.len()].to_string(),
            category: c.category,
            amount: c.amount,
        })
        .collect();

    let insights = generate_insights(&category_shares, &trend);

    Ok(AnalyticsReport {
        period,
        total_expense,
        category_shares,
        trend,
        insights,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::str::FromStr;

    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    use crate::models::{Budget, Transaction, TransactionKind};

    pub fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// A transaction at noon on `date`
    pub fn tx(
        id: i64,
        category: &str,
        amount: &str,
        kind: TransactionKind,
        date: (i32, u32, u32),
    ) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            account_id: 1,
            amount: dec(amount),
            category: category.to_string(),
            occurred_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            note: None,
            kind,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn budget(id: i64, category: &str, amount: &str, month: u32, year: i32) -> Budget {
        Budget {
            id,
            user_id: 1,
            category: category.to_string(),
            amount: dec(amount),
            month,
            year,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
