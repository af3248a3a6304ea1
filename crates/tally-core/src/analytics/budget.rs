//! Budget progress: joins budgets with the spend recorded in their month

use rust_decimal::Decimal;

use super::aggregate::CategoryTotals;
use super::period::MonthPeriod;
use super::types::{ratio, BudgetOverview, BudgetProgress};
use crate::models::Budget;

/// Match each budget to the period's per-category expense totals
///
/// Budgets keep their input order and are not filtered by their own
/// month/year; callers pass the budgets they want evaluated. A budget whose
/// label matches no expense shows zero spend.
pub fn budget_progress(
    budgets: &[Budget],
    expenses: &CategoryTotals,
    period: MonthPeriod,
) -> BudgetOverview {
    let progress: Vec<BudgetProgress> = budgets
        .iter()
        .map(|budget| {
            let spent = expenses.get(&budget.category);
            BudgetProgress {
                budget: budget.clone(),
                spent,
                ratio: ratio(spent, budget.amount),
            }
        })
        .collect();

    let total_limit: Decimal = budgets.iter().map(|b| b.amount).sum();

    BudgetOverview {
        period,
        budgets: progress,
        total_limit,
        total_spent: expenses.total(),
    }
}
