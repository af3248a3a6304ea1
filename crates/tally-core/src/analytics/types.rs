//! Derived summary records produced by the aggregation engine

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::insights::Insight;
use super::period::MonthPeriod;
use crate::models::{Budget, Transaction};

/// One budget joined with what was spent against it in its period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub budget: Budget,
    pub spent: Decimal,
    /// spent / limit; may exceed 1.0 when over budget, 0 when the limit is not positive
    pub ratio: f64,
}

impl BudgetProgress {
    pub fn is_over_budget(&self) -> bool {
        self.budget.amount > Decimal::ZERO && self.spent > self.budget.amount
    }

    /// Limit minus spend, negative once over budget
    pub fn remaining(&self) -> Decimal {
        self.budget.amount - self.spent
    }
}

/// All budgets for a period plus the period's totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub period: MonthPeriod,
    pub budgets: Vec<BudgetProgress>,
    /// Sum of every budget's limit
    pub total_limit: Decimal,
    /// All expenses in the period, budgeted or not
    pub total_spent: Decimal,
}

/// One bar of a trend window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub period: MonthPeriod,
    /// Short month name for chart axes
    pub label: String,
    pub amount: Decimal,
    /// amount / largest amount in the window
    pub scaled: f64,
}

/// A category's slice of a period total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Hex color token, assigned by rank
    pub color: String,
    /// amount / period total
    pub share: f64,
}

/// A dashboard bar: a category's spend relative to the largest category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: Decimal,
    /// amount / largest category amount
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub period: MonthPeriod,
    pub today_income: Decimal,
    pub today_expense: Decimal,
    pub month_income: Decimal,
    pub month_expense: Decimal,
    pub top_categories: Vec<CategoryExpense>,
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub period: MonthPeriod,
    pub total_expense: Decimal,
    pub category_shares: Vec<CategoryShare>,
    /// Oldest first, ending at `period`
    pub trend: Vec<PeriodTotal>,
    pub insights: Vec<Insight>,
}

/// `numerator / denominator` as a float, 0 when the denominator is not positive
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> f64 {
    if denominator <= Decimal::ZERO {
        return 0.0;
    }
    numerator
        .checked_div(denominator)
        .and_then(|r| r.to_f64())
        .unwrap_or(0.0)
}
