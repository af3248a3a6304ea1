//! Home-screen summary: today's and this month's flows, top spending
//! categories and the latest activity

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::aggregate::{aggregate_by_category, total, Selection};
use super::period::{MonthPeriod, PeriodFilter};
use super::types::{ratio, CategoryExpense, DashboardSummary};
use crate::models::{Transaction, TransactionKind};

/// Number of expense categories shown on the dashboard
pub const TOP_CATEGORY_LIMIT: usize = 5;

/// Number of recent transactions shown on the dashboard
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

pub(crate) fn dashboard_summary(
    transactions: &[Transaction],
    today: NaiveDate,
    period: MonthPeriod,
) -> DashboardSummary {
    let day = PeriodFilter::Day(today);
    let month = PeriodFilter::Month(period);

    let expenses =
        aggregate_by_category(transactions, &Selection::kind_in_month(TransactionKind::Expense, period));
    let top = expenses.sorted_by_amount();
    let largest = top.first().map(|c| c.amount).unwrap_or(Decimal::ZERO);
    let top_categories = top
        .into_iter()
        .take(TOP_CATEGORY_LIMIT)
        .map(|c| CategoryExpense {
            fraction: ratio(c.amount, largest),
            category: c.category,
            amount: c.amount,
        })
        .collect();

    DashboardSummary {
        date: today,
        period,
        today_income: total(
            transactions,
            &Selection::new(Some(TransactionKind::Income), day),
        ),
        today_expense: total(
            transactions,
            &Selection::new(Some(TransactionKind::Expense), day),
        ),
        month_income: total(
            transactions,
            &Selection::new(Some(TransactionKind::Income), month),
        ),
        month_expense: expenses.total(),
        top_categories,
        recent_transactions: most_recent(transactions, RECENT_TRANSACTION_LIMIT),
    }
}

/// The `limit` newest transactions, newest first. Id breaks timestamp ties so
/// the order is stable.
fn most_recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{dec, tx};

    #[test]
    fn test_most_recent_orders_newest_first() {
        let txs = vec![
            tx(1, "A", "1", TransactionKind::Expense, (2024, 3, 1)),
            tx(2, "A", "1", TransactionKind::Expense, (2024, 3, 5)),
            tx(3, "A", "1", TransactionKind::Expense, (2024, 3, 5)),
            tx(4, "A", "1", TransactionKind::Expense, (2024, 2, 28)),
        ];
        let ids: Vec<i64> = most_recent(&txs, 3).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_top_categories_are_capped_and_relative_to_largest() {
        let txs: Vec<Transaction> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let amount = ((i + 1) * 10).to_string();
                tx(i as i64, name, &amount, TransactionKind::Expense, (2024, 3, 2))
            })
            .collect();
        let summary = dashboard_summary(
            &txs,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            MonthPeriod::new(2024, 3).unwrap(),
        );

        assert_eq!(summary.top_categories.len(), TOP_CATEGORY_LIMIT);
        assert_eq!(summary.top_categories[0].category, "F");
        assert_eq!(summary.top_categories[0].fraction, 1.0);
        assert_eq!(summary.top_categories[4].category, "B");
        assert_eq!(summary.top_categories[4].amount, dec("20"));
        assert_eq!(summary.month_expense, dec("210"));
        assert_eq!(summary.today_expense, dec("210"));
    }
}
