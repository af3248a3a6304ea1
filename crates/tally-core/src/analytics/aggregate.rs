//! Grouping and summing transactions by category

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::period::{MonthPeriod, PeriodFilter};
use crate::models::{Transaction, TransactionKind};

/// Which transactions an aggregation looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// `None` keeps every kind
    pub kind: Option<TransactionKind>,
    pub period: PeriodFilter,
}

impl Selection {
    pub fn new(kind: Option<TransactionKind>, period: PeriodFilter) -> Self {
        Self { kind, period }
    }

    /// Transactions of `kind` in calendar month `period`
    pub fn kind_in_month(kind: TransactionKind, period: MonthPeriod) -> Self {
        Self::new(Some(kind), PeriodFilter::Month(period))
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.kind.map_or(true, |kind| tx.kind == kind) && self.period.matches(tx.occurred_at)
    }
}

/// Sum and count for one category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

/// Per-category sums in first-appearance order
///
/// Labels are compared byte for byte: "Food", "food" and "Food " are three
/// different groups.
#[derive(Debug, Clone, Default)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
    total: Decimal,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Decimal) {
        match self.index.get(category) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.amount += amount;
                entry.count += 1;
            }
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    amount,
                    count: 1,
                });
            }
        }
        self.total += amount;
    }

    /// Entries in the order their category first appeared in the input
    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    /// Grand total across all categories
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Amount for `category`, zero when it never appeared
    pub fn get(&self, category: &str) -> Decimal {
        self.index
            .get(category)
            .map(|&i| self.entries[i].amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Entries by amount, largest first. Equal amounts keep first-appearance
    /// order.
    pub fn sorted_by_amount(&self) -> Vec<CategoryTotal> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group the selected transactions by category label and sum their amounts
pub fn aggregate_by_category(transactions: &[Transaction], selection: &Selection) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for tx in transactions.iter().filter(|tx| selection.matches(tx)) {
        totals.add(&tx.category, tx.amount);
    }
    totals
}

/// Sum of the selected transactions' amounts
pub fn total(transactions: &[Transaction], selection: &Selection) -> Decimal {
    transactions
        .iter()
        .filter(|tx| selection.matches(tx))
        .map(|tx| tx.amount)
        .sum()
}
