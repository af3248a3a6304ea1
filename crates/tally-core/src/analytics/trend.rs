//! Trailing per-month totals for trend charts

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::period::MonthPeriod;
use super::types::{ratio, PeriodTotal};
use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind};

/// Months shown in the analytics bar chart unless the caller asks otherwise
pub const DEFAULT_TREND_WIDTH: u32 = 6;

/// Widest trend window accepted (ten years)
pub const MAX_TREND_WIDTH: u32 = 120;

/// Totals of `kind` for the `width` months ending at `anchor`, oldest first
///
/// Each entry's `scaled` value is its amount over the window's largest
/// amount, or 0 for every entry when nothing was recorded.
pub fn build_trend(
    transactions: &[Transaction],
    kind: TransactionKind,
    anchor: MonthPeriod,
    width: u32,
) -> Result<Vec<PeriodTotal>> {
    if !(1..=MAX_TREND_WIDTH).contains(&width) {
        return Err(Error::InvalidArgument(format!(
            "trend window must span between 1 and {} months, got {}",
            MAX_TREND_WIDTH, width
        )));
    }
    let width = width as i32;
    // Re-validate in case the anchor was built with a struct literal
    let anchor = MonthPeriod::new(anchor.year, anchor.month)?;

    let first = anchor.offset(-(width - 1));
    let mut sums: HashMap<MonthPeriod, Decimal> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.kind == kind) {
        let period = MonthPeriod::of(tx.occurred_at);
        if period >= first && period <= anchor {
            *sums.entry(period).or_insert(Decimal::ZERO) += tx.amount;
        }
    }

    let amounts: Vec<(MonthPeriod, Decimal)> = (0..width)
        .map(|i| {
            let period = first.offset(i);
            (period, sums.get(&period).copied().unwrap_or(Decimal::ZERO))
        })
        .collect();

    let max = amounts
        .iter()
        .map(|(_, amount)| *amount)
        .max()
        .unwrap_or(Decimal::ZERO);

    Ok(amounts
        .into_iter()
        .map(|(period, amount)| PeriodTotal {
            period,
            label: period.short_label().to_string(),
            amount,
            scaled: ratio(amount, max),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{dec, tx};

    #[test]
    fn test_window_is_oldest_first_and_scaled_to_max() {
        let txs = vec![
            tx(1, "Food", "50", TransactionKind::Expense, (2024, 2, 10)),
            tx(2, "Food", "60", TransactionKind::Expense, (2024, 3, 10)),
            tx(3, "Rent", "40", TransactionKind::Expense, (2024, 3, 1)),
            tx(4, "Salary", "900", TransactionKind::Income, (2024, 3, 1)),
        ];
        let anchor = MonthPeriod::new(2024, 3).unwrap();
        let trend = build_trend(&txs, TransactionKind::Expense, anchor, 3).unwrap();

        let periods: Vec<String> = trend.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02", "2024-03"]);
        let amounts: Vec<Decimal> = trend.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![Decimal::ZERO, dec("50"), dec("100")]);
        let scaled: Vec<f64> = trend.iter().map(|p| p.scaled).collect();
        assert_eq!(scaled, vec![0.0, 0.5, 1.0]);
        assert_eq!(trend[2].label, "Mar");
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let txs = vec![
            tx(1, "Food", "10", TransactionKind::Expense, (2023, 11, 30)),
            tx(2, "Food", "20", TransactionKind::Expense, (2024, 2, 1)),
        ];
        let anchor = MonthPeriod::new(2024, 2).unwrap();
        let trend = build_trend(&txs, TransactionKind::Expense, anchor, 6).unwrap();

        assert_eq!(trend.len(), 6);
        assert_eq!(trend[0].period, MonthPeriod::new(2023, 9).unwrap());
        assert_eq!(trend[2].amount, dec("10"));
        assert_eq!(trend[2].scaled, 0.5);
        assert_eq!(trend[5].amount, dec("20"));
    }

    #[test]
    fn test_transactions_outside_window_are_ignored() {
        let txs = vec![
            tx(1, "Food", "999", TransactionKind::Expense, (2023, 1, 1)),
            tx(2, "Food", "999", TransactionKind::Expense, (2024, 4, 1)),
            tx(3, "Food", "5", TransactionKind::Expense, (2024, 3, 31)),
        ];
        let anchor = MonthPeriod::new(2024, 3).unwrap();
        let trend = build_trend(&txs, TransactionKind::Expense, anchor, 2).unwrap();
        assert_eq!(trend[0].amount, Decimal::ZERO);
        assert_eq!(trend[1].amount, dec("5"));
        assert_eq!(trend[1].scaled, 1.0);
    }

    #[test]
    fn test_all_zero_window_scales_to_zero() {
        let anchor = MonthPeriod::new(2024, 3).unwrap();
        let trend = build_trend(&[], TransactionKind::Expense, anchor, 4).unwrap();
        assert_eq!(trend.len(), 4);
        assert!(trend.iter().all(|p| p.scaled == 0.0 && p.amount.is_zero()));
    }

    #[test]
    fn test_scaled_values_stay_in_unit_range() {
        let txs = vec![
            tx(1, "A", "3", TransactionKind::Expense, (2024, 1, 5)),
            tx(2, "A", "7", TransactionKind::Expense, (2024, 2, 5)),
            tx(3, "A", "1", TransactionKind::Expense, (2024, 3, 5)),
        ];
        let anchor = MonthPeriod::new(2024, 3).unwrap();
        let trend = build_trend(&txs, TransactionKind::Expense, anchor, 3).unwrap();
        assert!(trend.iter().all(|p| (0.0..=1.0).contains(&p.scaled)));
        assert!(trend.iter().any(|p| p.scaled == 1.0));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let anchor = MonthPeriod::new(2024, 3).unwrap();
        let err = build_trend(&[], TransactionKind::Expense, anchor, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_oversized_width_is_rejected() {
        let anchor = MonthPeriod::new(2024, 3).unwrap();
        for width in [MAX_TREND_WIDTH + 1, 3_000_000_000, u32::MAX] {
            let err = build_trend(&[], TransactionKind::Expense, anchor, width).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "width {}", width);
        }

        let widest = build_trend(&[], TransactionKind::Expense, anchor, MAX_TREND_WIDTH).unwrap();
        assert_eq!(widest.len(), MAX_TREND_WIDTH as usize);
        assert_eq!(widest[0].period, MonthPeriod::new(2014, 4).unwrap());
    }

    #[test]
    fn test_invalid_anchor_is_rejected() {
        let anchor = MonthPeriod {
            year: 2024,
            month: 13,
        };
        assert!(build_trend(&[], TransactionKind::Expense, anchor, 3).is_err());

        let far_future = MonthPeriod {
            year: i32::MAX,
            month: 6,
        };
        let err = build_trend(&[], TransactionKind::Expense, far_future, 3).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
