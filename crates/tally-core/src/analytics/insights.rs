//! Plain-language observations about a month's spending

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{CategoryShare, PeriodTotal};

/// A structured observation. `Display` renders the user-facing sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// The category with the largest share of the month
    TopCategory { category: String, share: f64 },
    /// Spending rose compared with the month before
    SpendingIncreased {
        percent: f64,
        current: Decimal,
        previous: Decimal,
    },
    /// Spending fell compared with the month before
    SpendingDecreased { current: Decimal, previous: Decimal },
    NoExpenses,
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopCategory { category, share } => write!(
                f,
                "You spent the most on {} this month ({}%).",
                category,
                (share * 100.0) as i64
            ),
            Self::SpendingIncreased { percent, .. } => write!(
                f,
                "Spending increased by {}% compared to last month.",
                *percent as i64
            ),
            Self::SpendingDecreased { .. } => {
                write!(f, "Great job! You've spent less than last month.")
            }
            Self::NoExpenses => write!(f, "No expenses recorded for this month yet."),
        }
    }
}

/// Derive insights from a month's category shares and the trend window that
/// ends at that month
///
/// The comparison month is the trend entry just before the last one. No
/// comparison is made when there is no such entry or it recorded nothing.
pub fn generate_insights(shares: &[CategoryShare], trend: &[PeriodTotal]) -> Vec<Insight> {
    let current: Decimal = shares.iter().map(|s| s.amount).sum();
    if current <= Decimal::ZERO {
        return vec![Insight::NoExpenses];
    }

    let mut insights = Vec::new();

    // Strictly larger wins, so the earliest of equal amounts stays on top
    let mut top: Option<&CategoryShare> = None;
    for share in shares {
        if top.map_or(true, |t| share.amount > t.amount) {
            top = Some(share);
        }
    }
    if let Some(top) = top {
        insights.push(Insight::TopCategory {
            category: top.category.clone(),
            share: top.share,
        });
    }

    let previous = trend
        .len()
        .checked_sub(2)
        .and_then(|i| trend.get(i))
        .map(|p| p.amount)
        .unwrap_or(Decimal::ZERO);

    if previous > Decimal::ZERO {
        if current > previous {
            let percent = ((current - previous) / previous * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0);
            insights.push(Insight::SpendingIncreased {
                percent,
                current,
                previous,
            });
        } else if current < previous {
            insights.push(Insight::SpendingDecreased { current, previous });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::period::MonthPeriod;
    use crate::analytics::test_support::dec;

    fn share(category: &str, amount: &str, share: f64) -> CategoryShare {
        CategoryShare {
            category: category.to_string(),
            amount: dec(amount),
            color: "#EF5350".to_string(),
            share,
        }
    }

    fn window(amounts: &[&str]) -> Vec<PeriodTotal> {
        let anchor = MonthPeriod::new(2024, 3).unwrap();
        let len = amounts.len() as i32;
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| {
                let period = anchor.offset(i as i32 - (len - 1));
                PeriodTotal {
                    period,
                    label: period.short_label().to_string(),
                    amount: dec(amount),
                    scaled: 0.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_no_expenses_only() {
        let insights = generate_insights(&[], &window(&["10", "20"]));
        assert_eq!(insights, vec![Insight::NoExpenses]);
        assert_eq!(
            insights[0].to_string(),
            "No expenses recorded for this month yet."
        );
    }

    #[test]
    fn test_top_category_and_increase() {
        let shares = vec![share("Rent", "60", 0.6), share("Food", "40", 0.4)];
        let insights = generate_insights(&shares, &window(&["0", "50", "100"]));

        assert_eq!(insights.len(), 2);
        assert_eq!(
            insights[0],
            Insight::TopCategory {
                category: "Rent".to_string(),
                share: 0.6
            }
        );
        match &insights[1] {
            Insight::SpendingIncreased {
                percent,
                current,
                previous,
            } => {
                assert_eq!(*percent, 100.0);
                assert_eq!(*current, dec("100"));
                assert_eq!(*previous, dec("50"));
            }
            other => panic!("expected increase, got {:?}", other),
        }
        assert_eq!(
            insights[0].to_string(),
            "You spent the most on Rent this month (60%)."
        );
        assert_eq!(
            insights[1].to_string(),
            "Spending increased by 100% compared to last month."
        );
    }

    #[test]
    fn test_decrease() {
        let shares = vec![share("Food", "30", 1.0)];
        let insights = generate_insights(&shares, &window(&["80", "30"]));
        assert_eq!(
            insights[1],
            Insight::SpendingDecreased {
                current: dec("30"),
                previous: dec("80")
            }
        );
        assert_eq!(
            insights[1].to_string(),
            "Great job! You've spent less than last month."
        );
    }

    #[test]
    fn test_no_comparison_when_previous_is_zero_or_equal() {
        let shares = vec![share("Food", "30", 1.0)];
        assert_eq!(generate_insights(&shares, &window(&["0", "30"])).len(), 1);
        assert_eq!(generate_insights(&shares, &window(&["30", "30"])).len(), 1);
        assert_eq!(generate_insights(&shares, &window(&["30"])).len(), 1);
        assert_eq!(generate_insights(&shares, &[]).len(), 1);
    }

    #[test]
    fn test_top_category_tie_keeps_first() {
        let shares = vec![
            share("Fuel", "50", 0.25),
            share("Food", "50", 0.25),
            share("Fun", "50", 0.25),
            share("Misc", "50", 0.25),
        ];
        let insights = generate_insights(&shares, &[]);
        assert_eq!(
            insights[0],
            Insight::TopCategory {
                category: "Fuel".to_string(),
                share: 0.25
            }
        );
    }

    #[test]
    fn test_percent_display_truncates() {
        let insight = Insight::SpendingIncreased {
            percent: 33.9,
            current: dec("134"),
            previous: dec("100"),
        };
        assert_eq!(
            insight.to_string(),
            "Spending increased by 33% compared to last month."
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(Insight::NoExpenses).unwrap();
        assert_eq!(json["kind"], "no_expenses");

        let json = serde_json::to_value(Insight::TopCategory {
            category: "Food".to_string(),
            share: 0.5,
        })
        .unwrap();
        assert_eq!(json["kind"], "top_category");
        assert_eq!(json["category"], "Food");
    }
}
