//! Calendar period classification
//!
//! All timestamps are local calendar times. A timestamp at exactly midnight
//! belongs to the day (and month) that starts at that instant.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Earliest year a `MonthPeriod` accepts
pub const MIN_YEAR: i32 = 1;

/// Latest year a `MonthPeriod` accepts
pub const MAX_YEAR: i32 = 9999;

/// True when both timestamps fall on the same calendar day
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// True when `t` falls in calendar `month` (1-12) of `year`
pub fn is_in_month(t: NaiveDateTime, month: u32, year: i32) -> bool {
    t.year() == year && t.month() == month
}

/// A calendar month of a specific year
///
/// Orders chronologically (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    /// 1 = January
    pub month: u32,
}

impl MonthPeriod {
    /// Build a period, rejecting months outside 1..=12 and years outside
    /// `MIN_YEAR..=MAX_YEAR`
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidArgument(format!(
                "year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, year
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidArgument(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing `t`
    pub fn of(t: NaiveDateTime) -> Self {
        Self {
            year: t.year(),
            month: t.month(),
        }
    }

    /// Shift by `months` (negative moves into the past), crossing year
    /// boundaries as needed
    ///
    /// The year saturates at the ends of the `i32` range.
    pub fn offset(&self, months: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = index
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Self {
            year: year as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// The month immediately before this one
    pub fn pred(&self) -> Self {
        self.offset(-1)
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        is_in_month(t, self.month, self.year)
    }

    /// Three-letter month name, e.g. "Mar"
    pub fn short_label(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month as usize + 11) % 12]
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Which timestamps a selection keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
    /// No time restriction
    Any,
    /// Only timestamps on this calendar day
    Day(NaiveDate),
    /// Only timestamps in this calendar month
    Month(MonthPeriod),
}

impl PeriodFilter {
    pub fn matches(&self, t: NaiveDateTime) -> bool {
        match self {
            Self::Any => true,
            Self::Day(day) => t.date() == *day,
            Self::Month(period) => period.contains(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_same_day_is_reflexive_and_symmetric() {
        let a = at(2024, 3, 10, 8, 0, 0);
        let b = at(2024, 3, 10, 23, 59, 59);
        assert!(is_same_day(a, a));
        assert!(is_same_day(a, b));
        assert!(is_same_day(b, a));
    }

    #[test]
    fn test_midnight_belongs_to_the_day_it_starts() {
        let midnight = at(2024, 3, 11, 0, 0, 0);
        let late = at(2024, 3, 10, 23, 59, 59);
        assert!(!is_same_day(midnight, late));
        assert!(is_same_day(midnight, at(2024, 3, 11, 12, 0, 0)));

        let first_of_april = at(2024, 4, 1, 0, 0, 0);
        assert!(is_in_month(first_of_april, 4, 2024));
        assert!(!is_in_month(first_of_april, 3, 2024));
    }

    #[test]
    fn test_same_day_different_year_is_not_same() {
        assert!(!is_same_day(at(2023, 3, 10, 9, 0, 0), at(2024, 3, 10, 9, 0, 0)));
        assert!(!is_in_month(at(2023, 3, 10, 9, 0, 0), 3, 2024));
    }

    #[test]
    fn test_month_period_rejects_bad_month() {
        assert!(MonthPeriod::new(2024, 0).is_err());
        assert!(MonthPeriod::new(2024, 13).is_err());
        assert!(MonthPeriod::new(2024, 12).is_ok());
    }

    #[test]
    fn test_month_period_rejects_out_of_range_year() {
        assert!(matches!(
            MonthPeriod::new(200_000_000, 3),
            Err(Error::InvalidArgument(_))
        ));
        assert!(MonthPeriod::new(MAX_YEAR + 1, 1).is_err());
        assert!(MonthPeriod::new(MIN_YEAR - 1, 12).is_err());
        assert!(MonthPeriod::new(i32::MIN, 1).is_err());
        assert!(MonthPeriod::new(MIN_YEAR, 1).is_ok());
        assert!(MonthPeriod::new(MAX_YEAR, 12).is_ok());
    }

    #[test]
    fn test_offset_crosses_year_boundaries() {
        let jan = MonthPeriod::new(2024, 1).unwrap();
        assert_eq!(jan.pred(), MonthPeriod::new(2023, 12).unwrap());
        assert_eq!(jan.offset(-13), MonthPeriod::new(2022, 12).unwrap());
        assert_eq!(jan.offset(11), MonthPeriod::new(2024, 12).unwrap());
        assert_eq!(jan.offset(12), MonthPeriod::new(2025, 1).unwrap());
        assert_eq!(jan.offset(0), jan);
    }

    #[test]
    fn test_offset_does_not_overflow_at_extreme_years() {
        let far = MonthPeriod {
            year: i32::MAX,
            month: 12,
        };
        assert_eq!(far.offset(1).year, i32::MAX);
        assert_eq!(far.offset(-12), MonthPeriod { year: i32::MAX - 1, month: 12 });

        let early = MonthPeriod {
            year: i32::MIN,
            month: 1,
        };
        assert_eq!(early.pred().year, i32::MIN);
    }

    #[test]
    fn test_labels_and_ordering() {
        let mar = MonthPeriod::new(2024, 3).unwrap();
        assert_eq!(mar.short_label(), "Mar");
        assert_eq!(MonthPeriod::new(2024, 12).unwrap().short_label(), "Dec");
        assert_eq!(mar.to_string(), "2024-03");
        assert!(MonthPeriod::new(2023, 12).unwrap() < mar);
    }

    #[test]
    fn test_period_filter_matches() {
        let t = at(2024, 3, 10, 14, 0, 0);
        assert!(PeriodFilter::Any.matches(t));
        assert!(PeriodFilter::Day(t.date()).matches(t));
        assert!(!PeriodFilter::Day(at(2024, 3, 9, 0, 0, 0).date()).matches(t));
        assert!(PeriodFilter::Month(MonthPeriod::of(t)).matches(t));
        assert!(!PeriodFilter::Month(MonthPeriod::new(2024, 2).unwrap()).matches(t));
    }
}
