//! Report period representation
//!
//! A period is an inclusive calendar date range. Weekly, monthly, and yearly
//! ranges are aligned from a caller-supplied reference date; nothing here
//! reads the wall clock, so report generation stays reproducible.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar dates
///
/// A range with `end` before `start` is valid and contains no dates. Custom
/// report ranges are taken as given, so an inverted pair produces an empty
/// report rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive)
    pub start: NaiveDate,

    /// Last day of the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a custom range from explicit endpoints, without reordering
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar week containing `reference`
    ///
    /// Weeks run Sunday through Saturday: the range starts on the most
    /// recent Sunday at or before the reference date.
    pub fn week_of(reference: NaiveDate) -> Self {
        let days_past_sunday = reference.weekday().num_days_from_sunday() as i64;
        let start = reference - Duration::days(days_past_sunday);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// The calendar month containing `reference`
    pub fn month_of(reference: NaiveDate) -> Self {
        let (year, month) = (reference.year(), reference.month());
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(reference);
        // Last day of the month: first of the next month, minus a day
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next_month
            .map(|first| first - Duration::days(1))
            .unwrap_or(reference);
        Self { start, end }
    }

    /// The calendar year containing `reference`
    pub fn year_of(reference: NaiveDate) -> Self {
        let year = reference.year();
        Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(reference),
            end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(reference),
        }
    }

    /// Check if a date falls within this range (inclusive on both ends)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Check if the range contains no dates at all
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_week_of_midweek_reference() {
        // 2024-03-13 is a Wednesday; the week starts the preceding Sunday
        let range = DateRange::week_of(date(2024, 3, 13));
        assert_eq!(range.start, date(2024, 3, 10));
        assert_eq!(range.end, date(2024, 3, 16));
    }

    #[test]
    fn test_week_of_sunday_reference() {
        // A Sunday reference starts its own week
        let range = DateRange::week_of(date(2024, 3, 10));
        assert_eq!(range.start, date(2024, 3, 10));
        assert_eq!(range.end, date(2024, 3, 16));
    }

    #[test]
    fn test_week_boundary_membership() {
        let range = DateRange::week_of(date(2024, 3, 13));
        // The Sunday itself is in, the Saturday before is out
        assert!(range.contains(date(2024, 3, 10)));
        assert!(!range.contains(date(2024, 3, 9)));
        // The closing Saturday is in, the next Sunday is out
        assert!(range.contains(date(2024, 3, 16)));
        assert!(!range.contains(date(2024, 3, 17)));
    }

    #[test]
    fn test_month_of() {
        let range = DateRange::month_of(date(2024, 3, 15));
        assert_eq!(range.start, date(2024, 3, 1));
        assert_eq!(range.end, date(2024, 3, 31));
    }

    #[test]
    fn test_month_of_leap_february() {
        let range = DateRange::month_of(date(2024, 2, 10));
        assert_eq!(range.end, date(2024, 2, 29));

        let range = DateRange::month_of(date(2023, 2, 10));
        assert_eq!(range.end, date(2023, 2, 28));
    }

    #[test]
    fn test_month_of_december() {
        let range = DateRange::month_of(date(2023, 12, 25));
        assert_eq!(range.start, date(2023, 12, 1));
        assert_eq!(range.end, date(2023, 12, 31));
    }

    #[test]
    fn test_year_of() {
        let range = DateRange::year_of(date(2024, 6, 15));
        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 12, 31));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::month_of(date(2024, 3, 15));
        assert!(range.contains(date(2024, 3, 1)));
        assert!(range.contains(date(2024, 3, 31)));
        assert!(!range.contains(date(2024, 2, 29)));
        assert!(!range.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_adjacent_months_do_not_overlap() {
        let march = DateRange::month_of(date(2024, 3, 15));
        let april = DateRange::month_of(date(2024, 4, 15));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!april.contains(date(2024, 3, 31)));
        assert!(april.contains(date(2024, 4, 1)));
        assert!(!march.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_inverted_custom_range_is_empty() {
        let range = DateRange::custom(date(2024, 4, 1), date(2024, 3, 1));
        assert!(range.is_empty());
        assert!(!range.contains(date(2024, 3, 15)));
        assert!(!range.contains(date(2024, 4, 1)));
        assert!(!range.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_single_day_custom_range() {
        let range = DateRange::custom(date(2024, 3, 15), date(2024, 3, 15));
        assert!(!range.is_empty());
        assert!(range.contains(date(2024, 3, 15)));
        assert!(!range.contains(date(2024, 3, 14)));
        assert!(!range.contains(date(2024, 3, 16)));
    }

    #[test]
    fn test_serialization() {
        let range = DateRange::month_of(date(2024, 3, 15));
        let json = serde_json::to_string(&range).unwrap();
        let deserialized: DateRange = serde_json::from_str(&json).unwrap();
        assert_eq!(range, deserialized);
    }
}
