//! Calendar-day helpers.
//!
//! Days are `chrono::NaiveDate` values throughout the crate; strings only
//! appear at the edges (CLI arguments, JSON files) and are parsed here.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{PlannerError, Result};

/// Date format accepted on input and produced on output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` string.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
        PlannerError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

/// Whether the day falls on Saturday or Sunday.
#[inline]
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Iterates every day in `[first, last]`. Empty when `first > last`.
pub fn days_inclusive(first: NaiveDate, last: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    first.iter_days().take_while(move |day| *day <= last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let day = parse_date("2024-03-09").unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(parse_date(" 2024-03-09 ").unwrap(), day);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("03/09/2024").unwrap_err();
        assert!(matches!(err, PlannerError::InvalidDate { ref input, .. } if input == "03/09/2024"));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_is_weekend() {
        // 2024-03-09 is a Saturday
        let sat = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert!(is_weekend(sat));
        assert!(is_weekend(sat.succ_opt().unwrap()));
        assert!(!is_weekend(sat.pred_opt().unwrap()));
    }

    #[test]
    fn test_days_inclusive() {
        let a = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days: Vec<_> = days_inclusive(a, b).collect();
        assert_eq!(days.len(), 3); // leap day included
        assert_eq!(days_inclusive(b, a).count(), 0);
        assert_eq!(days_inclusive(a, a).count(), 1);
    }
}
