// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

//! Shared helpers for calendar-date keys.
//!
//! Progress documents are keyed by UTC calendar date (`YYYY-MM-DD`), and the
//! streak walk uses the same clock. Mixing a UTC write key with a local-time
//! read would make a workout logged late in the evening count against the
//! wrong day.

use chrono::{Datelike, NaiveDate, Utc};

use crate::models::routine::Weekday;

/// Format a date as a progress document key (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a progress document key back into a date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Today's UTC calendar date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The plan weekday a given date falls on.
pub fn weekday_of(date: NaiveDate) -> Weekday {
    match date.weekday() {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
        chrono::Weekday::Sun => Weekday::Sunday,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date_key(date), "2024-01-05");
        assert_eq!(parse_date_key("2024-01-05"), Some(date));
    }

    #[test]
    fn test_parse_date_key_rejects_garbage() {
        assert_eq!(parse_date_key("not-a-date"), None);
        assert_eq!(parse_date_key("2024-13-01"), None);
        assert_eq!(parse_date_key(""), None);
    }

    #[test]
    fn test_weekday_of() {
        // 2024-01-01 was a Monday
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(weekday_of(date), Weekday::Monday);
        assert_eq!(weekday_of(date.succ_opt().unwrap()), Weekday::Tuesday);
    }
}
