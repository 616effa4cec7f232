//! Calendar arithmetic on plain dates
//!
//! These helpers never touch a clock or a timezone. Month arguments are
//! 1-based here; the 0-based month index used by the month boundary
//! operations is converted with [`normalize_month_index`].

use chrono::{Days, NaiveDate, NaiveDateTime};

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Gregorian leap-year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a 1-based month, or `None` when `month` is not 1..=12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    };
    Some(days)
}

/// Resolve a 0-based month index that may overflow into neighbouring years
///
/// Returns `(year, month)` with a 1-based month, so `(2024, 12)` becomes
/// `(2025, 1)` and `(2024, -1)` becomes `(2023, 12)`.
pub fn normalize_month_index(year: i32, month_index: i32) -> Option<(i32, u32)> {
    let year = year.checked_add(month_index.div_euclid(12))?;
    let month = month_index.rem_euclid(12) as u32 + 1;
    Some((year, month))
}

/// First calendar day of a 1-based month
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last calendar day of a 1-based month
pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)
}

/// Shift a wall-clock date-time by whole calendar days, keeping the time of day
pub fn shift_days(dt: NaiveDateTime, delta: i64) -> Option<NaiveDateTime> {
    let days = Days::new(delta.unsigned_abs());
    if delta >= 0 {
        dt.checked_add_days(days)
    } else {
        dt.checked_sub_days(days)
    }
}

/// Whole calendar days from `start` to `end`, negative when `end` is earlier
pub fn gap_days(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}
