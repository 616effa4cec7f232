//! Free-function date helpers
//!
//! Each function delegates to one process-wide [`DateFormatter`] that reads
//! the system clock, renders in the local timezone and uses the default
//! (Chinese) label table. Build a [`DateFormatter`] directly for another
//! timezone, label table or an injected clock.

use crate::clock::SystemClock;
use crate::error::Result;
use crate::formatter::DateFormatter;
use chrono::{DateTime, Local, TimeZone};
use once_cell::sync::Lazy;

static DEFAULT_FORMATTER: Lazy<DateFormatter<SystemClock, Local>> = Lazy::new(DateFormatter::new);

/// The shared formatter behind the free functions
pub fn formatter() -> &'static DateFormatter<SystemClock, Local> {
    &DEFAULT_FORMATTER
}

/// Format the current local time with `pattern`
pub fn current_formatted(pattern: &str) -> Result<String> {
    formatter().current_formatted(pattern)
}

/// Current time as whole epoch seconds
pub fn current_epoch_seconds() -> String {
    formatter().current_epoch_seconds()
}

pub fn current_year() -> String {
    formatter().current_year()
}

pub fn current_month() -> String {
    formatter().current_month()
}

pub fn current_day() -> String {
    formatter().current_day()
}

/// Parse `text` with `pattern` into epoch seconds
pub fn parse_to_epoch_seconds(text: &str, pattern: &str) -> Result<String> {
    formatter().parse_to_epoch_seconds(text, pattern)
}

pub fn parse_to_epoch_seconds_i64(text: &str, pattern: &str) -> Result<i64> {
    formatter().parse_to_epoch_seconds_i64(text, pattern)
}

/// Render an epoch-second stamp with `pattern`
pub fn epoch_seconds_to_formatted(stamp: &str, pattern: &str) -> Result<String> {
    formatter().epoch_seconds_to_formatted(stamp, pattern)
}

/// Render an epoch-millisecond value with `pattern`
pub fn format_epoch_millis(millis: i64, pattern: &str) -> Result<String> {
    formatter().format_epoch_millis(millis, pattern)
}

pub fn parse_date_time(text: &str) -> Result<DateTime<Local>> {
    formatter().parse_date_time(text)
}

pub fn iso_to_date(text: &str) -> Result<String> {
    formatter().iso_to_date(text)
}

/// Today shifted by `delta_days` as `yyyy.MM.dd`
pub fn add_days_from_now(delta_days: i64) -> Result<String> {
    formatter().add_days_from_now(delta_days)
}

pub fn add_days(stamp: &str, delta_days: i64, pattern: &str) -> Result<String> {
    formatter().add_days(stamp, delta_days, pattern)
}

pub fn add_days_stamp(stamp: &str, delta_days: i64) -> Result<String> {
    formatter().add_days_stamp(stamp, delta_days)
}

/// First day of a month; `month_index` is 0-based
pub fn first_day_of_month(year: i32, month_index: i32) -> Result<String> {
    formatter().first_day_of_month(year, month_index)
}

/// Last day of a month; `month_index` is 0-based
pub fn last_day_of_month(year: i32, month_index: i32) -> Result<String> {
    formatter().last_day_of_month(year, month_index)
}

/// Days in a month; `month` is 1-based
pub fn days_in_month(year: i32, month: i32) -> Result<u32> {
    formatter().days_in_month(year, month)
}

pub fn year_of(stamp: &str) -> Result<i32> {
    formatter().year_of(stamp)
}

/// 0-based month of an epoch-second stamp
pub fn month_index_of(stamp: &str) -> Result<u32> {
    formatter().month_index_of(stamp)
}

pub fn day_of(stamp: &str) -> Result<u32> {
    formatter().day_of(stamp)
}

pub fn weekday_label(stamp: &str) -> Result<&'static str> {
    formatter().weekday_label(stamp)
}

pub fn weekday_label_for_date(text: &str) -> Result<&'static str> {
    formatter().weekday_label_for_date(text)
}

pub fn format_with_weekday(stamp: &str, pattern: &str) -> Result<String> {
    formatter().format_with_weekday(stamp, pattern)
}

/// Chat-style recency label for an epoch-millisecond instant
pub fn relative_label(epoch_millis: i64) -> Result<String> {
    formatter().relative_label(epoch_millis)
}

/// Note-style label for an epoch-second stamp
pub fn contextual_label(stamp: &str) -> Result<String> {
    formatter().contextual_label(stamp)
}

/// Whole local calendar days between two instants
pub fn gap_in_days<T: TimeZone>(start: &DateTime<T>, end: &DateTime<T>) -> i64 {
    formatter().gap_in_days(start, end)
}
