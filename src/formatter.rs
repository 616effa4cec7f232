//! Date formatting, parsing and calendar arithmetic
//!
//! [`DateFormatter`] bundles a [`Clock`], a timezone and a [`Labels`] table.
//! Every operation is a pure function of its arguments and one clock
//! reading, so the same formatter can be shared freely between threads.
//!
//! # Units
//!
//! Timestamps are epoch **seconds** everywhere except
//! [`relative_label`](DateFormatter::relative_label) and
//! [`format_epoch_millis`](DateFormatter::format_epoch_millis), which take
//! epoch **milliseconds**. Stamps passed as strings must be plain integers.
//!
//! # Month conventions
//!
//! [`first_day_of_month`](DateFormatter::first_day_of_month),
//! [`last_day_of_month`](DateFormatter::last_day_of_month) and
//! [`month_index_of`](DateFormatter::month_index_of) use a **0-based** month
//! index (0 = January). [`days_in_month`](DateFormatter::days_in_month) takes
//! a **1-based** month (1 = January).

use crate::clock::{Clock, SystemClock};
use crate::constants::{
    DOTTED_DATE, HOUR_MILLIS, HOUR_MINUTE, ISO_LOCAL_DATE_TIME, MINUTE_MILLIS, MONTH_BOUNDARY, MONTH_DAY_TIME,
    YEAR_MONTH_DAY, YEAR_MONTH_DAY_MINUTE, YEAR_MONTH_DAY_TIME,
};
use crate::error::{DateError, Result};
use crate::labels::Labels;
use crate::pattern::Pattern;
use crate::utils::date;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Stateless date helper bound to a clock, a timezone and a label table
#[derive(Debug, Clone)]
pub struct DateFormatter<C = SystemClock, Tz = Local> {
    clock: C,
    tz: Tz,
    labels: Labels,
}

impl DateFormatter<SystemClock, Local> {
    /// Formatter over the system clock and the local timezone with default labels
    pub fn new() -> Self {
        Self::with_parts(SystemClock, Local, Labels::default())
    }
}

impl Default for DateFormatter<SystemClock, Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, Tz: TimeZone> DateFormatter<C, Tz> {
    pub fn with_parts(clock: C, tz: Tz, labels: Labels) -> Self {
        Self { clock, tz, labels }
    }

    /// Replace the label table
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current instant in the formatter's timezone
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.tz)
    }

    /// Instant for an epoch-second count
    pub fn instant_at_seconds(&self, seconds: i64) -> Result<DateTime<Tz>> {
        DateTime::from_timestamp(seconds, 0)
            .map(|utc| utc.with_timezone(&self.tz))
            .ok_or(DateError::OutOfRange)
    }

    /// Instant for an epoch-millisecond count
    pub fn instant_at_millis(&self, millis: i64) -> Result<DateTime<Tz>> {
        DateTime::from_timestamp_millis(millis)
            .map(|utc| utc.with_timezone(&self.tz))
            .ok_or(DateError::OutOfRange)
    }

    /// Attach the formatter's timezone to a wall-clock date-time
    ///
    /// Ambiguous times resolve to the earlier instant. Times inside a
    /// daylight-saving gap move forward by one hour.
    pub fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
        if let Some(dt) = self.tz.from_local_datetime(&naive).earliest() {
            return Ok(dt);
        }
        naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|shifted| self.tz.from_local_datetime(&shifted).earliest())
            .ok_or(DateError::NonexistentLocalTime(naive))
    }

    // ---- current time -------------------------------------------------

    /// Format the current time with `pattern`
    pub fn current_formatted(&self, pattern: &str) -> Result<String> {
        Ok(Pattern::compile(pattern)?.format_instant(&self.now()))
    }

    /// Current time as whole epoch seconds
    pub fn current_epoch_seconds(&self) -> String {
        self.clock.now().timestamp().to_string()
    }

    /// Current four-digit year
    pub fn current_year(&self) -> String {
        self.now().naive_local().format("%Y").to_string()
    }

    /// Current two-digit month, 01..12
    pub fn current_month(&self) -> String {
        self.now().naive_local().format("%m").to_string()
    }

    /// Current two-digit day of month
    pub fn current_day(&self) -> String {
        self.now().naive_local().format("%d").to_string()
    }

    // ---- stamp <-> text -----------------------------------------------

    /// Parse `text` with `pattern` and return the epoch seconds as a string
    pub fn parse_to_epoch_seconds(&self, text: &str, pattern: &str) -> Result<String> {
        self.parse_to_epoch_seconds_i64(text, pattern).map(|seconds| seconds.to_string())
    }

    /// Parse `text` with `pattern` and return the epoch seconds
    ///
    /// An offset parsed from a `Z` token takes precedence over the
    /// formatter's timezone.
    pub fn parse_to_epoch_seconds_i64(&self, text: &str, pattern: &str) -> Result<i64> {
        let (naive, offset) = Pattern::compile(pattern)?.parse_with_offset(text)?;
        match offset {
            Some(offset) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.timestamp())
                .ok_or(DateError::OutOfRange),
            None => Ok(self.localize(naive)?.timestamp()),
        }
    }

    /// Render an epoch-second stamp with `pattern`
    pub fn epoch_seconds_to_formatted(&self, stamp: &str, pattern: &str) -> Result<String> {
        let pattern = Pattern::compile(pattern)?;
        let dt = self.instant_at_seconds(parse_stamp(stamp)?)?;
        Ok(pattern.format_instant(&dt))
    }

    /// Render an epoch-millisecond value with `pattern`
    ///
    /// The `constants` module carries the usual presets
    /// (`MONTH_DAY_TIME`, `YEAR_MONTH_DAY`, `YEAR_MONTH_DAY_CN`, ...).
    pub fn format_epoch_millis(&self, millis: i64, pattern: &str) -> Result<String> {
        let pattern = Pattern::compile(pattern)?;
        Ok(pattern.format_instant(&self.instant_at_millis(millis)?))
    }

    /// Parse a `yyyy-MM-dd HH:mm:ss` string into an instant
    pub fn parse_date_time(&self, text: &str) -> Result<DateTime<Tz>> {
        let naive = Pattern::compile(YEAR_MONTH_DAY_TIME)?.parse(text)?;
        self.localize(naive)
    }

    /// Reduce a `yyyy-MM-dd'T'HH:mm:ss` string to its `yyyy-MM-dd` date
    pub fn iso_to_date(&self, text: &str) -> Result<String> {
        let naive = Pattern::compile(ISO_LOCAL_DATE_TIME)?.parse(text)?;
        Ok(date::format_ymd(naive.date()))
    }

    // ---- day arithmetic -----------------------------------------------

    /// Today shifted by `delta_days`, rendered as `yyyy.MM.dd`
    pub fn add_days_from_now(&self, delta_days: i64) -> Result<String> {
        let shifted = self.shift(&self.now(), delta_days)?;
        Ok(Pattern::compile(DOTTED_DATE)?.format_instant(&shifted))
    }

    /// `stamp` shifted by `delta_days`, rendered with `pattern`
    pub fn add_days(&self, stamp: &str, delta_days: i64, pattern: &str) -> Result<String> {
        let pattern = Pattern::compile(pattern)?;
        let base = self.instant_at_seconds(parse_stamp(stamp)?)?;
        let shifted = self.shift(&base, delta_days)?;
        Ok(pattern.format_instant(&shifted))
    }

    /// `stamp` shifted by `delta_days`, as epoch seconds
    pub fn add_days_stamp(&self, stamp: &str, delta_days: i64) -> Result<String> {
        let base = self.instant_at_seconds(parse_stamp(stamp)?)?;
        Ok(self.shift(&base, delta_days)?.timestamp().to_string())
    }

    /// Calendar-day shift that keeps the local wall-clock time
    fn shift(&self, dt: &DateTime<Tz>, delta_days: i64) -> Result<DateTime<Tz>> {
        let shifted = date::shift_days(dt.naive_local(), delta_days).ok_or(DateError::OutOfRange)?;
        self.localize(shifted)
    }

    /// Whole calendar days between two instants in this timezone
    ///
    /// Time of day is ignored: 23:00 on one day and 01:00 on the next are one
    /// day apart.
    pub fn gap_in_days<T: TimeZone>(&self, start: &DateTime<T>, end: &DateTime<T>) -> i64 {
        let start = start.with_timezone(&self.tz).date_naive();
        let end = end.with_timezone(&self.tz).date_naive();
        date::gap_days(start, end)
    }

    // ---- month boundaries ---------------------------------------------

    /// First day of a month at 00:00, as `yyyy.MM.dd HH:mm`
    ///
    /// `month_index` is 0-based and rolls over into neighbouring years.
    pub fn first_day_of_month(&self, year: i32, month_index: i32) -> Result<String> {
        let (year, month) = date::normalize_month_index(year, month_index).ok_or(DateError::OutOfRange)?;
        let first = date::first_of_month(year, month)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(DateError::OutOfRange)?;
        Ok(Pattern::compile(MONTH_BOUNDARY)?.format(&first))
    }

    /// Last day of a month at 23:59:59, as `yyyy.MM.dd HH:mm`
    ///
    /// `month_index` is 0-based and rolls over into neighbouring years.
    pub fn last_day_of_month(&self, year: i32, month_index: i32) -> Result<String> {
        let (year, month) = date::normalize_month_index(year, month_index).ok_or(DateError::OutOfRange)?;
        let last = date::last_of_month(year, month)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .ok_or(DateError::OutOfRange)?;
        Ok(Pattern::compile(MONTH_BOUNDARY)?.format(&last))
    }

    /// Number of days in a 1-based month, rolling over out-of-range months
    pub fn days_in_month(&self, year: i32, month: i32) -> Result<u32> {
        let index = month.checked_sub(1).ok_or(DateError::OutOfRange)?;
        let (year, month) = date::normalize_month_index(year, index).ok_or(DateError::OutOfRange)?;
        date::days_in_month(year, month).ok_or(DateError::OutOfRange)
    }

    // ---- components ---------------------------------------------------

    pub fn year_of(&self, stamp: &str) -> Result<i32> {
        Ok(self.instant_at_seconds(parse_stamp(stamp)?)?.year())
    }

    /// 0-based month (0 = January) of an epoch-second stamp
    pub fn month_index_of(&self, stamp: &str) -> Result<u32> {
        Ok(self.instant_at_seconds(parse_stamp(stamp)?)?.month0())
    }

    pub fn day_of(&self, stamp: &str) -> Result<u32> {
        Ok(self.instant_at_seconds(parse_stamp(stamp)?)?.day())
    }

    // ---- weekdays -----------------------------------------------------

    /// Weekday label of an epoch-second stamp
    pub fn weekday_label(&self, stamp: &str) -> Result<&str> {
        let dt = self.instant_at_seconds(parse_stamp(stamp)?)?;
        Ok(self.weekday_of(dt.date_naive()))
    }

    /// Weekday label of a `yyyy-MM-dd` date string
    pub fn weekday_label_for_date(&self, text: &str) -> Result<&str> {
        let naive = Pattern::compile(YEAR_MONTH_DAY)?.parse(text)?;
        Ok(self.weekday_of(naive.date()))
    }

    /// `stamp` rendered with `pattern` followed by its weekday in parentheses
    pub fn format_with_weekday(&self, stamp: &str, pattern: &str) -> Result<String> {
        let pattern = Pattern::compile(pattern)?;
        let dt = self.instant_at_seconds(parse_stamp(stamp)?)?;
        Ok(format!("{} ({})", pattern.format_instant(&dt), self.weekday_of(dt.date_naive())))
    }

    fn weekday_of(&self, day: NaiveDate) -> &str {
        self.labels.weekday(day.weekday())
    }

    // ---- humanized labels ---------------------------------------------

    /// Chat-style recency label for an epoch-millisecond instant
    ///
    /// | age | output |
    /// |---|---|
    /// | under a minute, or in the future | just-now label |
    /// | under an hour | minutes-ago label |
    /// | same calendar day | `HH:mm` |
    /// | same calendar year | `MM-dd HH:mm` |
    /// | older | `yyyy-MM-dd` |
    pub fn relative_label(&self, epoch_millis: i64) -> Result<String> {
        let now = self.clock.now();
        let age = now.timestamp_millis().saturating_sub(epoch_millis);

        if age < MINUTE_MILLIS {
            return Ok(self.labels.just_now.clone());
        }
        if age < HOUR_MILLIS {
            return Ok(self.labels.minutes_ago(age / MINUTE_MILLIS));
        }

        let then = self.instant_at_millis(epoch_millis)?.naive_local();
        let today = now.with_timezone(&self.tz).naive_local();
        let pattern = if then.date() == today.date() {
            HOUR_MINUTE
        } else if then.year() == today.year() {
            MONTH_DAY_TIME
        } else {
            YEAR_MONTH_DAY
        };
        Ok(Pattern::compile(pattern)?.format(&then))
    }

    /// Note-style label for an epoch-second stamp
    ///
    /// Today renders as `HH:mm <weekday>`, yesterday as
    /// `<yesterday> HH:mm <weekday>`, the rest of the current year as
    /// `MM-dd HH:mm <weekday>` and anything else as
    /// `yyyy-MM-dd HH:mm <weekday>`.
    pub fn contextual_label(&self, stamp: &str) -> Result<String> {
        let seconds = parse_stamp(stamp)?;
        let then = self.instant_at_seconds(seconds)?;
        let today = self.now().date_naive();

        let (today_start, today_end) = self.day_bounds(today)?;
        let yesterday_start = self.shift(&today_start, -1)?.timestamp();
        let yesterday_end = self.shift(&today_end, -1)?.timestamp();
        let (year_start, year_end) = self.year_bounds(today.year())?;

        let week = self.weekday_of(then.date_naive());
        let naive = then.naive_local();
        let hour_minute = Pattern::compile(HOUR_MINUTE)?;

        let label = if (today_start.timestamp()..=today_end.timestamp()).contains(&seconds) {
            format!("{} {}", hour_minute.format(&naive), week)
        } else if (yesterday_start..=yesterday_end).contains(&seconds) {
            format!("{} {} {}", self.labels.yesterday, hour_minute.format(&naive), week)
        } else if (year_start..=year_end).contains(&seconds) {
            format!("{} {}", Pattern::compile(MONTH_DAY_TIME)?.format(&naive), week)
        } else {
            format!("{} {}", Pattern::compile(YEAR_MONTH_DAY_MINUTE)?.format(&naive), week)
        };
        Ok(label)
    }

    /// 00:00:00 and 23:59:59 of a local date
    fn day_bounds(&self, day: NaiveDate) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        let start = day.and_hms_opt(0, 0, 0).ok_or(DateError::OutOfRange)?;
        let end = day.and_hms_opt(23, 59, 59).ok_or(DateError::OutOfRange)?;
        Ok((self.localize(start)?, self.localize(end)?))
    }

    /// Epoch seconds of Jan 1 00:00:00 and Dec 31 23:59:59 of a year
    fn year_bounds(&self, year: i32) -> Result<(i64, i64)> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DateError::OutOfRange)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(DateError::OutOfRange)?;
        let (start, _) = self.day_bounds(first)?;
        let (_, end) = self.day_bounds(last)?;
        Ok((start.timestamp(), end.timestamp()))
    }
}

/// Parse a decimal epoch stamp
pub fn parse_stamp(stamp: &str) -> Result<i64> {
    stamp.parse::<i64>().map_err(|_| DateError::Format(stamp.to_string()))
}
