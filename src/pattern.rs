//! Conventional date patterns
//!
//! Callers describe renderings with the familiar `yyyy.MM.dd HH:mm` style
//! tokens. A [`Pattern`] compiles such a string once into the equivalent
//! chrono strftime format and then formats or parses with it.
//!
//! | token | meaning | strftime |
//! |---|---|---|
//! | `yyyy`, `y` | year | `%Y` |
//! | `yy` | two-digit year | `%y` |
//! | `MM` / `M` | month, padded / unpadded | `%m` / `%-m` |
//! | `MMM` / `MMMM` | month name, short / long | `%b` / `%B` |
//! | `dd` / `d` | day of month | `%d` / `%-d` |
//! | `HH` / `H` | hour 0-23 | `%H` / `%-H` |
//! | `hh` / `h` | hour 1-12 | `%I` / `%-I` |
//! | `mm` / `m` | minute | `%M` / `%-M` |
//! | `ss` / `s` | second | `%S` / `%-S` |
//! | `SSS` | millisecond | `%3f` |
//! | `E`..`EEE` / `EEEE` | weekday name, short / long | `%a` / `%A` |
//! | `a` | AM/PM marker | `%p` |
//! | `Z` | UTC offset, `+0800` | `%z` |
//!
//! Text between single quotes is literal and `''` is a literal quote. Any
//! other unquoted ASCII letter is rejected; everything else (punctuation,
//! CJK characters) is copied through.
//!
//! Parsing is lenient about missing fields: anything the pattern does not
//! mention is taken from 1970-01-01 00:00:00, and `hh` without `a` reads as
//! AM.

use crate::error::{DateError, Result};
use chrono::format::{self, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone};
use std::fmt;
use std::str::FromStr;

/// A compiled date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    strftime: String,
    fields: Fields,
}

/// Which calendar fields a pattern mentions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Fields {
    year: bool,
    month: bool,
    day: bool,
    hour24: bool,
    hour12: bool,
    meridiem: bool,
    minute: bool,
    second: bool,
    offset: bool,
}

impl Fields {
    fn mark(&mut self, letter: char) {
        match letter {
            'y' => self.year = true,
            'M' => self.month = true,
            'd' => self.day = true,
            'H' => self.hour24 = true,
            'h' => self.hour12 = true,
            'a' => self.meridiem = true,
            'm' => self.minute = true,
            's' => self.second = true,
            'Z' => self.offset = true,
            _ => {}
        }
    }

    /// Fill every field the pattern left out
    fn fill_defaults(&self, parsed: &mut Parsed) -> ParseResult<()> {
        if !self.year {
            parsed.set_year(1970)?;
        }
        if !self.month {
            parsed.set_month(1)?;
        }
        if !self.day {
            parsed.set_day(1)?;
        }
        match (self.hour24, self.hour12, self.meridiem) {
            (true, _, _) | (false, true, true) => {}
            (false, true, false) => parsed.set_ampm(false)?,
            // Only a marker: 12 AM/PM
            (false, false, true) => parsed.set_hour12(12)?,
            (false, false, false) => parsed.set_hour(0)?,
        }
        if !self.minute {
            parsed.set_minute(0)?;
        }
        if !self.second {
            parsed.set_second(0)?;
        }
        Ok(())
    }
}

impl Pattern {
    /// Compile a pattern string
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut fields = Fields::default();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    strftime.push('\'');
                    continue;
                }
                // Quoted literal runs to the next lone quote or the end of the pattern
                while let Some(quoted) = chars.next() {
                    if quoted != '\'' {
                        push_literal(&mut strftime, quoted);
                    } else if chars.peek() == Some(&'\'') {
                        chars.next();
                        strftime.push('\'');
                    } else {
                        break;
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut strftime, c);
                continue;
            }

            let mut run = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }

            let spec = token_spec(c, run).ok_or_else(|| DateError::Pattern {
                pattern: pattern.to_string(),
                token: c,
            })?;
            strftime.push_str(spec);
            fields.mark(c);
        }

        Ok(Self {
            source: pattern.to_string(),
            strftime,
            fields,
        })
    }

    /// The pattern as written by the caller
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The equivalent chrono format string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Whether the pattern carries a `Z` offset token
    pub fn has_offset(&self) -> bool {
        self.fields.offset
    }

    /// Render a wall-clock date-time
    ///
    /// A `Z` token renders as `+0000` since the value carries no offset.
    pub fn format(&self, dt: &NaiveDateTime) -> String {
        if self.fields.offset {
            return self.format_instant(&dt.and_utc());
        }
        dt.format(&self.strftime).to_string()
    }

    /// Render an instant in its own timezone
    pub fn format_instant<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> String {
        dt.with_timezone(&dt.offset().fix()).format(&self.strftime).to_string()
    }

    /// Parse text into a wall-clock date-time, dropping any parsed offset
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime> {
        self.parse_with_offset(text).map(|(naive, _)| naive)
    }

    /// Parse text into a wall-clock date-time plus the offset, when the
    /// pattern has a `Z` token
    pub fn parse_with_offset(&self, text: &str) -> Result<(NaiveDateTime, Option<FixedOffset>)> {
        let parsed = self.parse_fields(text).map_err(|e| self.parse_error(text, e));
        if let Err(err) = &parsed {
            log::debug!("{err}");
        }
        parsed
    }

    fn parse_fields(&self, text: &str) -> ParseResult<(NaiveDateTime, Option<FixedOffset>)> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, StrftimeItems::new(&self.strftime))?;
        self.fields.fill_defaults(&mut parsed)?;

        let naive = parsed.to_naive_datetime_with_offset(0)?;
        let offset = if self.fields.offset {
            Some(parsed.to_fixed_offset()?)
        } else {
            None
        };
        Ok((naive, offset))
    }

    fn parse_error(&self, text: &str, source: chrono::ParseError) -> DateError {
        DateError::Parse {
            text: text.to_string(),
            pattern: self.source.clone(),
            source,
        }
    }
}

impl FromStr for Pattern {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn token_spec(letter: char, run: usize) -> Option<&'static str> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('S', 3) => "%3f",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('a', 1) => "%p",
        ('Z', _) => "%z",
        _ => return None,
    };
    Some(spec)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_common_patterns() {
        assert_eq!(Pattern::compile("yyyy.MM.dd HH:mm").unwrap().strftime(), "%Y.%m.%d %H:%M");
        assert_eq!(Pattern::compile("yyyy-MM-dd HH:mm:ss").unwrap().strftime(), "%Y-%m-%d %H:%M:%S");
        assert_eq!(Pattern::compile("MM-dd").unwrap().strftime(), "%m-%d");
        assert_eq!(Pattern::compile("yyyy年MM月dd日").unwrap().strftime(), "%Y年%m月%d日");
    }

    #[test]
    fn test_compile_quoted_literals() {
        assert_eq!(
            Pattern::compile("yyyy-MM-dd'T'HH:mm:ss").unwrap().strftime(),
            "%Y-%m-%dT%H:%M:%S"
        );
        assert_eq!(Pattern::compile("HH 'o''clock'").unwrap().strftime(), "%H o'clock");
        assert_eq!(Pattern::compile("''yy").unwrap().strftime(), "'%y");
    }

    #[test]
    fn test_compile_escapes_percent() {
        assert_eq!(Pattern::compile("dd%").unwrap().strftime(), "%d%%");
    }

    #[test]
    fn test_compile_rejects_unknown_letters() {
        match Pattern::compile("yyyy-MM-dd Q") {
            Err(DateError::Pattern { token, .. }) => assert_eq!(token, 'Q'),
            other => panic!("expected pattern error, got {other:?}"),
        }
        assert!(Pattern::compile("HH:mm:SS").is_err());
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    #[test]
    fn test_parse_keeps_hour_without_minutes() {
        let pattern = Pattern::compile("yyyy-MM-dd HH").unwrap();
        let parsed = pattern.parse("2024-03-15 14").unwrap();
        assert_eq!(parsed, at(2024, 3, 15, 14, 0));
        assert_eq!(pattern.format(&parsed), "2024-03-15 14");
    }

    #[test]
    fn test_parse_twelve_hour_clock() {
        let pattern = Pattern::compile("yyyy-MM-dd hh:mm").unwrap();
        assert_eq!(pattern.parse("2024-03-15 03:30").unwrap(), at(2024, 3, 15, 3, 30));
        assert_eq!(pattern.parse("2024-03-15 12:05").unwrap(), at(2024, 3, 15, 0, 5));

        let pattern = Pattern::compile("yyyy-MM-dd hh:mm a").unwrap();
        assert_eq!(pattern.parse("2024-03-15 03:30 PM").unwrap(), at(2024, 3, 15, 15, 30));
    }

    #[test]
    fn test_parse_fills_missing_date_fields() {
        let year_month = Pattern::compile("yyyy-MM").unwrap();
        assert_eq!(year_month.parse("2024-03").unwrap(), at(2024, 3, 1, 0, 0));

        let month_day = Pattern::compile("MM-dd").unwrap();
        assert_eq!(month_day.parse("03-15").unwrap(), at(1970, 3, 15, 0, 0));

        let time = Pattern::compile("HH:mm").unwrap();
        assert_eq!(time.parse("14:32").unwrap(), at(1970, 1, 1, 14, 32));
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        let pattern = Pattern::compile("yyyy-MM-dd").unwrap();
        assert!(matches!(pattern.parse("2024-02-30"), Err(DateError::Parse { .. })));
        assert!(matches!(pattern.parse("2024-03-15 09"), Err(DateError::Parse { .. })));
    }

    #[test]
    fn test_offset_token() {
        let pattern = Pattern::compile("yyyy-MM-dd HH:mm Z").unwrap();
        assert!(pattern.has_offset());
        assert_eq!(pattern.strftime(), "%Y-%m-%d %H:%M %z");

        let (naive, offset) = pattern.parse_with_offset("2024-03-15 14:32 +0800").unwrap();
        assert_eq!(naive, at(2024, 3, 15, 14, 32));
        assert_eq!(offset, FixedOffset::east_opt(8 * 3600));

        assert_eq!(pattern.format(&naive), "2024-03-15 14:32 +0000");
        let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
        let instant = shanghai.from_local_datetime(&naive).unwrap();
        assert_eq!(pattern.format_instant(&instant), "2024-03-15 14:32 +0800");
    }

    #[test]
    fn test_token_widths() {
        assert_eq!(token_spec('M', 4), Some("%B"));
        assert_eq!(token_spec('E', 4), Some("%A"));
        assert_eq!(token_spec('y', 1), Some("%Y"));
        assert_eq!(token_spec('a', 2), None);
        assert_eq!(token_spec('Z', 1), Some("%z"));
    }
}
