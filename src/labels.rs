//! Literal label tables
//!
//! Weekday names and the humanized "just now" / "N minutes ago" /
//! "yesterday" strings come from a [`Labels`] table. The default table holds
//! the Chinese literals; [`LabelPreset::English`] swaps in English ones and
//! individual entries can be overridden from the configuration file.

use crate::constants::{
    JUST_NOW_EN, JUST_NOW_ZH, MINUTES_AGO_EN, MINUTES_AGO_ZH, MINUTES_PLACEHOLDER, WEEKDAYS_EN, WEEKDAYS_ZH,
    YESTERDAY_EN, YESTERDAY_ZH,
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Built-in label tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPreset {
    /// 周日..周六, 刚刚, N分钟前, 昨天
    #[default]
    Chinese,
    /// Sun..Sat, just now, N minutes ago, Yesterday
    English,
}

/// Complete set of literal strings used in rendered output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Weekday names, Sunday first
    pub weekdays: [String; 7],
    pub just_now: String,
    /// Template with a `{}` placeholder for the minute count
    pub minutes_ago: String,
    /// Prefix for timestamps that fall on the previous calendar day
    pub yesterday: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::chinese()
    }
}

impl Labels {
    #[must_use]
    pub fn chinese() -> Self {
        Self::from_literals(WEEKDAYS_ZH, JUST_NOW_ZH, MINUTES_AGO_ZH, YESTERDAY_ZH)
    }

    #[must_use]
    pub fn english() -> Self {
        Self::from_literals(WEEKDAYS_EN, JUST_NOW_EN, MINUTES_AGO_EN, YESTERDAY_EN)
    }

    #[must_use]
    pub fn from_preset(preset: LabelPreset) -> Self {
        match preset {
            LabelPreset::Chinese => Self::chinese(),
            LabelPreset::English => Self::english(),
        }
    }

    fn from_literals(weekdays: [&str; 7], just_now: &str, minutes_ago: &str, yesterday: &str) -> Self {
        Self {
            weekdays: weekdays.map(str::to_string),
            just_now: just_now.to_string(),
            minutes_ago: minutes_ago.to_string(),
            yesterday: yesterday.to_string(),
        }
    }

    /// Label for a chrono weekday
    pub fn weekday(&self, day: Weekday) -> &str {
        &self.weekdays[day.num_days_from_sunday() as usize]
    }

    /// Label for a day-of-week number where 1 is Sunday and 7 is Saturday
    pub fn weekday_by_number(&self, number: u32) -> Option<&str> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.weekdays.get(index).map(String::as_str)
    }

    /// Render the "N minutes ago" template
    pub fn minutes_ago(&self, minutes: i64) -> String {
        self.minutes_ago.replacen(MINUTES_PLACEHOLDER, &minutes.to_string(), 1)
    }
}
