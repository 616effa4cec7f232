//! Constants used throughout the crate
//!
//! This module centralizes the literal label tables, the fixed output
//! patterns and file locations so they stay consistent between the library,
//! the configuration layer and the CLI.

// Weekday labels, Sunday first
pub const WEEKDAYS_ZH: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];
pub const WEEKDAYS_EN: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

// Relative labels. `{}` is replaced by the minute count.
pub const JUST_NOW_ZH: &str = "刚刚";
pub const MINUTES_AGO_ZH: &str = "{}分钟前";
pub const YESTERDAY_ZH: &str = "昨天";
pub const JUST_NOW_EN: &str = "just now";
pub const MINUTES_AGO_EN: &str = "{} minutes ago";
pub const YESTERDAY_EN: &str = "Yesterday";
pub const MINUTES_PLACEHOLDER: &str = "{}";

// Output patterns
/// Rendering used by [`add_days_from_now`](crate::formatter::DateFormatter::add_days_from_now)
pub const DOTTED_DATE: &str = "yyyy.MM.dd";
/// Rendering of month boundaries
pub const MONTH_BOUNDARY: &str = "yyyy.MM.dd HH:mm";
pub const HOUR_MINUTE: &str = "HH:mm";
pub const MONTH_DAY: &str = "MM-dd";
pub const MONTH_DAY_TIME: &str = "MM-dd HH:mm";
pub const YEAR_MONTH_DAY: &str = "yyyy-MM-dd";
pub const YEAR_MONTH_DAY_CN: &str = "yyyy年MM月dd日";
pub const YEAR_MONTH_DAY_MINUTE: &str = "yyyy-MM-dd HH:mm";
pub const YEAR_MONTH_DAY_TIME: &str = "yyyy-MM-dd HH:mm:ss";
pub const ISO_LOCAL_DATE_TIME: &str = "yyyy-MM-dd'T'HH:mm:ss";

// Relative label thresholds
pub const MINUTE_MILLIS: i64 = 60_000;
pub const HOUR_MILLIS: i64 = 3_600_000;

// Files
pub const APP_DIR_NAME: &str = "datekit";
pub const CONFIG_FILE_NAME: &str = "datekit.toml";
pub const XDG_CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_ENV_VAR: &str = "DATEKIT_CONFIG";
pub const LOG_FILE_NAME: &str = "datekit.log";

// CLI messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_PREFIX: &str = "❌ Error";
