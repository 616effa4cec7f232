//! datekit - date/time formatting, parsing and calendar arithmetic
//!
//! This library converts between human-readable date strings, calendar
//! components and epoch timestamps, performs simple calendar arithmetic, and
//! renders humanized labels such as "刚刚", "5分钟前" or "昨天 14:32 周五".
//!
//! # Modules
//!
//! * [`formatter`] - [`DateFormatter`], the stateless core bound to a clock, timezone and labels
//! * [`utils`] - Free-function facade and plain calendar math
//! * [`pattern`] - `yyyy.MM.dd HH:mm` style patterns compiled to chrono formats
//! * [`clock`] - Injectable time sources
//! * [`labels`] - Weekday and relative-time literal tables
//! * [`config`] - Configuration file handling
//! * [`logger`] - Logging setup for the binary
//! * [`cli`] - Command-line front-end
//!
//! # Example
//!
//! ```
//! use chrono::{FixedOffset, TimeZone, Utc};
//! use datekit::{DateFormatter, FixedClock, Labels};
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 15, 6, 32, 0).unwrap();
//! let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
//! let formatter = DateFormatter::with_parts(FixedClock::new(now), shanghai, Labels::default());
//!
//! assert_eq!(formatter.current_formatted("yyyy.MM.dd HH:mm").unwrap(), "2024.03.15 14:32");
//! assert_eq!(formatter.weekday_label("1710484320").unwrap(), "周五");
//! ```

/// Command-line front-end
pub mod cli;

/// Time sources for "now"-relative operations
pub mod clock;

/// Configuration module for managing application settings
pub mod config;

/// Literal strings, output patterns and file names
pub mod constants;

/// Error types
pub mod error;

/// Core formatting, parsing and arithmetic operations
pub mod formatter;

/// Weekday and relative-time label tables
pub mod labels;

/// Logging setup
pub mod logger;

/// Date pattern compilation
pub mod pattern;

/// Calendar math and the free-function facade
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::DateError;
pub use formatter::DateFormatter;
pub use labels::{LabelPreset, Labels};
pub use pattern::Pattern;
