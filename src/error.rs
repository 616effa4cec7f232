//! Error types for date parsing and formatting

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors produced by pattern compilation, parsing and calendar arithmetic
#[derive(Debug, Error)]
pub enum DateError {
    /// Text did not match the pattern it was parsed against
    #[error("failed to parse '{text}' with pattern '{pattern}': {source}")]
    Parse {
        text: String,
        pattern: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A timestamp string was not a valid integer
    #[error("invalid timestamp '{0}': expected an integer")]
    Format(String),

    /// The pattern contains a letter that is not a supported token
    #[error("unsupported token '{token}' in pattern '{pattern}'")]
    Pattern { pattern: String, token: char },

    /// Arithmetic left the representable date range
    #[error("date out of range")]
    OutOfRange,

    /// The wall-clock time falls in a gap of the configured timezone
    #[error("local time {0} does not exist in the configured timezone")]
    NonexistentLocalTime(NaiveDateTime),
}

pub type Result<T> = std::result::Result<T, DateError>;
