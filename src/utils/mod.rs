//! Utility modules for datekit.
//!
//! # Available Utilities
//!
//! - [`date`] - Calendar arithmetic on plain dates (month lengths, month
//!   roll-over, day shifts, day gaps)
//! - [`datetime`] - Free-function versions of every
//!   [`DateFormatter`](crate::formatter::DateFormatter) operation, backed by
//!   a shared formatter over the system clock and local timezone

pub mod date;
pub mod datetime;
