//! Command-line front-end
//!
//! Every subcommand maps onto one [`DateFormatter`] operation. The formatter
//! is built from the configuration file, then `--tz` and `--english` override
//! the configured timezone and labels.

use crate::clock::SystemClock;
use crate::config::{Config, TimezoneSetting};
use crate::constants::CONFIG_GENERATED;
use crate::formatter::DateFormatter;
use crate::labels::Labels;
use crate::logger;
use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "datekit",
    version,
    about = "Date formatting, parsing and calendar arithmetic",
    long_about = "Date formatting, parsing and calendar arithmetic.

Timestamps are epoch seconds except for `relative`, which takes epoch milliseconds.
`month-start` and `month-end` take a 0-based month index (0 = January);
`days-in-month` takes a 1-based month (1 = January).

Usage:
  datekit now 'yyyy-MM-dd HH:mm:ss'
  datekit parse '2024.03.15 14:32' 'yyyy.MM.dd HH:mm'
  datekit --tz +08:00 contextual 1710484320"
)]
pub struct Args {
    /// Configuration file (defaults to $DATEKIT_CONFIG, ./datekit.toml, then the XDG config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Timezone: local, utc, or a fixed offset such as +08:00
    #[arg(long, value_name = "TZ")]
    pub tz: Option<String>,

    /// Use the English label table
    #[arg(long)]
    pub english: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Format the current time
    Now {
        /// Pattern such as 'yyyy.MM.dd HH:mm' (defaults to the configured pattern)
        pattern: Option<String>,
    },
    /// Print the current epoch seconds
    Stamp,
    /// Parse text into epoch seconds
    Parse { text: String, pattern: String },
    /// Format epoch seconds
    Format { stamp: String, pattern: String },
    /// Shift a stamp by whole days and format it
    AddDays {
        stamp: String,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
        #[arg(default_value = "yyyy.MM.dd")]
        pattern: String,
    },
    /// Shift a stamp by whole days and print the new stamp
    AddDaysStamp {
        stamp: String,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// First day of a month (0-based month index)
    MonthStart {
        year: i32,
        #[arg(allow_hyphen_values = true)]
        month_index: i32,
    },
    /// Last day of a month (0-based month index)
    MonthEnd {
        year: i32,
        #[arg(allow_hyphen_values = true)]
        month_index: i32,
    },
    /// Number of days in a month (1-based month)
    DaysInMonth {
        year: i32,
        #[arg(allow_hyphen_values = true)]
        month: i32,
    },
    /// Weekday label of epoch seconds
    Weekday { stamp: String },
    /// Chat-style recency label of epoch milliseconds
    Relative {
        #[arg(allow_hyphen_values = true)]
        millis: i64,
    },
    /// Note-style label of epoch seconds
    Contextual { stamp: String },
    /// Calendar days between two epoch-second stamps
    Gap { start: String, end: String },
    /// Write a default configuration file
    InitConfig {
        /// Target path (defaults to the XDG config directory)
        path: Option<PathBuf>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Now { .. } => "now",
            Command::Stamp => "stamp",
            Command::Parse { .. } => "parse",
            Command::Format { .. } => "format",
            Command::AddDays { .. } => "add-days",
            Command::AddDaysStamp { .. } => "add-days-stamp",
            Command::MonthStart { .. } => "month-start",
            Command::MonthEnd { .. } => "month-end",
            Command::DaysInMonth { .. } => "days-in-month",
            Command::Weekday { .. } => "weekday",
            Command::Relative { .. } => "relative",
            Command::Contextual { .. } => "contextual",
            Command::Gap { .. } => "gap",
            Command::InitConfig { .. } => "init-config",
        }
    }
}

/// Parse arguments, load configuration and run the selected command
pub fn run() -> Result<()> {
    let args = Args::parse();

    if let Command::InitConfig { path } = &args.command {
        let path = match path {
            Some(path) => path.clone(),
            None => Config::get_default_config_path()?,
        };
        Config::generate_default_config(&path)?;
        println!("{}: {}", CONFIG_GENERATED, path.display());
        return Ok(());
    }

    let config = Config::resolve(args.config.as_deref())?;
    logger::init(&config.logging)?;

    let timezone = match &args.tz {
        Some(tz) => TimezoneSetting::parse(tz)?,
        None => config.timezone()?,
    };
    let labels = if args.english { Labels::english() } else { config.labels() };

    log::info!("Running '{}' with timezone {:?}", args.command.name(), timezone);

    let result = match timezone {
        TimezoneSetting::Local => execute(
            &DateFormatter::with_parts(SystemClock, Local, labels),
            &args.command,
            &config,
        )?,
        TimezoneSetting::Fixed(offset) => execute(
            &DateFormatter::with_parts(SystemClock, offset, labels),
            &args.command,
            &config,
        )?,
    };

    print_result(args.command.name(), &result, args.json)
}

/// Run one command against a formatter
pub fn execute<Tz: TimeZone>(
    formatter: &DateFormatter<SystemClock, Tz>,
    command: &Command,
    config: &Config,
) -> Result<Value> {
    let value = match command {
        Command::Now { pattern } => {
            let pattern = pattern.as_deref().unwrap_or(&config.display.default_pattern);
            json!(formatter.current_formatted(pattern)?)
        }
        Command::Stamp => json!(formatter.current_epoch_seconds()),
        Command::Parse { text, pattern } => json!(formatter.parse_to_epoch_seconds(text, pattern)?),
        Command::Format { stamp, pattern } => json!(formatter.epoch_seconds_to_formatted(stamp, pattern)?),
        Command::AddDays { stamp, delta, pattern } => json!(formatter.add_days(stamp, *delta, pattern)?),
        Command::AddDaysStamp { stamp, delta } => json!(formatter.add_days_stamp(stamp, *delta)?),
        Command::MonthStart { year, month_index } => json!(formatter.first_day_of_month(*year, *month_index)?),
        Command::MonthEnd { year, month_index } => json!(formatter.last_day_of_month(*year, *month_index)?),
        Command::DaysInMonth { year, month } => json!(formatter.days_in_month(*year, *month)?),
        Command::Weekday { stamp } => json!(formatter.weekday_label(stamp)?),
        Command::Relative { millis } => json!(formatter.relative_label(*millis)?),
        Command::Contextual { stamp } => json!(formatter.contextual_label(stamp)?),
        Command::Gap { start, end } => {
            let start = formatter.instant_at_seconds(crate::formatter::parse_stamp(start)?)?;
            let end = formatter.instant_at_seconds(crate::formatter::parse_stamp(end)?)?;
            json!(formatter.gap_in_days(&start, &end))
        }
        Command::InitConfig { .. } => anyhow::bail!("init-config does not take a formatter"),
    };
    Ok(value)
}

fn print_result(command: &str, result: &Value, as_json: bool) -> Result<()> {
    if as_json {
        let output = json!({ "command": command, "result": result });
        println!("{}", serde_json::to_string(&output).context("Failed to serialize result")?);
    } else {
        match result {
            Value::String(text) => println!("{}", text),
            other => println!("{}", other),
        }
    }
    Ok(())
}
