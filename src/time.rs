//! # Time Module
//!
//! Station times are plain hour/minute values with no date attached. This
//! module parses and formats them as "HH:MM" and provides [`EffectiveTime`],
//! the sum of a scheduled time and a delay, which is allowed to run past
//! midnight without wrapping.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Error returned when "HH:MM" text cannot be turned into a time of day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time '{input}': {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The reason the input was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Parses a strict "HH:MM" string into a time of day.
///
/// Leading and trailing whitespace is ignored, everything else must match
/// exactly: two digit hour in 0-23, a colon, two digit minute in 0-59.
///
/// # Examples
///
/// ```
/// use rusty_dispatch::time::parse_hhmm;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_hhmm("08:23").unwrap(), NaiveTime::from_hms_opt(8, 23, 0).unwrap());
/// assert!(parse_hhmm("8:23").is_err());
/// assert!(parse_hhmm("24:00").is_err());
/// ```
pub fn parse_hhmm(input: &str) -> Result<NaiveTime, TimeError> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();

    if bytes.len() != 5 {
        return Err(TimeError::new(trimmed, "expected HH:MM format"));
    }
    if bytes[2] != b':' {
        return Err(TimeError::new(trimmed, "expected colon at position 2"));
    }

    let hour = parse_two_digits(&bytes[0..2])
        .ok_or_else(|| TimeError::new(trimmed, "invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new(trimmed, "hour must be 0-23"));
    }

    let minute = parse_two_digits(&bytes[3..5])
        .ok_or_else(|| TimeError::new(trimmed, "invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new(trimmed, "minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new(trimmed, "invalid time"))
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [tens, ones] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
        }
        _ => None,
    }
}

/// Formats a time of day as "HH:MM", dropping seconds.
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Returns true when the time is exactly 00:00, which for a delay means "on time".
pub fn is_midnight(time: NaiveTime) -> bool {
    time.hour() == 0 && time.minute() == 0
}

/// A departure time after a delay has been applied.
///
/// Stored as minutes since midnight. Adding a delay never wraps around to the
/// next day, so a value can exceed 23:59 (an 23:30 departure delayed by an
/// hour is `24:30`). Such a value is never before any time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectiveTime(u32);

impl EffectiveTime {
    /// The effective time of an undelayed departure at `time`.
    pub fn from_time(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }

    /// Adds a delay using plain hour and minute addition.
    pub fn plus(self, delay: NaiveTime) -> Self {
        Self(self.0 + delay.hour() * 60 + delay.minute())
    }

    /// Hours since midnight; may be 24 or more.
    pub fn hours(&self) -> u32 {
        self.0 / 60
    }

    pub fn minutes(&self) -> u32 {
        self.0 % 60
    }

    /// Whether this time falls strictly before `reference`.
    pub fn is_before(&self, reference: NaiveTime) -> bool {
        *self < Self::from_time(reference)
    }
}

impl fmt::Display for EffectiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}
