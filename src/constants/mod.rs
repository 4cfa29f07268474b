//! # Constants and Configuration Module
//!
//! This module defines the sentinel values substituted for invalid departure
//! data and handles loading the station's starting clock time from the
//! environment.
//!
//! The start time is loaded lazily and cached on first use, so repeated
//! lookups never touch the environment again.

use chrono::NaiveTime;
use once_cell::sync::OnceCell;
use std::env;
use std::fmt;

use crate::time::parse_hhmm;

/// Train id stored when a departure is created with an empty id.
pub const INVALID_ID: &str = "INVALID ID";
/// Line stored when a departure is created with an empty line.
pub const INVALID_LINE: &str = "INVALID LINE";
/// Destination stored when a departure is created with an empty destination.
pub const INVALID_DESTINATION: &str = "INVALID DESTINATION";
/// Track value meaning no track has been assigned yet.
pub const UNASSIGNED_TRACK: i32 = -1;

/// Environment variable holding the initial station clock time ("HH:MM").
pub const START_TIME_VAR: &str = "DISPATCH_START_TIME";

/// Represents errors that can occur when loading configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The environment variable is set but contains an empty or whitespace-only value.
    EmptyVar(&'static str),
    /// The environment variable is set but is not a valid "HH:MM" time.
    InvalidTime(&'static str, String),
}

impl fmt::Display for ConfigError {
    /// Formats the configuration error for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_dispatch::constants::ConfigError;
    ///
    /// let empty_error = ConfigError::EmptyVar("DISPATCH_START_TIME");
    /// assert_eq!(
    ///     empty_error.to_string(),
    ///     "Environment variable 'DISPATCH_START_TIME' is set but empty. \
    ///      Unset it or provide a time in HH:MM format."
    /// );
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyVar(var) => write!(
                f,
                "Environment variable '{var}' is set but empty. \
                Unset it or provide a time in HH:MM format."
            ),
            ConfigError::InvalidTime(var, value) => write!(
                f,
                "Environment variable '{var}' has value '{value}', \
                which is not a valid HH:MM time."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A thread-safe, write-once cell caching the configured start time.
static START_TIME_CELL: OnceCell<Option<NaiveTime>> = OnceCell::new();

/// Lazily loads, validates and caches an optional "HH:MM" configuration value.
///
/// A missing variable is not an error and caches `None`. A variable that is set
/// must hold a valid time. Errors are not cached, so a later call retries.
///
/// # Arguments
///
/// * `var` - The name of the variable being loaded (for error reporting).
/// * `cell` - The `OnceCell` used for caching.
/// * `fetch` - A closure that attempts to load the raw value.
fn load_time_with<F>(
    var: &'static str,
    cell: &OnceCell<Option<NaiveTime>>,
    fetch: F,
) -> Result<Option<NaiveTime>, ConfigError>
where
    F: for<'a> Fn(&'a str) -> Result<String, env::VarError>,
{
    let value = cell.get_or_try_init(|| match fetch(var) {
        Ok(raw) if raw.trim().is_empty() => Err(ConfigError::EmptyVar(var)),
        Ok(raw) => parse_hhmm(&raw)
            .map(Some)
            .map_err(|_| ConfigError::InvalidTime(var, raw)),
        Err(_) => Ok(None),
    })?;
    Ok(*value)
}

/// Retrieves the configured start time (`DISPATCH_START_TIME`) from the environment.
///
/// Returns `Ok(None)` when the variable is not set.
///
/// # Errors
///
/// Returns `ConfigError` if the variable is set but empty or not a valid time.
pub fn start_time() -> Result<Option<NaiveTime>, ConfigError> {
    load_time_with(START_TIME_VAR, &START_TIME_CELL, |s| env::var(s))
}

/// Eagerly validates the environment configuration.
///
/// Intended to be called at startup to "fail fast" on a bad start time.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn validate_config() -> Result<(), ConfigError> {
    start_time()?;
    Ok(())
}
