//! Time utilities: parsing timestamps, duration formatting, "now" helpers.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, Timelike};

pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Current wall-clock time in the local zone, truncated to whole seconds
/// so stored timestamps round-trip through the database format.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Format seconds as H:MM:SS, sign-preserving (e.g. "-00:57:00").
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.abs();
    format!("{}{:02}:{:02}:{:02}", sign, s / 3600, (s % 3600) / 60, s % 60)
}

/// Format seconds as HH:MM (no seconds), sign-preserving.
pub fn format_duration_short(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.abs();
    format!("{}{:02}:{:02}", sign, s / 3600, (s % 3600) / 60)
}

/// Format a timestamp as HH:MM clock time.
pub fn format_clock(dt: NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

/// Format a timestamp the way the database stores it.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

/// Parse a database timestamp ("YYYY-MM-DD HH:MM:SS").
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT)
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// Parse user input: accepts "YYYY-MM-DD HH:MM" or "YYYY-MM-DD HH:MM:SS".
pub fn parse_user_datetime(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}
