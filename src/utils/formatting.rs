//! Formatting utilities used for CLI and export outputs.

use chrono::{Local, TimeZone};

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Seconds rendered as `HHh MMm` (sub-minute remainder dropped).
pub fn secs2readable(secs: i64) -> String {
    let mins = secs.abs() / 60;
    let sign = if secs < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, mins / 60, mins % 60)
}

/// Unix seconds rendered as local `YYYY-MM-DD HH:MM`.
pub fn ts2local(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}

/// Unix seconds rendered as RFC 3339 in local time.
pub fn ts2iso(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.to_rfc3339(),
        None => ts.to_string(),
    }
}
