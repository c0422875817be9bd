//! Time utilities: parsing human durations ("25m", "1h30m") and timestamps
//! given on the command line into Unix seconds.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

static SPAN_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s)?")
        .expect("static regex")
});

/// Which end of a window a date-only value stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `YYYY-MM-DD` → local midnight
    Start,
    /// `YYYY-MM-DD` → last second of that local day
    End,
}

pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

/// Parse a duration into whole seconds.
///
/// Accepts a bare number of seconds (`1500`) or a span made of
/// number+unit parts (`25m`, `1h30m`, `1h 30m`, `1.5h`, `90s`). A bare
/// number inside a span counts as seconds.
pub fn parse_duration(input: &str) -> AppResult<i64> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AppError::InvalidDuration(input.to_string()));
    }

    if let Ok(secs) = s.parse::<i64>() {
        return Ok(secs);
    }

    let mut total = 0.0_f64;
    let mut consumed = 0;

    for cap in SPAN_PART.captures_iter(s) {
        let whole = cap.get(0).map(|m| m.as_str()).unwrap_or("");
        let value: f64 = cap[1]
            .parse()
            .map_err(|_| AppError::InvalidDuration(input.to_string()))?;

        let unit = cap.get(2).map(|m| m.as_str().to_ascii_lowercase());
        let factor = match unit.as_deref() {
            Some(u) if u.starts_with('h') => 3600.0,
            Some(u) if u.starts_with('m') => 60.0,
            _ => 1.0,
        };

        total += value * factor;
        consumed += whole.chars().filter(|c| !c.is_whitespace()).count();
    }

    // every non-blank character must belong to a number+unit part
    let expected = s.chars().filter(|c| !c.is_whitespace()).count();
    if consumed == 0 || consumed != expected {
        return Err(AppError::InvalidDuration(input.to_string()));
    }

    // `as` would saturate silently
    let rounded = total.round();
    if !rounded.is_finite() || rounded >= i64::MAX as f64 {
        return Err(AppError::InvalidDuration(input.to_string()));
    }

    Ok(rounded as i64)
}

fn local_to_ts(ndt: NaiveDateTime, raw: &str) -> AppResult<i64> {
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppError::InvalidTimestamp(format!("{raw} does not exist in local time")))
}

/// Parse a point in time into Unix seconds.
///
/// Accepted forms, tried in order:
/// - Unix seconds (`1700000000`)
/// - RFC 3339 (`2025-03-01T09:00:00+01:00`)
/// - local date-time (`2025-03-01T09:00[:00]`, space separator allowed)
/// - local date (`2025-03-01`), resolved according to `bound`
pub fn parse_timestamp(input: &str, bound: Bound) -> AppResult<i64> {
    let s = input.trim();

    if let Ok(ts) = s.parse::<i64>() {
        return Ok(ts);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp());
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_to_ts(ndt, s);
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => NaiveTime::MIN,
            Bound::End => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
        };
        return local_to_ts(d.and_time(time), s);
    }

    Err(AppError::InvalidTimestamp(input.to_string()))
}

pub fn parse_optional_timestamp(input: Option<&String>, bound: Bound) -> AppResult<Option<i64>> {
    input.map(|s| parse_timestamp(s, bound)).transpose()
}
