use crate::errors::{AppError, AppResult};
use std::fmt;

/// Closed time range `[from, to]` in Unix seconds; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl TimeWindow {
    pub fn new(from: Option<i64>, to: Option<i64>) -> Self {
        Self { from, to }
    }

    /// No bounds: every pomodoro matches.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Like `new`, but rejects a window whose start lies after its end.
    pub fn checked(from: Option<i64>, to: Option<i64>) -> AppResult<Self> {
        if let (Some(f), Some(t)) = (from, to)
            && f > t
        {
            return Err(AppError::Validation(format!(
                "window start {f} is after window end {t}"
            )));
        }
        Ok(Self::new(from, to))
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from, self.to) {
            (None, None) => write!(f, "all time"),
            (Some(a), None) => write!(f, "since {a}"),
            (None, Some(b)) => write!(f, "until {b}"),
            (Some(a), Some(b)) => write!(f, "{a}..={b}"),
        }
    }
}
