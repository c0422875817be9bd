use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

/// One completed, immutable unit of focused work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pomodoro {
    pub id: i64,
    #[serde(skip)]
    pub project_id: i64, // ⇔ pomodoro.project_id (FK project.id)
    pub duration: i64, // seconds, > 0
    pub start: i64,    // Unix seconds
    pub test: bool,    // synthetic / backfilled entry
}

impl Pomodoro {
    /// Unix second at which the work interval closed.
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.duration)
    }

    pub fn start_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.start, 0).single()
    }
}
