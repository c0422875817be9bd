use crate::models::pomodoro::Pomodoro;
use crate::utils::formatting::ts2iso;
use serde::Serialize;

/// Flat, self-describing row for CSV / JSON export.
#[derive(Serialize, Clone, Debug)]
pub struct PomodoroExport {
    pub id: i64,
    pub project: String,
    pub start: i64,
    pub start_iso: String,
    pub duration: i64,
    pub test: bool,
}

impl PomodoroExport {
    pub fn new(project: String, p: &Pomodoro) -> Self {
        Self {
            id: p.id,
            project,
            start: p.start,
            start_iso: ts2iso(p.start),
            duration: p.duration,
            test: p.test,
        }
    }
}
