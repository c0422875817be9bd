use crate::core::gate::AccessGate;
use crate::core::resolver::ProjectResolver;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_pomodoro, touch_project};
use crate::errors::{AppError, AppResult};
use crate::models::pomodoro::Pomodoro;
use crate::utils::time::now_ts;
use rusqlite::TransactionBehavior;

/// Longest interval accepted by `record`: one day.
pub const MAX_DURATION: i64 = 86_400;

/// A completed work interval to be stored.
#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub duration: i64,
    pub project: String,
    /// Backfilled start; `None` means "it just ended".
    pub start: Option<i64>,
    pub test: bool,
}

impl RecordRequest {
    pub fn new(duration: i64, project: &str) -> Self {
        Self {
            duration,
            project: project.to_string(),
            start: None,
            test: false,
        }
    }

    pub fn starting_at(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    /// Client-side checks; nothing here touches storage.
    fn validate(&self) -> AppResult<String> {
        if self.duration <= 0 || self.duration > MAX_DURATION {
            return Err(AppError::InvalidDuration(self.duration.to_string()));
        }
        ProjectResolver::canonical(&self.project)
    }
}

/// Write path: gate → validation → one transaction.
pub struct PomodoroRecorder;

impl PomodoroRecorder {
    /// Record against the wall clock.
    pub fn record(
        pool: &mut DbPool,
        gate: &AccessGate,
        key: Option<&str>,
        req: &RecordRequest,
    ) -> AppResult<Pomodoro> {
        Self::record_at(pool, gate, key, req, now_ts())
    }

    /// Record with an explicit "now". The derived start is `now - duration`
    /// unless the request carries its own start.
    ///
    /// Project get-or-create, pomodoro insert, project `last_touched` update
    /// and the audit row commit together or not at all: any early return
    /// drops the transaction, which rolls it back.
    pub fn record_at(
        pool: &mut DbPool,
        gate: &AccessGate,
        key: Option<&str>,
        req: &RecordRequest,
        now: i64,
    ) -> AppResult<Pomodoro> {
        gate.require(key)?;
        let canonical = req.validate()?;

        let start = req.start.unwrap_or(now - req.duration);

        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let (project, created) = ProjectResolver::resolve_or_create(&tx, &canonical)?;
        let pomo = insert_pomodoro(&tx, project.id, req.duration, start, req.test)?;
        touch_project(&tx, project.id, pomo.start)?;

        ttlog(
            &tx,
            "record",
            &project.name,
            &format!(
                "Pomodoro #{} recorded: {}s{}{}",
                pomo.id,
                pomo.duration,
                if created { ", new project" } else { "" },
                if pomo.test { " (test)" } else { "" },
            ),
        )?;

        tx.commit()?;

        tracing::debug!(
            id = pomo.id,
            project = %project.name,
            duration = pomo.duration,
            start = pomo.start,
            "pomodoro recorded"
        );
        Ok(pomo)
    }
}
