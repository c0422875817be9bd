use crate::core::aggregate::Aggregator;
use crate::db::queries::{load_all_projects, load_projects_active_in};
use crate::errors::AppResult;
use crate::models::summary::ProjectSummary;
use crate::models::window::TimeWindow;
use rusqlite::Connection;

/// Cross-project views built on top of the Aggregator.
///
/// Both listings are ordered by `last_touched` descending, then by id, so
/// repeated calls over the same data return the same sequence.
pub struct WorkIndex;

impl WorkIndex {
    /// Projects with at least one pomodoro starting inside `window`, each
    /// aggregated over that same window.
    pub fn find_active_projects(
        conn: &Connection,
        window: &TimeWindow,
    ) -> AppResult<Vec<ProjectSummary>> {
        let projects = load_projects_active_in(conn, window)?;
        tracing::debug!(%window, found = projects.len(), "active projects");
        Aggregator::aggregate_all(conn, &projects, window)
    }

    /// Every project, aggregated over `window`. Projects without a match
    /// show up with zero totals.
    pub fn all_projects(conn: &Connection, window: &TimeWindow) -> AppResult<Vec<ProjectSummary>> {
        let projects = load_all_projects(conn)?;
        Aggregator::aggregate_all(conn, &projects, window)
    }
}
