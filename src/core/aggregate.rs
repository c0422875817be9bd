use crate::db::queries::load_pomodoros_for_project;
use crate::errors::AppResult;
use crate::models::project::Project;
use crate::models::summary::ProjectSummary;
use crate::models::window::TimeWindow;
use rusqlite::Connection;

/// Per-project totals over a closed time window.
pub struct Aggregator;

impl Aggregator {
    /// Total duration, count and the matching pomodoros (most recent first)
    /// of `project` inside `window`.
    ///
    /// Read-only: the project must already exist. Callers that start from a
    /// name resolve it with `ProjectResolver::find_by_name` and report
    /// "not found" themselves.
    pub fn aggregate(
        conn: &Connection,
        project: &Project,
        window: &TimeWindow,
    ) -> AppResult<ProjectSummary> {
        let pomodoros = load_pomodoros_for_project(conn, project.id, window)?;
        let summary = ProjectSummary::new(project, pomodoros);

        tracing::trace!(
            project = %project.name,
            %window,
            count = summary.n_pomodoros,
            total = summary.total_duration,
            "aggregated"
        );
        Ok(summary)
    }

    /// `aggregate` for each project, keeping the input order.
    pub fn aggregate_all(
        conn: &Connection,
        projects: &[Project],
        window: &TimeWindow,
    ) -> AppResult<Vec<ProjectSummary>> {
        projects
            .iter()
            .map(|p| Self::aggregate(conn, p, window))
            .collect()
    }
}
