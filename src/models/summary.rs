use super::pomodoro::Pomodoro;
use super::project::Project;
use serde::Serialize;

/// Aggregate view of one project over a time window.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub last_touched: i64,
    pub total_duration: i64,
    pub n_pomodoros: usize,
    /// Earliest and latest start among the matching pomodoros.
    pub first_start: Option<i64>,
    pub last_start: Option<i64>,
    /// Most recent first.
    pub pomodoros: Vec<Pomodoro>,
}

impl ProjectSummary {
    /// Build the summary from pomodoros already ordered by start descending.
    pub fn new(project: &Project, pomodoros: Vec<Pomodoro>) -> Self {
        let total_duration = pomodoros
            .iter()
            .fold(0_i64, |acc, p| acc.saturating_add(p.duration));

        Self {
            id: project.id,
            name: project.name.clone(),
            last_touched: project.last_touched,
            total_duration,
            n_pomodoros: pomodoros.len(),
            first_start: pomodoros.last().map(|p| p.start),
            last_start: pomodoros.first().map(|p| p.start),
            pomodoros,
        }
    }
}
