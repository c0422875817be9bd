use crate::db::queries::{find_project_by_id, find_project_by_name, insert_project_if_absent};
use crate::errors::{AppError, AppResult};
use crate::models::project::Project;
use rusqlite::Connection;

/// Maps free-text project names onto canonical project rows.
pub struct ProjectResolver;

impl ProjectResolver {
    /// Canonical form of a project name: surrounding whitespace trimmed,
    /// lower-cased, spaces → `_`, periods → `-`.
    ///
    /// `normalize(normalize(x)) == normalize(x)` for every input.
    pub fn normalize(raw: &str) -> String {
        raw.trim()
            .to_lowercase()
            .chars()
            .map(|c| match c {
                ' ' => '_',
                '.' => '-',
                other => other,
            })
            .collect()
    }

    /// Normalize and refuse names that end up empty.
    pub fn canonical(raw: &str) -> AppResult<String> {
        let name = Self::normalize(raw);
        if name.is_empty() {
            return Err(AppError::InvalidProjectName(raw.to_string()));
        }
        Ok(name)
    }

    /// Get-or-create. Runs on the caller's connection (normally an open
    /// transaction), so a newly inserted row only persists if the caller commits.
    pub fn resolve_or_create(conn: &Connection, raw: &str) -> AppResult<(Project, bool)> {
        let name = Self::canonical(raw)?;
        let (project, created) = insert_project_if_absent(conn, &name)?;

        if created {
            tracing::debug!(id = project.id, name = %project.name, "project created");
        }
        Ok((project, created))
    }

    /// Lookup by raw name. Never creates anything.
    pub fn find_by_name(conn: &Connection, raw: &str) -> AppResult<Option<Project>> {
        let name = Self::canonical(raw)?;
        find_project_by_name(conn, &name)
    }

    /// Lookup by store identifier.
    pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
        find_project_by_id(conn, id)
    }
}
