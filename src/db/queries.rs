use crate::errors::{AppError, AppResult};
use crate::models::pomodoro::Pomodoro;
use crate::models::project::Project;
use crate::models::window::TimeWindow;
use rusqlite::{Connection, OptionalExtension, Result, Row, named_params, params};

/// The one time filter every windowed read shares. Binds `:from` / `:to`;
/// a NULL bound leaves that side of the window open.
pub const WINDOW_PREDICATE: &str =
    "(:from IS NULL OR pomodoro.start >= :from) AND (:to IS NULL OR pomodoro.start <= :to)";

/// Canonical read order for pomodoros: most recent first.
const POMODORO_ORDER: &str = "ORDER BY pomodoro.start DESC, pomodoro.id DESC";

/// Canonical order for project listings: most recently touched first.
const PROJECT_ORDER: &str = "ORDER BY project.last_touched DESC, project.id ASC";

/// Attempts at get-or-create before giving up on a contended name.
const INSERT_RETRIES: usize = 3;

pub fn map_project(row: &Row) -> Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        last_touched: row.get("last_touched")?,
    })
}

pub fn map_pomodoro(row: &Row) -> Result<Pomodoro> {
    Ok(Pomodoro {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        duration: row.get("duration")?,
        start: row.get("start")?,
        test: row.get::<_, i32>("test")? == 1,
    })
}

// ---------------------------
// Projects
// ---------------------------

pub fn find_project_by_id(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let p = conn
        .query_row(
            "SELECT id, name, last_touched FROM project WHERE id = ?1",
            [id],
            map_project,
        )
        .optional()?;
    Ok(p)
}

/// Lookup by canonical name. The caller normalizes.
pub fn find_project_by_name(conn: &Connection, canonical: &str) -> AppResult<Option<Project>> {
    let p = conn
        .query_row(
            "SELECT id, name, last_touched FROM project WHERE name = ?1",
            [canonical],
            map_project,
        )
        .optional()?;
    Ok(p)
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Get-or-create on the canonical name. The UNIQUE constraint on
/// `project.name` decides who creates the row; losing that race turns into
/// a lookup. Returns the project and whether this call created it.
pub fn insert_project_if_absent(conn: &Connection, canonical: &str) -> AppResult<(Project, bool)> {
    get_or_create_with(conn, canonical, find_project_by_name)
}

/// The get-or-create loop, with the lookup step supplied by the caller.
fn get_or_create_with<F>(
    conn: &Connection,
    canonical: &str,
    mut lookup: F,
) -> AppResult<(Project, bool)>
where
    F: FnMut(&Connection, &str) -> AppResult<Option<Project>>,
{
    for attempt in 0..INSERT_RETRIES {
        if let Some(p) = lookup(conn, canonical)? {
            return Ok((p, false));
        }

        match conn.execute(
            "INSERT INTO project (name, last_touched) VALUES (?1, 0)",
            [canonical],
        ) {
            Ok(_) => {
                let project = Project {
                    id: conn.last_insert_rowid(),
                    name: canonical.to_string(),
                    last_touched: 0,
                };
                return Ok((project, true));
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(name = canonical, attempt, "project created concurrently, retrying lookup");
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::Other(format!(
        "project '{}' could not be resolved after {} attempts",
        canonical, INSERT_RETRIES
    )))
}

/// Set the recency marker of a project.
pub fn touch_project(conn: &Connection, project_id: i64, ts: i64) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE project SET last_touched = ?1 WHERE id = ?2",
        params![ts, project_id],
    )?;
    if n != 1 {
        return Err(AppError::Other(format!(
            "project {} vanished while recording",
            project_id
        )));
    }
    Ok(())
}

pub fn load_all_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, last_touched FROM project {PROJECT_ORDER}"
    ))?;

    let rows = stmt.query_map([], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Projects owning at least one pomodoro inside `window`.
pub fn load_projects_active_in(conn: &Connection, window: &TimeWindow) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT project.id AS id, project.name AS name, project.last_touched AS last_touched
         FROM project
         WHERE EXISTS (
             SELECT 1 FROM pomodoro
             WHERE pomodoro.project_id = project.id AND {WINDOW_PREDICATE}
         )
         {PROJECT_ORDER}"
    ))?;

    let rows = stmt.query_map(
        named_params! { ":from": window.from, ":to": window.to },
        map_project,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_projects(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM project", [], |row| row.get(0))?)
}

// ---------------------------
// Pomodoros
// ---------------------------

pub fn insert_pomodoro(
    conn: &Connection,
    project_id: i64,
    duration: i64,
    start: i64,
    test: bool,
) -> AppResult<Pomodoro> {
    conn.execute(
        "INSERT INTO pomodoro (project_id, duration, start, test)
         VALUES (?1, ?2, ?3, ?4)",
        params![project_id, duration, start, if test { 1 } else { 0 }],
    )?;

    Ok(Pomodoro {
        id: conn.last_insert_rowid(),
        project_id,
        duration,
        start,
        test,
    })
}

pub fn find_pomodoro_by_id(conn: &Connection, id: i64) -> AppResult<Option<Pomodoro>> {
    let p = conn
        .query_row(
            "SELECT id, project_id, duration, start, test FROM pomodoro WHERE id = ?1",
            [id],
            map_pomodoro,
        )
        .optional()?;
    Ok(p)
}

/// Pomodoros of one project inside `window`, most recent first.
pub fn load_pomodoros_for_project(
    conn: &Connection,
    project_id: i64,
    window: &TimeWindow,
) -> AppResult<Vec<Pomodoro>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT id, project_id, duration, start, test
         FROM pomodoro
         WHERE pomodoro.project_id = :project AND {WINDOW_PREDICATE}
         {POMODORO_ORDER}"
    ))?;

    let rows = stmt.query_map(
        named_params! { ":project": project_id, ":from": window.from, ":to": window.to },
        map_pomodoro,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every pomodoro inside `window` paired with its project name, most recent first.
pub fn load_pomodoros_in(
    conn: &Connection,
    window: &TimeWindow,
) -> AppResult<Vec<(String, Pomodoro)>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT pomodoro.id AS id, pomodoro.project_id AS project_id,
                pomodoro.duration AS duration, pomodoro.start AS start,
                pomodoro.test AS test, project.name AS project_name
         FROM pomodoro
         JOIN project ON project.id = pomodoro.project_id
         WHERE {WINDOW_PREDICATE}
         {POMODORO_ORDER}"
    ))?;

    let rows = stmt.query_map(
        named_params! { ":from": window.from, ":to": window.to },
        |row| Ok((row.get::<_, String>("project_name")?, map_pomodoro(row)?)),
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Cheap existence probe: reads at most one row.
pub fn any_pomodoro_exists(conn: &Connection) -> AppResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM pomodoro LIMIT 1", [], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

pub fn count_pomodoros(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM pomodoro", [], |row| row.get(0))?)
}
