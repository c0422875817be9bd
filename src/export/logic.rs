use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::load_pomodoros_in;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, PomodoroExport};
use crate::models::window::TimeWindow;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

pub struct ExportLogic;

impl ExportLogic {
    /// Write every pomodoro whose start lies in `window` to `file`, most
    /// recent first. Returns the number of rows written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        window: &TimeWindow,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);
        ensure_writable(&path, force)?;

        let rows: Vec<PomodoroExport> = load_pomodoros_in(&pool.conn, window)?
            .into_iter()
            .map(|(project, p)| PomodoroExport::new(project, &p))
            .collect();

        if rows.is_empty() {
            warning(format!("No pomodoros in {window}. Nothing to export."));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} rows as {}", rows.len(), format.as_str()),
        )?;

        Ok(rows.len())
    }
}
