pub mod active;
pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod ping;
pub mod pomodoro;
pub mod project;
pub mod projects;
pub mod record;

use crate::cli::parser::WindowArgs;
use crate::config::{Config, KEY_VAR};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::window::TimeWindow;
use crate::utils::time::{Bound, parse_optional_timestamp};

/// Open the configured database for one command, bringing the schema up to
/// date first. The connection is released when the returned pool drops.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// `--from` / `--to` → closed window (inverted bounds are rejected).
pub(crate) fn parse_window(args: &WindowArgs) -> AppResult<TimeWindow> {
    let from = parse_optional_timestamp(args.from.as_ref(), Bound::Start)?;
    let to = parse_optional_timestamp(args.to.as_ref(), Bound::End)?;
    TimeWindow::checked(from, to)
}

/// Candidate key: `--key`, else the client environment variable.
pub(crate) fn resolve_key(key: &Option<String>) -> Option<String> {
    key.clone().or_else(|| std::env::var(KEY_VAR).ok())
}
