use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine and
/// returns how many migrations were applied.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    // NO direct CREATE TABLE here.
    // All schema is guaranteed by migrations.
    Ok(run_pending_migrations(conn)?)
}
