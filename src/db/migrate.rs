use rusqlite::{Connection, OptionalExtension, Result, Transaction, TransactionBehavior};

/// A named, idempotent schema step. Applied steps are remembered in `log`
/// as `migration_applied` rows whose target is the version string.
struct Migration {
    version: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_create_core_tables",
        description: "Created project and pomodoro tables",
        apply: create_core_tables,
    },
    Migration {
        version: "0002_add_pomodoro_test_flag",
        description: "Added test flag to pomodoro",
        apply: add_pomodoro_test_flag,
    },
    Migration {
        version: "0003_add_project_last_touched",
        description: "Added last_touched to project",
        apply: add_project_last_touched,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if `column` exists on `table`.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_core_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS project (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS pomodoro (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id  INTEGER NOT NULL REFERENCES project(id),
            duration    INTEGER NOT NULL CHECK(duration > 0),
            start       INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_pomodoro_start ON pomodoro(start);
        CREATE INDEX IF NOT EXISTS idx_pomodoro_project_start ON pomodoro(project_id, start);
        "#,
    )
}

fn add_pomodoro_test_flag(conn: &Connection) -> Result<()> {
    if has_column(conn, "pomodoro", "test")? {
        return Ok(());
    }
    conn.execute_batch("ALTER TABLE pomodoro ADD COLUMN test INTEGER NOT NULL DEFAULT 0;")
}

fn add_project_last_touched(conn: &Connection) -> Result<()> {
    if !has_column(conn, "project", "last_touched")? {
        conn.execute_batch(
            "ALTER TABLE project ADD COLUMN last_touched INTEGER NOT NULL DEFAULT 0;",
        )?;
    }

    // projects recorded before the column existed get their most recent start
    conn.execute_batch(
        r#"
        UPDATE project
           SET last_touched = IFNULL(
               (SELECT MAX(start) FROM pomodoro WHERE pomodoro.project_id = project.id), 0)
         WHERE last_touched = 0;
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Number of migrations not yet recorded as applied.
pub fn pending_count(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;
    let mut n = 0;
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            n += 1;
        }
    }
    Ok(n)
}

/// Public entry point: run all pending migrations, each in its own transaction.
/// Returns how many were applied by this call.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        // re-checked under the write lock: another process may have won the race
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        if is_applied(&tx, m.version)? {
            continue;
        }

        (m.apply)(&tx)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )?;
        tx.commit()?;

        tracing::info!(version = m.version, "{}", m.description);
        applied += 1;
    }

    Ok(applied)
}
