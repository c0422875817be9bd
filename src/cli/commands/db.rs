use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use rusqlite::Connection;

/// `PRAGMA integrity_check` plus orphaned-row detection.
fn check(conn: &Connection) -> AppResult<bool> {
    println!("{}▶ Running integrity check…{}", CYAN, RESET);

    let integrity: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity != "ok" {
        println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
        return Ok(false);
    }

    // rows whose project_id points nowhere (one row per violation)
    let mut stmt = conn.prepare("PRAGMA foreign_key_check;")?;
    let orphans = stmt.query_map([], |_| Ok(()))?.count();
    if orphans > 0 {
        println!(
            "{}✘ Foreign key check failed:{} {} orphaned row(s)\n",
            RED, RESET, orphans
        );
        return Ok(false);
    }

    println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
    Ok(true)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check: do_check,
        vacuum,
        info: do_info,
    } = cmd
    {
        if !(*migrate || *do_check || *vacuum || *do_info) {
            info("Nothing to do: pass --migrate, --check, --vacuum or --info.");
            return Ok(());
        }

        // one connection for every requested action, deliberately not
        // migrated on open so --info can report pending migrations
        let mut pool = DbPool::new(&cfg.database)?;

        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            println!(
                "{}✔ Migration completed ({} applied).{}\n",
                GREEN, applied, RESET
            );
        }

        if *do_info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        if *do_check && !check(&pool.conn)? {
            return Err(AppError::Other("database check failed".into()));
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
