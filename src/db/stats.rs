use crate::db::migrate::pending_count;
use crate::db::pool::DbPool;
use crate::db::queries::{count_pomodoros, count_projects};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::{secs2readable, ts2local};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let projects = count_projects(&pool.conn)?;
    let pomodoros = count_pomodoros(&pool.conn)?;
    let total_secs: i64 = pool.conn.query_row(
        // TOTAL is a float and never overflows; clamp back into i64
        "SELECT CAST(MIN(TOTAL(duration), 9223372036854775807) AS INTEGER) FROM pomodoro",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Projects:{} {}{}{}", CYAN, RESET, GREEN, projects, RESET);
    println!("{}• Pomodoros:{} {}{}{}", CYAN, RESET, GREEN, pomodoros, RESET);
    println!(
        "{}• Recorded time:{} {}",
        CYAN,
        RESET,
        secs2readable(total_secs)
    );

    //
    // 3) START RANGE
    //
    let range: Option<(i64, i64)> = pool
        .conn
        .query_row(
            "SELECT MIN(start), MAX(start) FROM pomodoro HAVING COUNT(*) > 0",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (fmt_first, fmt_last) = match range {
        Some((first, last)) => (ts2local(first), ts2local(last)),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Start range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) SCHEMA
    //
    let pending = pending_count(&pool.conn)?;
    if pending == 0 {
        println!("{}• Schema:{} up to date", CYAN, RESET);
    } else {
        println!(
            "{}• Schema:{} {}{} pending migration(s){}",
            CYAN, RESET, YELLOW, pending, RESET
        );
    }

    println!();
    Ok(())
}
