use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with --sandbox)
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURATION
    //
    let db_path = Config::init_all(cli.db.clone(), cli.sandbox)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rPomodoro…");
    if !cli.sandbox {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ OPEN DB + MIGRATIONS
    //
    let pool = DbPool::new(&db_path)?;
    let applied = init_db(&pool.conn)?;

    println!(
        "✅ Database initialized at {} ({} migration(s) applied)",
        &db_path, applied
    );

    //
    // 3️⃣ INTERNAL LOG (non-blocking)
    //
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rPomodoro initialization completed!");
    Ok(())
}
