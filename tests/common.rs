#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rpomodoro::core::gate::AccessGate;
use rpomodoro::db::initialize::init_db;
use rpomodoro::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const SECRET: &str = "s3cret";

/// Fixed "now" for library-level tests: 2023-11-14T22:13:20Z
pub const NOW: i64 = 1_700_000_000;

/// Binary under test, isolated from the user's config and key.
pub fn rpo() -> Command {
    let mut cmd = cargo_bin_cmd!("rpomodoro");
    cmd.env("HOME", test_home())
        .env("RPOMODORO_SECRET", SECRET)
        .env_remove("RPOMODORO_KEY")
        .env_remove("RPOMODORO_LOG");
    cmd
}

/// Empty HOME so no real config file is picked up
pub fn test_home() -> PathBuf {
    let mut path = env::temp_dir();
    path.push("rpomodoro_test_home");
    fs::create_dir_all(&path).ok();
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpomodoro.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh, migrated database opened through the library API
pub fn open_test_pool(name: &str) -> (DbPool, String) {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    (pool, db_path)
}

pub fn gate() -> AccessGate {
    AccessGate::new(Some(SECRET.to_string()))
}

pub fn count(pool: &DbPool, table: &str) -> i64 {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count")
}
