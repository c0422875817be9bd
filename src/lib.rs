//! rPomodoro library root.
//! Exposes the CLI parser, the high-level run() function, and the core
//! modules (store, resolver, recorder, aggregation, work index, access gate).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Ping { .. } => cli::commands::ping::handle(&cli.command, cfg),
        Commands::Record { .. } => cli::commands::record::handle(&cli.command, cfg),
        Commands::Pomodoro { .. } => cli::commands::pomodoro::handle(&cli.command, cfg),
        Commands::Project { .. } => cli::commands::project::handle(&cli.command, cfg),
        Commands::Projects { .. } => cli::commands::projects::handle(&cli.command, cfg),
        Commands::Active { .. } => cli::commands::active::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ diagnostics (RPOMODORO_LOG)
    utils::logging::init();

    // 3️⃣ load config ONCE
    let mut cfg = Config::load()?;

    // 4️⃣ command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 5️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
