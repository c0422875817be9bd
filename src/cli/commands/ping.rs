use crate::cli::commands::{open_pool, resolve_key};
use crate::cli::output::print_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::gate::AccessGate;
use crate::errors::AppResult;
use crate::utils::colors::colorize_flag;

/// Liveness: whether the key is accepted and whether any data exists.
/// Answers even when the key is wrong.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ping { key, json } = cmd {
        let pool = open_pool(cfg)?;
        let gate = AccessGate::new(cfg.secret());
        let key = resolve_key(key);

        let live = gate.liveness(&pool.conn, key.as_deref())?;

        if *json {
            print_json(&live)?;
        } else {
            println!("authorized:          {}", colorize_flag(live.authorized));
            println!("any pomodoros exist: {}", colorize_flag(live.any_pomodoros_exist));
        }
    }

    Ok(())
}
