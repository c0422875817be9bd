use crate::cli::commands::{open_pool, parse_window};
use crate::cli::output::{print_json, print_summary_list};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::work_index::WorkIndex;
use crate::errors::AppResult;

/// Projects with work inside the window.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Active {
        window,
        json,
        details,
    } = cmd
    {
        let window = parse_window(window)?;
        let pool = open_pool(cfg)?;

        let list = WorkIndex::find_active_projects(&pool.conn, &window)?;

        if *json {
            print_json(&list)?;
        } else {
            print_summary_list(&list, &window, *details, &cfg.separator_char);
        }
    }

    Ok(())
}
