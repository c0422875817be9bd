use crate::cli::commands::{open_pool, parse_window};
use crate::cli::output::{print_json, print_summary};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::Aggregator;
use crate::core::resolver::ProjectResolver;
use crate::errors::AppResult;
use crate::ui::messages::not_found;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Project { name, window, json } = cmd {
        let window = parse_window(window)?;
        let pool = open_pool(cfg)?;

        let Some(project) = ProjectResolver::find_by_name(&pool.conn, name)? else {
            if *json {
                println!("null");
            } else {
                not_found(format!("Project '{}'", ProjectResolver::normalize(name)));
            }
            return Ok(());
        };

        let summary = Aggregator::aggregate(&pool.conn, &project, &window)?;

        if *json {
            print_json(&summary)?;
        } else {
            print_summary(&summary, &window, true, &cfg.separator_char);
            println!();
        }
    }

    Ok(())
}
