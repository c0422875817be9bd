use crate::cli::commands::open_pool;
use crate::cli::output::{print_json, print_pomodoro};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::ProjectResolver;
use crate::db::queries::find_pomodoro_by_id;
use crate::errors::AppResult;
use crate::ui::messages::not_found;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pomodoro { id, json } = cmd {
        let pool = open_pool(cfg)?;

        match find_pomodoro_by_id(&pool.conn, *id)? {
            Some(p) if *json => print_json(&p)?,
            Some(p) => {
                let project = ProjectResolver::find_by_id(&pool.conn, p.project_id)?;
                print_pomodoro(&p, project.as_ref().map(|pr| pr.name.as_str()));
            }
            None if *json => println!("null"),
            None => not_found(format!("Pomodoro #{id}")),
        }
    }

    Ok(())
}
