use crate::cli::commands::{open_pool, resolve_key};
use crate::cli::output::print_json;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::gate::AccessGate;
use crate::core::recorder::{PomodoroRecorder, RecordRequest};
use crate::core::resolver::ProjectResolver;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::formatting::{secs2readable, ts2local};
use crate::utils::time::{Bound, parse_duration, parse_optional_timestamp};

/// Name of the current working directory, the default project.
fn current_dir_name() -> AppResult<String> {
    let cwd = std::env::current_dir()?;
    cwd.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            AppError::Validation("no --name given and the current directory has no name".into())
        })
}

/// Record a completed pomodoro.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        name,
        duration,
        start,
        test,
        key,
        json,
    } = cmd
    {
        //
        // 1. Key check comes first: a refused key touches nothing
        //
        let gate = AccessGate::new(cfg.secret());
        let key = resolve_key(key);
        gate.require(key.as_deref())?;

        //
        // 2. Parse input
        //
        let project = match name {
            Some(n) => n.clone(),
            None => current_dir_name()?,
        };
        let dur = parse_duration(duration.as_deref().unwrap_or(&cfg.default_duration))?;
        let start = parse_optional_timestamp(start.as_ref(), Bound::Start)?;

        let mut req = RecordRequest::new(dur, &project).test(*test);
        if let Some(s) = start {
            req = req.starting_at(s);
        }

        //
        // 3. Store
        //
        let mut pool = open_pool(cfg)?;
        let pomo = PomodoroRecorder::record(&mut pool, &gate, key.as_deref(), &req)?;

        if *json {
            print_json(&pomo)?;
        } else {
            success(format!(
                "Pomodoro #{} added to {}: {} starting {}",
                pomo.id,
                ProjectResolver::normalize(&project),
                secs2readable(pomo.duration),
                ts2local(pomo.start)
            ));
        }
    }

    Ok(())
}
