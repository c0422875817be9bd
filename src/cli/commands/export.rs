use crate::cli::commands::{open_pool, parse_window};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        window,
        force,
    } = cmd
    {
        let window = parse_window(window)?;
        let mut pool = open_pool(cfg)?;
        ExportLogic::export(&mut pool, *format, file, &window, *force)?;
    }

    Ok(())
}
