use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        force,
    } = cmd
    {
        let mut pool = open_pool(&cfg.database)?;
        ExportLogic::export(&mut pool, cfg, format, file, period.as_deref(), *force)?;
    }
    Ok(())
}
