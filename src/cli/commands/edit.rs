use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sessions::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::time::{format_duration, now_local, parse_user_datetime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, start, end } = cmd {
        if start.is_none() && end.is_none() {
            return Err(AppError::Validation(
                "nothing to edit: pass --start and/or --end".to_string(),
            ));
        }

        let new_start = start.as_deref().map(parse_user_datetime).transpose()?;
        let new_end = end.as_deref().map(parse_user_datetime).transpose()?;

        let mut pool = open_pool(&cfg.database)?;
        let session = SessionLogic::edit(&mut pool, cfg, *id, new_start, new_end, now_local())?;

        success(format!(
            "Session {} updated, net work is now {}",
            session.id,
            format_duration(session.net_seconds.unwrap_or(0))
        ));
    }
    Ok(())
}
