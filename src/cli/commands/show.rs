use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sessions::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREY, RESET, color_for_overtime};
use crate::utils::time::now_local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id, json } = cmd {
        let mut pool = open_pool(&cfg.database)?;
        let detail = SessionLogic::details(&mut pool, cfg, *id, now_local())?;

        if *json {
            let out = serde_json::to_string_pretty(&detail)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{out}");
            return Ok(());
        }

        println!();
        println!(
            "{}Session #{}:{} {} [{}]",
            CYAN, detail.id, RESET, detail.date, detail.status
        );
        println!(
            "{}Times:{} {} to {}",
            CYAN,
            RESET,
            detail.start_time,
            detail.end_time.clone().unwrap_or_else(|| "--:--".into())
        );
        println!(
            "{}Gross:{} {}   {}Net:{} {}   {}Pauses:{} {}",
            CYAN,
            RESET,
            detail.gross_formatted,
            CYAN,
            RESET,
            detail.net_formatted,
            CYAN,
            RESET,
            detail.total_pause_formatted
        );
        println!(
            "{}Overtime:{} {}{}{}",
            CYAN,
            RESET,
            color_for_overtime(detail.overtime_seconds),
            detail.overtime_formatted,
            RESET
        );

        if detail.pauses.is_empty() {
            println!("{}No pause periods.{}", GREY, RESET);
        } else {
            println!("{}Pause periods:{}", CYAN, RESET);
            for p in &detail.pauses {
                println!(
                    "  #{} {} to {} ({})",
                    p.id,
                    p.pause_start,
                    p.pause_end.clone().unwrap_or_else(|| "open".into()),
                    p.duration_formatted
                );
            }
        }
        println!();
    }
    Ok(())
}
