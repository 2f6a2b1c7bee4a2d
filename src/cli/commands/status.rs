use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::errors::{AppError, AppResult};
use crate::models::timer_phase::TimerPhase;
use crate::ui::messages::{info, warning};
use crate::utils::colors::{CYAN, GREY, RESET, color_for_overtime};
use crate::utils::time::{format_clock, format_duration, now_local};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { json } = cmd {
        let mut pool = open_pool(&cfg.database)?;
        let snapshot = TimerLogic::status(&mut pool, cfg, now_local())?;

        if *json {
            let out = serde_json::to_string_pretty(&snapshot)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{out}");
            return Ok(());
        }

        if snapshot.auto_stopped {
            warning("Daily cap reached, session stopped automatically");
        }

        if snapshot.phase == TimerPhase::Idle {
            info("Timer is idle");
            return Ok(());
        }

        println!();
        println!(
            "{}Status:{} {}",
            CYAN,
            RESET,
            snapshot.phase.as_str()
        );

        if let Some(session) = &snapshot.session {
            println!(
                "{}Session #{}:{} started at {}",
                CYAN,
                session.id,
                RESET,
                format_clock(session.start_time)
            );
            println!(
                "{}Net work:{} {}   {}(pauses: {}, {}){}",
                CYAN,
                RESET,
                session.net_work_formatted,
                GREY,
                session.pause_count,
                format_duration(session.total_pause_seconds),
                RESET
            );
        }

        if let Some(calc) = &snapshot.calculations {
            if let Some(lunch_at) = &calc.lunch_break_at {
                println!("{}Lunch deduction from:{} {}", CYAN, RESET, lunch_at);
            }
            println!(
                "{}Leave times:{} earliest {}  latest {}",
                CYAN, RESET, calc.earliest_leave, calc.latest_leave
            );
            println!(
                "{}Remaining today:{} {}",
                CYAN, RESET, calc.remaining_for_daily
            );
            println!(
                "{}Overtime:{} {}{}{}",
                CYAN,
                RESET,
                color_for_overtime(calc.overtime_seconds),
                calc.overtime_formatted,
                RESET
            );
        }
        println!();
    }
    Ok(())
}
