use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::errors::{AppError, AppResult};
use crate::models::summary::{MonthSummary, WeekSummary};
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREY, RESET, color_for_overtime};
use crate::utils::date::today;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { json } = cmd {
        let mut pool = open_pool(&cfg.database)?;
        let report = StatsLogic::statistics(&mut pool, cfg, today())?;

        if *json {
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{out}");
            return Ok(());
        }

        header("This week");
        print_week(&report.this_week);

        header("This month");
        print_month(&report.this_month);

        if !report.recent_sessions.is_empty() {
            header("Recent sessions");

            let mut table = Table::new(vec![
                Column { header: "ID".into(), width: 5 },
                Column { header: "Date".into(), width: 10 },
                Column { header: "Start".into(), width: 6 },
                Column { header: "End".into(), width: 6 },
                Column { header: "Net".into(), width: 7 },
                Column { header: "Overtime".into(), width: 9 },
            ]);

            for s in &report.recent_sessions {
                table.add_row(vec![
                    s.id.to_string(),
                    s.date.clone(),
                    s.start_time.clone(),
                    s.end_time.clone().unwrap_or_else(|| "--:--".into()),
                    s.net_formatted.clone(),
                    s.overtime_formatted.clone(),
                ]);
            }

            println!("{}", table.render());
        }
    }
    Ok(())
}

fn print_week(week: &WeekSummary) {
    println!(
        "{}Total:{} {} / {}   {}({} days, avg {}){}",
        CYAN,
        RESET,
        week.total_formatted,
        week.target_formatted,
        GREY,
        week.days_worked,
        week.avg_per_day_formatted,
        RESET
    );
    println!(
        "{}Overtime:{} {}{}{}",
        CYAN,
        RESET,
        color_for_overtime(week.overtime_seconds),
        week.overtime_formatted,
        RESET
    );
    if let (Some(start), Some(end)) = (&week.average_start_time, &week.average_end_time) {
        println!("{}Average day:{} {} to {}", CYAN, RESET, start, end);
    }
    println!();
}

fn print_month(month: &MonthSummary) {
    println!(
        "{}Total:{} {} / {}   {}({} days, avg {}){}",
        CYAN,
        RESET,
        month.total_formatted,
        month.target_formatted,
        GREY,
        month.days_worked,
        month.avg_per_day_formatted,
        RESET
    );
    println!(
        "{}Overtime:{} {}{}{}",
        CYAN,
        RESET,
        color_for_overtime(month.overtime_seconds),
        month.overtime_formatted,
        RESET
    );
    if let (Some(start), Some(end)) = (&month.average_start_time, &month.average_end_time) {
        println!("{}Average day:{} {} to {}", CYAN, RESET, start, end);
    }
    println!();
}
