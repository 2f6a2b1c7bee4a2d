use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::colors::{BLUE, CYAN, GREEN, GREY, RED, RESET, YELLOW};

fn color_for_operation(op: &str) -> &'static str {
    match op {
        "start" | "continue" => GREEN,
        "stop" => BLUE,
        "auto_stop" => YELLOW,
        "pause" => CYAN,
        "del" | "reset" => RED,
        "edit" => YELLOW,
        "migration_applied" | "init" => GREY,
        _ => RESET,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = open_pool(&cfg.database)?;

        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        println!("📜 Internal log:\n");

        for r in rows {
            let (id, raw_date, operation, target, message) = r?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            let op_target = if target.is_empty() {
                operation.clone()
            } else {
                format!("{operation} ({target})")
            };

            println!(
                "{:>4}: {} | {}{:<28}{} => {}",
                id,
                date,
                color_for_operation(&operation),
                op_target,
                RESET,
                message
            );
        }
    }

    Ok(())
}
