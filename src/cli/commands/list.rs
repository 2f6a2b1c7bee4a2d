use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::session_summary;
use crate::db::queries::list_sessions;
use crate::errors::AppResult;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period } = cmd {
        let mut pool = open_pool(&cfg.database)?;
        let sessions = list_sessions(&pool.conn, period.as_deref())?;

        if sessions.is_empty() {
            println!("No sessions found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column { header: "ID".into(), width: 5 },
            Column { header: "Date".into(), width: 10 },
            Column { header: "Start".into(), width: 6 },
            Column { header: "End".into(), width: 6 },
            Column { header: "Net".into(), width: 7 },
            Column { header: "Overtime".into(), width: 9 },
            Column { header: "Status".into(), width: 9 },
        ]);

        let count = sessions.len();
        for s in &sessions {
            let row = session_summary(s, cfg);
            table.add_row(vec![
                row.id.to_string(),
                row.date,
                row.start_time,
                row.end_time.unwrap_or_else(|| "--:--".into()),
                row.net_formatted,
                row.overtime_formatted,
                row.status,
            ]);
        }

        println!("{}", table.render());
        println!("{} session(s)", count);
    }
    Ok(())
}
