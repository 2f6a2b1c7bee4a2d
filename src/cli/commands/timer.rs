//! Handlers for the five timer actions. Each one delegates to the state
//! machine and prints the outcome; a refused transition is reported as a
//! warning, not an error.

use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::TimerLogic;
use crate::errors::AppResult;
use crate::models::snapshot::ActionOutcome;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::now_local;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn report(outcome: &ActionOutcome) {
    if outcome.success {
        success(format!("{} [{}]", outcome.message, outcome.phase.as_str()));
    } else {
        warning(format!("{} [{}]", outcome.message, outcome.phase.as_str()));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = open_pool(&cfg.database)?;
    let now = now_local();

    let outcome = match cmd {
        Commands::Start => TimerLogic::start(&mut pool, now)?,
        Commands::Pause => TimerLogic::pause(&mut pool, now)?,
        Commands::Continue => TimerLogic::resume(&mut pool, now)?,
        Commands::Stop => TimerLogic::stop(&mut pool, cfg, now)?,
        Commands::Reset { yes } => {
            if !yes
                && !ask_confirmation("Discard the current session? This action is irreversible.")
            {
                info("Operation cancelled.");
                return Ok(());
            }
            TimerLogic::reset(&mut pool, now)?
        }
        _ => return Ok(()),
    };

    report(&outcome);
    Ok(())
}
