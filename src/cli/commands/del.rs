use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sessions::SessionLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

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

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        if !yes
            && !ask_confirmation(&format!(
                "Delete session #{id}? This action is irreversible."
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = open_pool(&cfg.database)?;
        SessionLogic::delete(&mut pool, *id)?;

        success(format!("Session #{id} has been deleted."));
    }
    Ok(())
}
