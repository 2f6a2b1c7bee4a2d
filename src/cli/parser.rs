use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for timeclock
/// CLI application to track daily work sessions with SQLite
#[derive(Parser)]
#[command(
    name = "timeclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A self-hosted work-time tracker: run a daily session with pauses and track overtime using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Start a new work session
    Start,

    /// Pause the current session
    Pause,

    /// Resume the paused session
    Continue,

    /// Stop the current session and save it
    Stop,

    /// Discard the current session without saving
    Reset {
        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Show the current timer status with live figures
    Status {
        #[arg(long = "json", help = "Print the status snapshot as JSON")]
        json: bool,
    },

    /// Show weekly and monthly statistics
    Stats {
        #[arg(long = "json", help = "Print the statistics as JSON")]
        json: bool,
    },

    /// List stored sessions
    List {
        #[arg(
            long,
            short,
            help = "Filter by year (YYYY), month (YYYY-MM) or day (YYYY-MM-DD)"
        )]
        period: Option<String>,
    },

    /// Show one session with its pause periods
    Show {
        /// Session id
        id: i64,

        #[arg(long = "json", help = "Print the session details as JSON")]
        json: bool,
    },

    /// Edit the time bounds of a completed session
    Edit {
        /// Session id
        id: i64,

        #[arg(
            long = "start",
            value_name = "DATETIME",
            help = "New start time (YYYY-MM-DD HH:MM)"
        )]
        start: Option<String>,

        #[arg(
            long = "end",
            value_name = "DATETIME",
            help = "New end time (YYYY-MM-DD HH:MM)"
        )]
        end: Option<String>,
    },

    /// Delete a stored session by id
    Del {
        /// Session id
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Export completed sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "PERIOD",
            help = "Filter export by year, month or day"
        )]
        period: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
