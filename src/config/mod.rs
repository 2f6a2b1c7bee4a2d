use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// The daily requirement divides the weekly quota over a fixed 5-day week.
/// If a different span is ever needed this must become a config field, not
/// a silent reinterpretation.
pub const WORK_DAYS_PER_WEEK: i64 = 5;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: f64,
    #[serde(default = "default_max_daily_hours")]
    pub max_daily_hours: f64,
    #[serde(default = "default_lunch_threshold_hours")]
    pub lunch_threshold_hours: f64,
    #[serde(default = "default_lunch_duration_minutes")]
    pub lunch_duration_minutes: i64,
}

fn default_weekly_hours() -> f64 {
    41.0
}
fn default_max_daily_hours() -> f64 {
    10.0
}
fn default_lunch_threshold_hours() -> f64 {
    6.0
}
fn default_lunch_duration_minutes() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            weekly_hours: default_weekly_hours(),
            max_daily_hours: default_max_daily_hours(),
            lunch_threshold_hours: default_lunch_threshold_hours(),
            lunch_duration_minutes: default_lunch_duration_minutes(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".timeclock")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timeclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timeclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).unwrap();
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }

    // ---------------------------------------------------------------
    // Derived accounting values
    // ---------------------------------------------------------------

    /// Seconds of net work required per day (weekly quota over 5 days).
    pub fn required_daily_seconds(&self) -> i64 {
        (self.weekly_hours * 3600.0 / WORK_DAYS_PER_WEEK as f64).round() as i64
    }

    /// The accounting ceiling: net work is never reported above this.
    pub fn max_daily_seconds(&self) -> i64 {
        (self.max_daily_hours * 3600.0).round() as i64
    }

    pub fn lunch_threshold_seconds(&self) -> i64 {
        (self.lunch_threshold_hours * 3600.0).round() as i64
    }

    pub fn lunch_deduction_seconds(&self) -> i64 {
        self.lunch_duration_minutes * 60
    }

    /// Weekly quota in seconds, used as the statistics week target.
    pub fn weekly_target_seconds(&self) -> i64 {
        (self.weekly_hours * 3600.0).round() as i64
    }
}
