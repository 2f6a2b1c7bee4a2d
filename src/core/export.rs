//! Export of completed sessions to CSV or JSON files.

use clap::ValueEnum;
use csv::Writer;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::time::{format_datetime, format_duration};

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Flat record shape shared by both formats.
#[derive(Serialize, Clone, Debug)]
pub struct SessionExport {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub net_seconds: i64,
    pub net_formatted: String,
    pub overtime_seconds: i64,
    pub status: String,
}

pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        format: &ExportFormat,
        file: &str,
        period: Option<&str>,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(file, force)?;

        let rows: Vec<SessionExport> = queries::list_sessions(&pool.conn, period)?
            .into_iter()
            .filter(|s| s.status.is_completed())
            .map(|s| {
                let net = s.net_seconds.unwrap_or(0);
                SessionExport {
                    id: s.id,
                    date: s.date_str(),
                    start_time: format_datetime(s.start_time),
                    end_time: s.end_time.map(format_datetime).unwrap_or_default(),
                    net_seconds: net,
                    net_formatted: format_duration(net),
                    overtime_seconds: net - cfg.required_daily_seconds(),
                    status: s.status.to_db_str().to_string(),
                }
            })
            .collect();

        match format {
            ExportFormat::Csv => write_csv(file, &rows)?,
            ExportFormat::Json => write_json(file, &rows)?,
        }

        success(format!(
            "{} export completed: {} ({} sessions)",
            format.as_str().to_uppercase(),
            file,
            rows.len()
        ));
        Ok(())
    }
}

/// Refuse to overwrite an existing file unless --force was given; create
/// missing parent directories.
fn ensure_writable(file: &str, force: bool) -> AppResult<()> {
    let path = Path::new(file);
    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "file '{}' already exists (use --force to overwrite)",
            file
        )));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn write_csv(path: &str, rows: &[SessionExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json(path: &str, rows: &[SessionExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::Export(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}
