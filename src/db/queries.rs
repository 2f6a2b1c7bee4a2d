//! All SQL against the session store lives here: row mappers, singleton
//! timer-state access (including the start compare-and-set) and the
//! session/pause CRUD used by the core logic.

use crate::errors::{AppError, AppResult};
use crate::models::pause::PausePeriod;
use crate::models::session::WorkSession;
use crate::models::session_status::SessionStatus;
use crate::utils::date::period_filter;
use crate::utils::time::{DATE_FMT, DATETIME_FMT};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn parse_db_datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(s.to_string())),
        )
    })
}

pub fn map_session(row: &Row) -> Result<WorkSession> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let start_str: String = row.get("start_time")?;
    let end_str: Option<String> = row.get("end_time")?;

    let status_str: String = row.get("status")?;
    let status = SessionStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid status: {}", status_str))),
        )
    })?;

    Ok(WorkSession {
        id: row.get("id")?,
        date,
        start_time: parse_db_datetime(&start_str)?,
        end_time: end_str.as_deref().map(parse_db_datetime).transpose()?,
        net_seconds: row.get("net_seconds")?,
        status,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn map_pause(row: &Row) -> Result<PausePeriod> {
    let start_str: String = row.get("pause_start")?;
    let end_str: Option<String> = row.get("pause_end")?;

    Ok(PausePeriod {
        id: row.get("id")?,
        session_id: row.get("session_id")?,
        pause_start: parse_db_datetime(&start_str)?,
        pause_end: end_str.as_deref().map(parse_db_datetime).transpose()?,
    })
}

// -------------------------------------------------------------------
// Timer state (singleton row)
// -------------------------------------------------------------------

/// Read the current session id from the singleton row.
pub fn current_session_id(conn: &Connection) -> AppResult<Option<i64>> {
    let mut stmt =
        conn.prepare_cached("SELECT current_session_id FROM timer_state WHERE id = 1")?;
    let id: Option<i64> = stmt
        .query_row([], |row| row.get(0))
        .optional()?
        .flatten();
    Ok(id)
}

/// Compare-and-set claim of the timer: succeeds only if no session is
/// current. This is the one write that must be a single conditional UPDATE,
/// never a read followed by a write.
pub fn try_claim_timer(conn: &Connection, session_id: i64) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE timer_state SET current_session_id = ?1
         WHERE id = 1 AND current_session_id IS NULL",
        [session_id],
    )?;
    Ok(changed == 1)
}

pub fn clear_current_session(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "UPDATE timer_state SET current_session_id = NULL WHERE id = 1",
        [],
    )?;
    Ok(())
}

// -------------------------------------------------------------------
// Sessions
// -------------------------------------------------------------------

/// Insert a new running session starting at `now`. Returns its id.
pub fn insert_session(conn: &Connection, now: NaiveDateTime) -> AppResult<i64> {
    let stamp = now.format(DATETIME_FMT).to_string();
    conn.execute(
        "INSERT INTO work_sessions (date, start_time, status, created_at, updated_at)
         VALUES (?1, ?2, 'running', ?3, ?3)",
        params![now.format(DATE_FMT).to_string(), stamp, stamp],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_session(conn: &Connection, id: i64) -> AppResult<Option<WorkSession>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM work_sessions WHERE id = ?1")?;
    match stmt.query_row([id], map_session) {
        Ok(s) => Ok(Some(s)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set_session_status(
    conn: &Connection,
    id: i64,
    status: SessionStatus,
    now: NaiveDateTime,
) -> AppResult<()> {
    conn.execute(
        "UPDATE work_sessions SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.to_db_str(), now.format(DATETIME_FMT).to_string(), id],
    )?;
    Ok(())
}

/// Complete a session: set end_time, the capped net seconds and the status
/// in one statement.
pub fn finalize_session(
    conn: &Connection,
    id: i64,
    end: NaiveDateTime,
    net_seconds: i64,
) -> AppResult<()> {
    let stamp = end.format(DATETIME_FMT).to_string();
    conn.execute(
        "UPDATE work_sessions
         SET end_time = ?1, net_seconds = ?2, status = 'completed', updated_at = ?3
         WHERE id = ?4",
        params![stamp, net_seconds, stamp, id],
    )?;
    Ok(())
}

/// Rewrite the time bounds of a completed session after an edit.
pub fn update_session_bounds(
    conn: &Connection,
    id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
    net_seconds: i64,
    now: NaiveDateTime,
) -> AppResult<()> {
    conn.execute(
        "UPDATE work_sessions
         SET date = ?1, start_time = ?2, end_time = ?3, net_seconds = ?4, updated_at = ?5
         WHERE id = ?6",
        params![
            start.format(DATE_FMT).to_string(),
            start.format(DATETIME_FMT).to_string(),
            end.format(DATETIME_FMT).to_string(),
            net_seconds,
            now.format(DATETIME_FMT).to_string(),
            id
        ],
    )?;
    Ok(())
}

/// Delete a session together with its pauses. Returns rows deleted from
/// work_sessions (0 or 1).
pub fn delete_session(conn: &Connection, id: i64) -> AppResult<usize> {
    // explicit pause delete so the result does not depend on the
    // foreign_keys pragma of the connection at hand
    conn.execute("DELETE FROM pause_periods WHERE session_id = ?1", [id])?;
    let n = conn.execute("DELETE FROM work_sessions WHERE id = ?1", [id])?;
    Ok(n)
}

/// Completed sessions with `date` in [from, to], oldest first.
pub fn completed_between(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<WorkSession>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM work_sessions
         WHERE status = 'completed' AND date >= ?1 AND date <= ?2
         ORDER BY date ASC, start_time ASC",
    )?;
    let rows = stmt.query_map(
        [from.format(DATE_FMT).to_string(), to.format(DATE_FMT).to_string()],
        map_session,
    )?;
    rows.collect::<Result<Vec<_>>>().map_err(Into::into)
}

/// The most recently completed sessions, newest first.
pub fn recent_completed(conn: &Connection, limit: i64) -> AppResult<Vec<WorkSession>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM work_sessions
         WHERE status = 'completed'
         ORDER BY date DESC, start_time DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map([limit], map_session)?;
    rows.collect::<Result<Vec<_>>>().map_err(Into::into)
}

/// All sessions, optionally filtered by a period (YYYY, YYYY-MM or
/// YYYY-MM-DD), oldest first.
pub fn list_sessions(conn: &Connection, period: Option<&str>) -> AppResult<Vec<WorkSession>> {
    let mut sql = "SELECT * FROM work_sessions".to_string();
    let mut param: Option<String> = None;

    if let Some(p) = period {
        let (cond, value) =
            period_filter(p).ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
        sql.push_str(" WHERE ");
        sql.push_str(cond);
        param = Some(value);
    }

    sql.push_str(" ORDER BY date ASC, start_time ASC");

    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = match &param {
        Some(v) => stmt.query_map([v], map_session)?,
        None => stmt.query_map([], map_session)?,
    };
    rows.collect::<Result<Vec<_>>>().map_err(Into::into)
}

// -------------------------------------------------------------------
// Pauses
// -------------------------------------------------------------------

/// Open a new pause for the session at `now`.
pub fn open_pause(conn: &Connection, session_id: i64, now: NaiveDateTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO pause_periods (session_id, pause_start) VALUES (?1, ?2)",
        params![session_id, now.format(DATETIME_FMT).to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Close the session's open pause, if any. Returns rows changed (0 or 1;
/// the invariant guarantees at most one open pause per session).
pub fn close_open_pause(
    conn: &Connection,
    session_id: i64,
    now: NaiveDateTime,
) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE pause_periods SET pause_end = ?1
         WHERE session_id = ?2 AND pause_end IS NULL",
        params![now.format(DATETIME_FMT).to_string(), session_id],
    )?;
    Ok(changed)
}

/// Pauses of a session ordered by start time.
pub fn load_pauses(conn: &Connection, session_id: i64) -> AppResult<Vec<PausePeriod>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM pause_periods WHERE session_id = ?1 ORDER BY pause_start ASC",
    )?;
    let rows = stmt.query_map([session_id], map_pause)?;
    rows.collect::<Result<Vec<_>>>().map_err(Into::into)
}
