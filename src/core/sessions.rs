//! Maintenance of stored sessions: detailed view, editing the bounds of a
//! completed session and deleting non-current sessions.

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::core::accounting;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::session::WorkSession;
use crate::models::summary::{PauseInfo, SessionDetail};
use crate::utils::time::{format_clock, format_duration, format_duration_short};

pub struct SessionLogic;

impl SessionLogic {
    /// Session plus its ordered pause list. Figures for a still-active
    /// session are live against `now`.
    pub fn details(
        pool: &mut DbPool,
        cfg: &Config,
        id: i64,
        now: NaiveDateTime,
    ) -> AppResult<SessionDetail> {
        let session = queries::get_session(&pool.conn, id)?.ok_or(AppError::NotFound(id))?;
        let pauses = queries::load_pauses(&pool.conn, id)?;

        let figures = accounting::compute(session.start_time, session.end_time, &pauses, cfg, now);

        let pause_infos: Vec<PauseInfo> = pauses
            .iter()
            .map(|p| {
                let secs = p.duration_seconds(now);
                PauseInfo {
                    id: p.id,
                    pause_start: format_clock(p.pause_start),
                    pause_end: p.pause_end.map(format_clock),
                    duration_seconds: secs,
                    duration_formatted: format_duration_short(secs),
                }
            })
            .collect();

        Ok(SessionDetail {
            id: session.id,
            date: session.date_str(),
            start_time: format_clock(session.start_time),
            end_time: session.end_time.map(format_clock),
            status: session.status.to_db_str().to_string(),
            gross_seconds: figures.gross_work_seconds,
            gross_formatted: format_duration(figures.gross_work_seconds),
            net_seconds: figures.net_work_seconds,
            net_formatted: format_duration(figures.net_work_seconds),
            total_pause_seconds: figures.total_pause_seconds,
            total_pause_formatted: format_duration(figures.total_pause_seconds),
            overtime_seconds: figures.overtime_seconds,
            overtime_formatted: format_duration(figures.overtime_seconds),
            pause_count: pause_infos.len(),
            pauses: pause_infos,
        })
    }

    /// Change `start_time` and/or `end_time` of a completed session.
    ///
    /// The active session can never be edited; the new bounds must keep
    /// every recorded pause fully contained. Net seconds are recomputed and
    /// persisted on success.
    pub fn edit(
        pool: &mut DbPool,
        cfg: &Config,
        id: i64,
        new_start: Option<NaiveDateTime>,
        new_end: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> AppResult<WorkSession> {
        let tx = pool.conn.transaction()?;

        let session = queries::get_session(&tx, id)?.ok_or(AppError::NotFound(id))?;

        if queries::current_session_id(&tx)? == Some(id) || !session.status.is_completed() {
            return Err(AppError::InvalidState(
                "only completed sessions can be edited".to_string(),
            ));
        }

        let start = new_start.unwrap_or(session.start_time);
        let end = new_end.or(session.end_time).ok_or_else(|| {
            AppError::Validation("completed session has no end_time".to_string())
        })?;

        if start >= end {
            return Err(AppError::Validation(
                "start_time must be before end_time".to_string(),
            ));
        }

        let pauses = queries::load_pauses(&tx, id)?;
        for p in &pauses {
            let pause_end = p.pause_end.ok_or_else(|| {
                AppError::Validation(format!("pause {} is still open", p.id))
            })?;
            if p.pause_start < start || pause_end > end {
                return Err(AppError::Validation(format!(
                    "pause {} ({} to {}) would fall outside the session bounds",
                    p.id,
                    format_clock(p.pause_start),
                    format_clock(pause_end)
                )));
            }
        }

        let figures = accounting::compute(start, Some(end), &pauses, cfg, now);
        queries::update_session_bounds(&tx, id, start, end, figures.net_work_seconds, now)?;
        ttlog(
            &tx,
            "edit",
            &format!("session {id}"),
            &format!(
                "Bounds changed to {} .. {}",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M")
            ),
        )?;
        tx.commit()?;

        queries::get_session(&pool.conn, id)?.ok_or(AppError::NotFound(id))
    }

    /// Delete a stored session and its pauses. Refused for the currently
    /// active session.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let tx = pool.conn.transaction()?;

        if queries::current_session_id(&tx)? == Some(id) {
            return Err(AppError::Conflict(
                "cannot delete the currently active session".to_string(),
            ));
        }

        let deleted = queries::delete_session(&tx, id)?;
        if deleted == 0 {
            return Err(AppError::NotFound(id));
        }

        ttlog(&tx, "del", &format!("session {id}"), "Session deleted")?;
        tx.commit()?;
        Ok(())
    }
}
