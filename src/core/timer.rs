//! The timer state machine: interprets start/pause/continue/stop/reset
//! against the persisted singleton state, enforces the legal transitions
//! and performs the compare-and-set protection on session creation.
//!
//! Every action runs in a single transaction so the session-status update
//! and any pause-row update are atomic together. A refused transition is an
//! `ActionOutcome` with `success = false`, never an `Err`.

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::config::Config;
use crate::core::accounting;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::session::WorkSession;
use crate::models::session_status::SessionStatus;
use crate::models::snapshot::{ActionOutcome, Calculations, SessionInfo, StatusSnapshot};
use crate::models::timer_phase::TimerPhase;
use crate::utils::time::{format_clock, format_duration};

pub struct TimerLogic;

/// The session the singleton row points at, if any.
fn current_session(conn: &Connection) -> AppResult<Option<WorkSession>> {
    match queries::current_session_id(conn)? {
        Some(id) => queries::get_session(conn, id),
        None => Ok(None),
    }
}

fn current_phase(conn: &Connection) -> AppResult<TimerPhase> {
    Ok(match current_session(conn)? {
        Some(s) => TimerPhase::from_status(s.status),
        None => TimerPhase::Idle,
    })
}

impl TimerLogic {
    /// Start a new session.
    ///
    /// Two simultaneous starts may both observe an idle timer; both insert a
    /// speculative session row, then race on a single conditional UPDATE of
    /// the singleton. The loser deletes its own row inside the same
    /// transaction and reports the winner's state.
    pub fn start(pool: &mut DbPool, now: NaiveDateTime) -> AppResult<ActionOutcome> {
        let tx = pool.conn.transaction()?;

        let session_id = queries::insert_session(&tx, now)?;
        let claimed = queries::try_claim_timer(&tx, session_id)?;

        if !claimed {
            // CAS lost: no orphan rows
            queries::delete_session(&tx, session_id)?;
            let phase = current_phase(&tx)?;
            tx.commit()?;
            return Ok(ActionOutcome::refused("Timer already running", phase));
        }

        ttlog(
            &tx,
            "start",
            &format!("session {session_id}"),
            "Timer started",
        )?;
        tx.commit()?;

        Ok(ActionOutcome::ok("Timer started", TimerPhase::Running))
    }

    /// Pause the current session.
    pub fn pause(pool: &mut DbPool, now: NaiveDateTime) -> AppResult<ActionOutcome> {
        let tx = pool.conn.transaction()?;

        let session = match current_session(&tx)? {
            Some(s) => s,
            None => return Ok(ActionOutcome::refused("No active session", TimerPhase::Idle)),
        };

        if session.status == SessionStatus::Paused {
            return Ok(ActionOutcome::refused(
                "Timer already paused",
                TimerPhase::Paused,
            ));
        }

        queries::open_pause(&tx, session.id, now)?;
        queries::set_session_status(&tx, session.id, SessionStatus::Paused, now)?;
        ttlog(
            &tx,
            "pause",
            &format!("session {}", session.id),
            "Timer paused",
        )?;
        tx.commit()?;

        Ok(ActionOutcome::ok("Timer paused", TimerPhase::Paused))
    }

    /// Resume from pause (the `continue` action).
    pub fn resume(pool: &mut DbPool, now: NaiveDateTime) -> AppResult<ActionOutcome> {
        let tx = pool.conn.transaction()?;

        let session = match current_session(&tx)? {
            Some(s) => s,
            None => return Ok(ActionOutcome::refused("No active session", TimerPhase::Idle)),
        };

        if session.status != SessionStatus::Paused {
            return Ok(ActionOutcome::refused(
                "Timer not paused",
                TimerPhase::Running,
            ));
        }

        queries::close_open_pause(&tx, session.id, now)?;
        queries::set_session_status(&tx, session.id, SessionStatus::Running, now)?;
        ttlog(
            &tx,
            "continue",
            &format!("session {}", session.id),
            "Timer resumed",
        )?;
        tx.commit()?;

        Ok(ActionOutcome::ok("Timer resumed", TimerPhase::Running))
    }

    /// Stop and persist the current session. A still-open pause is closed
    /// first so the final figures include it as a closed interval.
    pub fn stop(pool: &mut DbPool, cfg: &Config, now: NaiveDateTime) -> AppResult<ActionOutcome> {
        let tx = pool.conn.transaction()?;

        let session = match current_session(&tx)? {
            Some(s) => s,
            None => return Ok(ActionOutcome::refused("No active session", TimerPhase::Idle)),
        };

        finalize(&tx, cfg, &session, now, "stop", "Timer stopped and saved")?;
        tx.commit()?;

        Ok(ActionOutcome::ok("Timer stopped and saved", TimerPhase::Idle))
    }

    /// Discard the current session entirely (hard delete, pauses included).
    pub fn reset(pool: &mut DbPool, _now: NaiveDateTime) -> AppResult<ActionOutcome> {
        let tx = pool.conn.transaction()?;

        let session = match current_session(&tx)? {
            Some(s) => s,
            None => return Ok(ActionOutcome::refused("No active session", TimerPhase::Idle)),
        };

        // release the reference before deleting the referenced row
        queries::clear_current_session(&tx)?;
        queries::delete_session(&tx, session.id)?;
        ttlog(
            &tx,
            "reset",
            &format!("session {}", session.id),
            "Timer reset (session discarded)",
        )?;
        tx.commit()?;

        Ok(ActionOutcome::ok(
            "Timer reset (session discarded)",
            TimerPhase::Idle,
        ))
    }

    /// Current state with live figures. When the live net work reaches the
    /// daily cap this read stops the session as a side effect (auto-stop)
    /// and reports an idle timer.
    pub fn status(pool: &mut DbPool, cfg: &Config, now: NaiveDateTime) -> AppResult<StatusSnapshot> {
        let tx = pool.conn.transaction()?;

        let session = match current_session(&tx)? {
            Some(s) => s,
            None => {
                tx.commit()?;
                return Ok(StatusSnapshot::idle());
            }
        };

        let pauses = queries::load_pauses(&tx, session.id)?;
        let figures = accounting::compute(session.start_time, None, &pauses, cfg, now);

        if figures.net_work_seconds >= cfg.max_daily_seconds() {
            finalize(
                &tx,
                cfg,
                &session,
                now,
                "auto_stop",
                "Daily cap reached, session stopped automatically",
            )?;
            tx.commit()?;

            let mut snapshot = StatusSnapshot::idle();
            snapshot.auto_stopped = true;
            return Ok(snapshot);
        }

        tx.commit()?;

        let session_info = SessionInfo {
            id: session.id,
            start_time: session.start_time,
            current_time: now,
            net_work_seconds: figures.net_work_seconds,
            net_work_formatted: format_duration(figures.net_work_seconds),
            pause_count: pauses.len(),
            total_pause_seconds: figures.total_pause_seconds,
        };

        let calculations = Calculations {
            lunch_break_applies: figures.lunch_break_applies,
            lunch_break_at: figures.lunch_break_at.map(format_clock),
            earliest_leave: format_clock(figures.earliest_leave),
            normal_leave: format_clock(figures.normal_leave),
            latest_leave: format_clock(figures.latest_leave),
            remaining_for_daily: format_duration(figures.remaining_for_daily),
            overtime_seconds: figures.overtime_seconds,
            overtime_formatted: format_duration(figures.overtime_seconds),
        };

        Ok(StatusSnapshot {
            phase: TimerPhase::from_status(session.status),
            session: Some(session_info),
            calculations: Some(calculations),
            auto_stopped: false,
        })
    }
}

/// Shared completion path for `stop` and `auto_stop`: close any open pause,
/// compute the capped net seconds, persist end/net/status and release the
/// singleton reference, all on the caller's transaction.
fn finalize(
    conn: &Connection,
    cfg: &Config,
    session: &WorkSession,
    now: NaiveDateTime,
    operation: &str,
    message: &str,
) -> AppResult<()> {
    queries::close_open_pause(conn, session.id, now)?;

    let pauses = queries::load_pauses(conn, session.id)?;
    let figures = accounting::compute(session.start_time, Some(now), &pauses, cfg, now);

    queries::finalize_session(conn, session.id, now, figures.net_work_seconds)?;
    queries::clear_current_session(conn)?;
    ttlog(conn, operation, &format!("session {}", session.id), message)?;

    Ok(())
}
