//! Result types returned by the timer state machine: the per-action outcome
//! and the live status snapshot with its derived calculations.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::timer_phase::TimerPhase;

/// Outcome of a timer action (start/pause/continue/stop/reset).
/// A refused transition is an outcome with `success = false`, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    pub phase: TimerPhase,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>, phase: TimerPhase) -> Self {
        Self {
            success: true,
            message: message.into(),
            phase,
        }
    }

    pub fn refused(message: impl Into<String>, phase: TimerPhase) -> Self {
        Self {
            success: false,
            message: message.into(),
            phase,
        }
    }
}

/// Live view of the current session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub current_time: NaiveDateTime,
    pub net_work_seconds: i64,
    pub net_work_formatted: String,
    pub pause_count: usize,
    pub total_pause_seconds: i64,
}

/// Derived figures for the current session (leave projections etc.).
#[derive(Debug, Clone, Serialize)]
pub struct Calculations {
    pub lunch_break_applies: bool,
    /// Clock time at which the lunch deduction kicks in; only reported while
    /// the threshold has not been reached yet.
    pub lunch_break_at: Option<String>,
    pub earliest_leave: String,
    pub normal_leave: String,
    pub latest_leave: String,
    pub remaining_for_daily: String,
    pub overtime_seconds: i64,
    pub overtime_formatted: String,
}

/// Full status response: phase plus live figures when a session is current.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub phase: TimerPhase,
    pub session: Option<SessionInfo>,
    pub calculations: Option<Calculations>,
    /// True when this very status read hit the daily cap and stopped the
    /// session as a side effect.
    pub auto_stopped: bool,
}

impl StatusSnapshot {
    pub fn idle() -> Self {
        Self {
            phase: TimerPhase::Idle,
            session: None,
            calculations: None,
            auto_stopped: false,
        }
    }
}
