use serde::Serialize;

use super::session_status::SessionStatus;

/// State-machine view of the timer as a whole: `Idle` when no session is
/// current, otherwise the current session's status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        }
    }

    pub fn from_status(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Running => TimerPhase::Running,
            SessionStatus::Paused => TimerPhase::Paused,
            // A completed session is no longer current; the timer is idle.
            SessionStatus::Completed => TimerPhase::Idle,
        }
    }
}
