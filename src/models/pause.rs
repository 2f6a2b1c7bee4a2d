use chrono::NaiveDateTime;
use serde::Serialize;

/// One pause interval within a session. `pause_end` absent means the pause
/// is still open, which can only be the case while the session is paused.
#[derive(Debug, Clone, Serialize)]
pub struct PausePeriod {
    pub id: i64,
    pub session_id: i64,
    pub pause_start: NaiveDateTime,
    pub pause_end: Option<NaiveDateTime>,
}

impl PausePeriod {
    pub fn is_open(&self) -> bool {
        self.pause_end.is_none()
    }

    /// Duration in seconds; an open pause is measured up to `now`.
    pub fn duration_seconds(&self, now: NaiveDateTime) -> i64 {
        let end = self.pause_end.unwrap_or(now);
        (end - self.pause_start).num_seconds().max(0)
    }
}
