use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::session_status::SessionStatus;

/// One work day's session.
#[derive(Debug, Clone, Serialize)]
pub struct WorkSession {
    pub id: i64,
    pub date: NaiveDate,                  // ⇔ work_sessions.date (TEXT "YYYY-MM-DD")
    pub start_time: NaiveDateTime,        // ⇔ work_sessions.start_time, immutable while active
    pub end_time: Option<NaiveDateTime>,  // set once the session is completed
    pub net_seconds: Option<i64>,         // persisted on completion, capped at the daily max
    pub status: SessionStatus,
    pub created_at: String,               // ISO 8601
    pub updated_at: String,
}

impl WorkSession {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
