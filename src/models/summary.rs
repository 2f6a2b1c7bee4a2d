//! Aggregated views: per-session summaries, weekly/monthly statistics and
//! the detailed per-session breakdown with its pause list.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub net_seconds: i64,
    pub net_formatted: String,
    pub overtime_seconds: i64,
    pub overtime_formatted: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    pub total_seconds: i64,
    pub total_formatted: String,
    pub target_seconds: i64,
    pub target_formatted: String,
    pub days_worked: usize,
    pub avg_per_day_formatted: String,
    pub overtime_seconds: i64,
    pub overtime_formatted: String,
    pub average_start_time: Option<String>, // HH:MM
    pub average_end_time: Option<String>,   // HH:MM
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub total_seconds: i64,
    pub total_formatted: String,
    pub target_seconds: i64,
    pub target_formatted: String,
    pub days_worked: usize,
    pub avg_per_day_formatted: String,
    pub overtime_seconds: i64,
    pub overtime_formatted: String,
    pub average_start_time: Option<String>,
    pub average_end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub this_week: WeekSummary,
    pub this_month: MonthSummary,
    pub recent_sessions: Vec<SessionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PauseInfo {
    pub id: i64,
    pub pause_start: String, // HH:MM
    pub pause_end: Option<String>,
    pub duration_seconds: i64,
    pub duration_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub status: String,
    pub gross_seconds: i64,
    pub gross_formatted: String,
    pub net_seconds: i64,
    pub net_formatted: String,
    pub total_pause_seconds: i64,
    pub total_pause_formatted: String,
    pub overtime_seconds: i64,
    pub overtime_formatted: String,
    pub pause_count: usize,
    pub pauses: Vec<PauseInfo>,
}
