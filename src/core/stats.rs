//! Weekly/monthly statistics: group-by-date summation over per-session net
//! seconds computed by the accounting module. Deliberately thin; all the
//! real accounting happens before a session is persisted.

use std::collections::HashSet;

use chrono::{NaiveDate, Timelike};

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::session::WorkSession;
use crate::models::summary::{MonthSummary, SessionSummary, StatisticsReport, WeekSummary};
use crate::utils::date::{month_start, week_start};
use crate::utils::time::{format_clock, format_duration, format_duration_short};

const RECENT_LIMIT: i64 = 10;

pub struct StatsLogic;

impl StatsLogic {
    /// Statistics as of `today`. Completed sessions dated in the future are
    /// excluded from the sums.
    pub fn statistics(pool: &mut DbPool, cfg: &Config, today: NaiveDate) -> AppResult<StatisticsReport> {
        let week_sessions = queries::completed_between(&pool.conn, week_start(today), today)?;
        let month_sessions = queries::completed_between(&pool.conn, month_start(today), today)?;
        let recent = queries::recent_completed(&pool.conn, RECENT_LIMIT)?;

        let (week_avg_start, week_avg_end) = average_times(&week_sessions);
        let (month_avg_start, month_avg_end) = average_times(&month_sessions);

        let week_total = total_net(&week_sessions);
        let week_days = days_worked(&week_sessions);
        let week_target = cfg.weekly_target_seconds();

        let this_week = WeekSummary {
            total_seconds: week_total,
            total_formatted: format_duration(week_total),
            target_seconds: week_target,
            target_formatted: format_duration(week_target),
            days_worked: week_days,
            avg_per_day_formatted: format_duration(per_day(week_total, week_days)),
            overtime_seconds: week_total - week_target,
            overtime_formatted: format_duration(week_total - week_target),
            average_start_time: week_avg_start,
            average_end_time: week_avg_end,
        };

        let month_total = total_net(&month_sessions);
        let month_days = days_worked(&month_sessions);
        // the month target scales with the days actually worked
        let month_target = month_days as i64 * cfg.required_daily_seconds();

        let this_month = MonthSummary {
            total_seconds: month_total,
            total_formatted: format_duration(month_total),
            target_seconds: month_target,
            target_formatted: format_duration(month_target),
            days_worked: month_days,
            avg_per_day_formatted: format_duration(per_day(month_total, month_days)),
            overtime_seconds: month_total - month_target,
            overtime_formatted: format_duration(month_total - month_target),
            average_start_time: month_avg_start,
            average_end_time: month_avg_end,
        };

        let recent_sessions = recent
            .iter()
            .map(|s| session_summary(s, cfg))
            .collect::<Vec<_>>();

        Ok(StatisticsReport {
            this_week,
            this_month,
            recent_sessions,
        })
    }
}

pub fn session_summary(s: &WorkSession, cfg: &Config) -> SessionSummary {
    let net = s.net_seconds.unwrap_or(0);
    let overtime = net - cfg.required_daily_seconds();
    SessionSummary {
        id: s.id,
        date: s.date_str(),
        start_time: format_clock(s.start_time),
        end_time: s.end_time.map(format_clock),
        net_seconds: net,
        net_formatted: format_duration_short(net),
        overtime_seconds: overtime,
        overtime_formatted: format_duration_short(overtime),
        status: s.status.to_db_str().to_string(),
    }
}

fn total_net(sessions: &[WorkSession]) -> i64 {
    sessions.iter().map(|s| s.net_seconds.unwrap_or(0)).sum()
}

fn days_worked(sessions: &[WorkSession]) -> usize {
    sessions.iter().map(|s| s.date).collect::<HashSet<_>>().len()
}

fn per_day(total: i64, days: usize) -> i64 {
    if days > 0 { total / days as i64 } else { 0 }
}

/// Average start and end clock times as HH:MM; None without data.
fn average_times(sessions: &[WorkSession]) -> (Option<String>, Option<String>) {
    let starts: Vec<i64> = sessions
        .iter()
        .map(|s| s.start_time.num_seconds_from_midnight() as i64)
        .collect();

    let ends: Vec<i64> = sessions
        .iter()
        .filter_map(|s| s.end_time)
        .map(|e| e.num_seconds_from_midnight() as i64)
        .collect();

    (mean_clock(&starts), mean_clock(&ends))
}

fn mean_clock(seconds_since_midnight: &[i64]) -> Option<String> {
    if seconds_since_midnight.is_empty() {
        return None;
    }
    let avg = seconds_since_midnight.iter().sum::<i64>() / seconds_since_midnight.len() as i64;
    Some(format!("{:02}:{:02}", avg / 3600, (avg % 3600) / 60))
}
