//! Pure time accounting: net work seconds, lunch deduction, overtime and
//! leave-time projections derived from a session's interval boundaries.
//! No storage access; everything is computed from the arguments.

use chrono::{Duration, NaiveDateTime};

use crate::config::Config;
use crate::models::pause::PausePeriod;

/// All derived figures for one session at one instant.
#[derive(Debug, Clone)]
pub struct WorkFigures {
    pub total_pause_seconds: i64,
    pub gross_work_seconds: i64,
    pub lunch_break_applies: bool,
    pub lunch_deduction_seconds: i64,
    /// Gross minus lunch, floored at 0 and capped at the daily maximum.
    pub net_work_seconds: i64,
    /// Net minus the daily requirement; negative while in deficit.
    pub overtime_seconds: i64,
    pub remaining_for_daily: i64,
    /// Clock time at which net work first reaches the daily requirement.
    pub earliest_leave: NaiveDateTime,
    /// Alias of `earliest_leave`, kept for display parity.
    pub normal_leave: NaiveDateTime,
    /// Clock time at which the daily cap is reached.
    pub latest_leave: NaiveDateTime,
    /// When the lunch deduction will start to apply; None once it already does.
    pub lunch_break_at: Option<NaiveDateTime>,
}

/// Sum of pause durations; an open pause contributes up to `now`.
pub fn total_pause_seconds(pauses: &[PausePeriod], now: NaiveDateTime) -> i64 {
    pauses.iter().map(|p| p.duration_seconds(now)).sum()
}

/// Lunch deduction projected onto a target amount of net work: the
/// deduction applies as soon as the target crosses the threshold.
fn lunch_projection(cfg: &Config, target_seconds: i64) -> i64 {
    if target_seconds >= cfg.lunch_threshold_seconds() {
        cfg.lunch_deduction_seconds()
    } else {
        0
    }
}

/// Compute all figures for a session with the given boundaries.
/// `end` is None while the session is still running or paused; live values
/// are measured against `now` on every call, never cached.
pub fn compute(
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    pauses: &[PausePeriod],
    cfg: &Config,
    now: NaiveDateTime,
) -> WorkFigures {
    let pause_secs = total_pause_seconds(pauses, now);
    let effective_end = end.unwrap_or(now);

    let elapsed = (effective_end - start).num_seconds();
    let gross = (elapsed - pause_secs).max(0);

    let lunch_applies = gross >= cfg.lunch_threshold_seconds();
    let lunch_deduction = if lunch_applies {
        cfg.lunch_deduction_seconds()
    } else {
        0
    };

    let required = cfg.required_daily_seconds();
    let cap = cfg.max_daily_seconds();

    let net = (gross - lunch_deduction).max(0).min(cap);
    let overtime = net - required;

    let earliest_leave =
        start + Duration::seconds(pause_secs + lunch_projection(cfg, required) + required);
    let latest_leave = start + Duration::seconds(pause_secs + lunch_projection(cfg, cap) + cap);

    let lunch_break_at = if lunch_applies {
        None
    } else {
        Some(start + Duration::seconds(pause_secs + cfg.lunch_threshold_seconds()))
    };

    WorkFigures {
        total_pause_seconds: pause_secs,
        gross_work_seconds: gross,
        lunch_break_applies: lunch_applies,
        lunch_deduction_seconds: lunch_deduction,
        net_work_seconds: net,
        overtime_seconds: overtime,
        remaining_for_daily: (required - net).max(0),
        earliest_leave,
        normal_leave: earliest_leave,
        latest_leave,
        lunch_break_at,
    }
}
