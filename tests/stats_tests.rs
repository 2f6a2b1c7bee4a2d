mod common;
use common::{dt, open_pool, setup_test_db, test_config};

use chrono::NaiveDate;

use timeclock::core::stats::StatsLogic;
use timeclock::core::timer::TimerLogic;
use timeclock::db::pool::DbPool;

fn complete_day(pool: &mut DbPool, cfg: &timeclock::config::Config, day: &str) {
    TimerLogic::start(pool, dt(&format!("{day} 09:00"))).unwrap();
    TimerLogic::stop(pool, cfg, dt(&format!("{day} 17:00"))).unwrap();
}

#[test]
fn test_week_and_month_summaries() {
    let db_path = setup_test_db("stats_week_month");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    // Monday and Tuesday of the week containing 2026-03-04; each day is
    // 8h gross minus the 30m lunch = 27000s net
    complete_day(&mut pool, &cfg, "2026-03-02");
    complete_day(&mut pool, &cfg, "2026-03-03");

    let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let report = StatsLogic::statistics(&mut pool, &cfg, today).unwrap();

    let week = &report.this_week;
    assert_eq!(week.total_seconds, 54000);
    assert_eq!(week.days_worked, 2);
    assert_eq!(week.target_seconds, 147600);
    assert_eq!(week.overtime_seconds, 54000 - 147600);
    assert_eq!(week.avg_per_day_formatted, "07:30:00");
    assert_eq!(week.average_start_time.as_deref(), Some("09:00"));
    assert_eq!(week.average_end_time.as_deref(), Some("17:00"));

    let month = &report.this_month;
    assert_eq!(month.total_seconds, 54000);
    assert_eq!(month.days_worked, 2);
    // month target scales with the days actually worked (2 x 8.2h)
    assert_eq!(month.target_seconds, 59040);
    assert_eq!(month.overtime_seconds, 54000 - 59040);

    // newest first
    assert_eq!(report.recent_sessions.len(), 2);
    assert_eq!(report.recent_sessions[0].date, "2026-03-03");
    assert_eq!(report.recent_sessions[1].date, "2026-03-02");
}

#[test]
fn test_future_completed_sessions_are_ignored() {
    let db_path = setup_test_db("stats_future");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    complete_day(&mut pool, &cfg, "2026-03-02");
    // completed session dated after "today"
    complete_day(&mut pool, &cfg, "2026-03-10");

    let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let report = StatsLogic::statistics(&mut pool, &cfg, today).unwrap();

    assert_eq!(report.this_week.total_seconds, 27000);
    assert_eq!(report.this_month.total_seconds, 27000);
    // recent sessions still list both
    assert_eq!(report.recent_sessions.len(), 2);
}

#[test]
fn test_sessions_outside_the_window_are_excluded() {
    let db_path = setup_test_db("stats_window");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    // previous week and previous month
    complete_day(&mut pool, &cfg, "2026-02-25");
    // inside the current week
    complete_day(&mut pool, &cfg, "2026-03-02");

    let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let report = StatsLogic::statistics(&mut pool, &cfg, today).unwrap();

    assert_eq!(report.this_week.total_seconds, 27000);
    assert_eq!(report.this_week.days_worked, 1);
    assert_eq!(report.this_month.total_seconds, 27000);
    assert_eq!(report.recent_sessions.len(), 2);
}

#[test]
fn test_empty_store_yields_zeroed_report() {
    let db_path = setup_test_db("stats_empty");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    let today = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let report = StatsLogic::statistics(&mut pool, &cfg, today).unwrap();

    assert_eq!(report.this_week.total_seconds, 0);
    assert_eq!(report.this_week.days_worked, 0);
    assert_eq!(report.this_week.avg_per_day_formatted, "00:00:00");
    assert!(report.this_week.average_start_time.is_none());
    assert!(report.this_month.average_end_time.is_none());
    assert!(report.recent_sessions.is_empty());
}
