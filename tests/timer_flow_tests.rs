mod common;
use common::{dt, open_pool, setup_test_db, test_config};

use timeclock::core::timer::TimerLogic;
use timeclock::db::queries;
use timeclock::models::session_status::SessionStatus;
use timeclock::models::timer_phase::TimerPhase;

#[test]
fn test_full_day_flow_start_pause_resume_stop() {
    let db_path = setup_test_db("flow_full_day");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    let started = TimerLogic::start(&mut pool, dt("2026-03-02 09:00")).unwrap();
    assert!(started.success);
    assert_eq!(started.phase, TimerPhase::Running);

    let paused = TimerLogic::pause(&mut pool, dt("2026-03-02 10:00")).unwrap();
    assert!(paused.success);
    assert_eq!(paused.phase, TimerPhase::Paused);

    let resumed = TimerLogic::resume(&mut pool, dt("2026-03-02 10:15")).unwrap();
    assert!(resumed.success);
    assert_eq!(resumed.phase, TimerPhase::Running);

    let stopped = TimerLogic::stop(&mut pool, &cfg, dt("2026-03-02 17:00")).unwrap();
    assert!(stopped.success);
    assert_eq!(stopped.phase, TimerPhase::Idle);

    // exactly one completed session with the worked-example net seconds
    let sessions = queries::list_sessions(&pool.conn, None).unwrap();
    assert_eq!(sessions.len(), 1);
    let session = &sessions[0];
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.end_time, Some(dt("2026-03-02 17:00")));
    assert_eq!(session.net_seconds, Some(26100));

    // timer is idle again
    assert_eq!(queries::current_session_id(&pool.conn).unwrap(), None);
}

#[test]
fn test_pause_while_idle_is_refused_and_changes_nothing() {
    let db_path = setup_test_db("flow_pause_idle");
    let mut pool = open_pool(&db_path);

    let outcome = TimerLogic::pause(&mut pool, dt("2026-03-02 09:00")).unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.phase, TimerPhase::Idle);

    assert!(queries::list_sessions(&pool.conn, None).unwrap().is_empty());
    assert_eq!(queries::current_session_id(&pool.conn).unwrap(), None);
}

#[test]
fn test_double_pause_and_resume_while_running_are_refused() {
    let db_path = setup_test_db("flow_double_pause");
    let mut pool = open_pool(&db_path);

    TimerLogic::start(&mut pool, dt("2026-03-02 09:00")).unwrap();

    let resume_running = TimerLogic::resume(&mut pool, dt("2026-03-02 09:30")).unwrap();
    assert!(!resume_running.success);
    assert_eq!(resume_running.phase, TimerPhase::Running);

    TimerLogic::pause(&mut pool, dt("2026-03-02 10:00")).unwrap();
    let pause_again = TimerLogic::pause(&mut pool, dt("2026-03-02 10:05")).unwrap();
    assert!(!pause_again.success);
    assert_eq!(pause_again.phase, TimerPhase::Paused);

    // still exactly one open pause
    let id = queries::current_session_id(&pool.conn).unwrap().unwrap();
    let pauses = queries::load_pauses(&pool.conn, id).unwrap();
    assert_eq!(pauses.len(), 1);
    assert!(pauses[0].is_open());
}

#[test]
fn test_stop_while_paused_closes_the_open_pause() {
    let db_path = setup_test_db("flow_stop_paused");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    TimerLogic::start(&mut pool, dt("2026-03-02 09:00")).unwrap();
    TimerLogic::pause(&mut pool, dt("2026-03-02 12:00")).unwrap();

    let id = queries::current_session_id(&pool.conn).unwrap().unwrap();
    let stopped = TimerLogic::stop(&mut pool, &cfg, dt("2026-03-02 12:30")).unwrap();
    assert!(stopped.success);

    let pauses = queries::load_pauses(&pool.conn, id).unwrap();
    assert_eq!(pauses.len(), 1);
    assert_eq!(pauses[0].pause_end, Some(dt("2026-03-02 12:30")));

    // 3h30m elapsed minus the 30m pause, below the lunch threshold
    let session = queries::get_session(&pool.conn, id).unwrap().unwrap();
    assert_eq!(session.net_seconds, Some(10800));
}

#[test]
fn test_stop_while_idle_is_refused() {
    let db_path = setup_test_db("flow_stop_idle");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    let outcome = TimerLogic::stop(&mut pool, &cfg, dt("2026-03-02 09:00")).unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.phase, TimerPhase::Idle);
}

#[test]
fn test_reset_hard_deletes_session_and_pauses() {
    let db_path = setup_test_db("flow_reset");
    let mut pool = open_pool(&db_path);

    TimerLogic::start(&mut pool, dt("2026-03-02 09:00")).unwrap();
    TimerLogic::pause(&mut pool, dt("2026-03-02 10:00")).unwrap();
    let id = queries::current_session_id(&pool.conn).unwrap().unwrap();

    let outcome = TimerLogic::reset(&mut pool, dt("2026-03-02 10:30")).unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.phase, TimerPhase::Idle);

    assert!(queries::get_session(&pool.conn, id).unwrap().is_none());
    assert!(queries::load_pauses(&pool.conn, id).unwrap().is_empty());
    assert_eq!(queries::current_session_id(&pool.conn).unwrap(), None);
}

#[test]
fn test_status_reports_live_figures() {
    let db_path = setup_test_db("flow_status_live");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    TimerLogic::start(&mut pool, dt("2026-03-02 09:00")).unwrap();

    let snapshot = TimerLogic::status(&mut pool, &cfg, dt("2026-03-02 10:00")).unwrap();
    assert_eq!(snapshot.phase, TimerPhase::Running);
    let session = snapshot.session.unwrap();
    assert_eq!(session.net_work_seconds, 3600);
    assert_eq!(session.pause_count, 0);

    let calc = snapshot.calculations.unwrap();
    assert!(!calc.lunch_break_applies);
    // threshold reached 6h after start with no pauses
    assert_eq!(calc.lunch_break_at.as_deref(), Some("15:00"));
    // start + 30m lunch projection + 8.2h requirement
    assert_eq!(calc.earliest_leave, "17:42");
    // start + 30m lunch projection + 10h cap
    assert_eq!(calc.latest_leave, "19:30");

    // values are recomputed on every read
    let later = TimerLogic::status(&mut pool, &cfg, dt("2026-03-02 11:00")).unwrap();
    assert_eq!(later.session.unwrap().net_work_seconds, 7200);
}

#[test]
fn test_auto_stop_at_daily_cap_during_status_poll() {
    let db_path = setup_test_db("flow_auto_stop");
    let cfg = test_config(&db_path);
    let mut pool = open_pool(&db_path);

    TimerLogic::start(&mut pool, dt("2026-03-02 06:00")).unwrap();
    let id = queries::current_session_id(&pool.conn).unwrap().unwrap();

    // 10h30m elapsed, minus the 30m lunch deduction: live net hits the
    // 10h cap exactly
    let snapshot = TimerLogic::status(&mut pool, &cfg, dt("2026-03-02 16:30")).unwrap();
    assert!(snapshot.auto_stopped);
    assert_eq!(snapshot.phase, TimerPhase::Idle);

    let session = queries::get_session(&pool.conn, id).unwrap().unwrap();
    assert_eq!(session.status, SessionStatus::Completed);
    assert_eq!(session.end_time, Some(dt("2026-03-02 16:30")));
    assert_eq!(session.net_seconds, Some(36000));

    // subsequent polls see a plain idle timer
    let after = TimerLogic::status(&mut pool, &cfg, dt("2026-03-02 16:31")).unwrap();
    assert!(!after.auto_stopped);
    assert_eq!(after.phase, TimerPhase::Idle);
}

#[test]
fn test_state_survives_reopening_the_store() {
    let db_path = setup_test_db("flow_restart");
    let cfg = test_config(&db_path);

    {
        let mut pool = open_pool(&db_path);
        TimerLogic::start(&mut pool, dt("2026-03-02 09:00")).unwrap();
        TimerLogic::pause(&mut pool, dt("2026-03-02 10:00")).unwrap();
    }

    // a fresh connection re-derives everything from the persisted state
    let mut pool = open_pool(&db_path);
    let snapshot = TimerLogic::status(&mut pool, &cfg, dt("2026-03-02 10:30")).unwrap();
    assert_eq!(snapshot.phase, TimerPhase::Paused);
    assert_eq!(snapshot.session.unwrap().total_pause_seconds, 1800);

    let stopped = TimerLogic::stop(&mut pool, &cfg, dt("2026-03-02 17:00")).unwrap();
    assert!(stopped.success);
}
