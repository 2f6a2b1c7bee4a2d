use predicates::str::contains;

mod common;
use common::{setup_test_db, tc, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_full_timer_flow() {
    let db_path = setup_test_db("cli_flow");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success()
        .stdout(contains("Timer started"));

    tc().args(["--db", &db_path, "--test", "status"])
        .assert()
        .success()
        .stdout(contains("running"));

    tc().args(["--db", &db_path, "--test", "pause"])
        .assert()
        .success()
        .stdout(contains("Timer paused"));

    tc().args(["--db", &db_path, "--test", "continue"])
        .assert()
        .success()
        .stdout(contains("Timer resumed"));

    tc().args(["--db", &db_path, "--test", "stop"])
        .assert()
        .success()
        .stdout(contains("Timer stopped and saved"));

    tc().args(["--db", &db_path, "--test", "status"])
        .assert()
        .success()
        .stdout(contains("Timer is idle"));

    tc().args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("1 session(s)"));
}

#[test]
fn test_second_start_is_refused() {
    let db_path = setup_test_db("cli_double_start");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success()
        .stdout(contains("Timer already running"));
}

#[test]
fn test_pause_while_idle_prints_warning() {
    let db_path = setup_test_db("cli_pause_idle");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "pause"])
        .assert()
        .success()
        .stdout(contains("No active session"));
}

#[test]
fn test_status_json_is_machine_readable() {
    let db_path = setup_test_db("cli_status_json");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success();

    let output = tc()
        .args(["--db", &db_path, "--test", "status", "--json"])
        .output()
        .expect("failed to run status --json");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find('{').expect("no JSON object in output");
    let parsed: serde_json::Value =
        serde_json::from_str(stdout[json_start..].trim()).expect("invalid JSON");
    assert_eq!(parsed["phase"], "running");
    assert!(parsed["session"]["id"].is_i64());
}

#[test]
fn test_reset_discards_session() {
    let db_path = setup_test_db("cli_reset");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "reset", "--yes"])
        .assert()
        .success()
        .stdout(contains("Timer reset"));

    tc().args(["--db", &db_path, "--test", "list"])
        .assert()
        .success()
        .stdout(contains("No sessions found"));
}

#[test]
fn test_delete_unknown_session_fails() {
    let db_path = setup_test_db("cli_del_missing");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "del", "999", "--yes"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_export_csv_writes_completed_sessions() {
    let db_path = setup_test_db("cli_export_csv");
    let out_file = temp_out("cli_export_csv", "csv");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success();
    tc().args(["--db", &db_path, "--test", "stop"])
        .assert()
        .success();

    tc().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out_file,
    ])
    .assert()
    .success()
    .stdout(contains("export completed"));

    let content = std::fs::read_to_string(&out_file).expect("read exported csv");
    assert!(content.contains("net_seconds"));
    assert!(content.contains("completed"));

    // refuses to overwrite without --force
    tc().args([
        "--db", &db_path, "--test", "export", "--format", "csv", "--file", &out_file,
    ])
    .assert()
    .failure()
    .stderr(contains("already exists"));
}

#[test]
fn test_export_json_round_trips() {
    let db_path = setup_test_db("cli_export_json");
    let out_file = temp_out("cli_export_json", "json");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success();
    tc().args(["--db", &db_path, "--test", "stop"])
        .assert()
        .success();

    tc().args([
        "--db", &db_path, "--test", "export", "--format", "json", "--file", &out_file,
    ])
    .assert()
    .success();

    let content = std::fs::read_to_string(&out_file).expect("read exported json");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("invalid JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(1));
    assert_eq!(parsed[0]["status"], "completed");
}

#[test]
fn test_log_records_timer_operations() {
    let db_path = setup_test_db("cli_log");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success();
    tc().args(["--db", &db_path, "--test", "stop"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("start"))
        .stdout(contains("stop"));
}

#[test]
fn test_edit_rejects_inverted_bounds() {
    let db_path = setup_test_db("cli_edit_bounds");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "start"])
        .assert()
        .success();
    tc().args(["--db", &db_path, "--test", "stop"])
        .assert()
        .success();

    // end before start on the (only) completed session
    tc().args([
        "--db",
        &db_path,
        "--test",
        "edit",
        "1",
        "--start",
        "2030-01-01 12:00",
        "--end",
        "2030-01-01 09:00",
    ])
    .assert()
    .failure()
    .stderr(contains("Validation"));
}

#[test]
fn test_stats_runs_on_fresh_database() {
    let db_path = setup_test_db("cli_stats_fresh");

    tc().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    tc().args(["--db", &db_path, "--test", "stats"])
        .assert()
        .success()
        .stdout(contains("This week"));
}
