//! Migration engine: all schema creation and upgrades live here, invoked
//! from `db::initialize::init_db`.

use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the session tables with the modern schema.
fn create_session_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS work_sessions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,             -- YYYY-MM-DD
            start_time   TEXT NOT NULL,             -- YYYY-MM-DD HH:MM:SS
            end_time     TEXT,
            net_seconds  INTEGER,
            status       TEXT NOT NULL CHECK(status IN ('running','paused','completed')),
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS pause_periods (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id   INTEGER NOT NULL REFERENCES work_sessions(id) ON DELETE CASCADE,
            pause_start  TEXT NOT NULL,
            pause_end    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON work_sessions(date);
        CREATE INDEX IF NOT EXISTS idx_sessions_status_date ON work_sessions(status, date);
        CREATE INDEX IF NOT EXISTS idx_pauses_session ON pause_periods(session_id);
        "#,
    )?;
    Ok(())
}

/// Create the singleton timer_state table and seed its only row.
/// `current_session_id` is NULL exactly when no session is running/paused;
/// the row is never deleted so the invariant survives restarts.
fn ensure_timer_state(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timer_state (
            id                  INTEGER PRIMARY KEY CHECK(id = 1),
            current_session_id  INTEGER REFERENCES work_sessions(id)
        );
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO timer_state (id, current_session_id) VALUES (1, NULL)",
        [],
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Session tables + indexes
    if !table_exists(conn, "work_sessions")? {
        create_session_tables(conn)?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', 'work_sessions', 'Created session tables')",
            [],
        )?;
    } else {
        // idempotent index creation for databases from older versions
        create_session_tables(conn)?;
    }

    // 3) Singleton timer state row
    ensure_timer_state(conn)?;

    Ok(())
}
