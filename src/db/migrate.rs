//! Migration engine. All schema creation and upgrades happen here, driven
//! by `PRAGMA user_version`; `init_db` and `db --migrate` both funnel into
//! `run_pending_migrations`.

use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::Connection;

const SCHEMA_VERSION: i64 = 1;

pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    if version < 1 {
        apply_v1(conn).map_err(|e| AppError::Migration(format!("v1 failed: {e}")))?;
        success("Migration v1 applied (base schema).");

        if let Err(e) = ttlog(conn, "migration_applied", "v1", "Base schema created") {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }
    }

    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    Ok(())
}

/// v1: base schema.
///
/// `report_runs` carries a *partial* unique index on `(job_id, occurrence)`
/// restricted to `running`/`success` rows: that is the durable occurrence
/// claim. Failure and skipped rows stay behind as audit records and never
/// block a retry claim.
fn apply_v1(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        BEGIN;

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS employees (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            pis              TEXT NOT NULL DEFAULT '',
            expected_minutes INTEGER NOT NULL DEFAULT 480,
            shift_start      TEXT NOT NULL DEFAULT '09:00',
            shift_end        TEXT NOT NULL DEFAULT '18:00',
            night_start      TEXT NOT NULL DEFAULT '22:00',
            night_end        TEXT NOT NULL DEFAULT '05:00',
            rest_weekday     TEXT NOT NULL DEFAULT 'sun'
                             CHECK(rest_weekday IN ('mon','tue','wed','thu','fri','sat','sun')),
            created_at       TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clock_events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id),
            date        TEXT NOT NULL,
            time        TEXT NOT NULL,
            kind        TEXT NOT NULL CHECK(kind IN ('in','out','break_in','break_out')),
            source      TEXT NOT NULL DEFAULT 'cli',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_emp_date_time
            ON clock_events(employee_id, date, time);
        CREATE INDEX IF NOT EXISTS idx_events_date
            ON clock_events(date);

        CREATE TABLE IF NOT EXISTS report_jobs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            report_type TEXT NOT NULL
                        CHECK(report_type IN ('afd','aej','mirror','overtime','absence')),
            cadence     TEXT NOT NULL,
            recipients  TEXT NOT NULL DEFAULT '',
            enabled     INTEGER NOT NULL DEFAULT 1,
            catch_up    INTEGER NOT NULL DEFAULT 0,
            last_run_at TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS report_runs (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id       INTEGER NOT NULL REFERENCES report_jobs(id),
            occurrence   TEXT NOT NULL,
            status       TEXT NOT NULL
                         CHECK(status IN ('running','success','failure','skipped')),
            artifact_ref TEXT,
            error        TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_runs_claim
            ON report_runs(job_id, occurrence)
            WHERE status IN ('running','success');
        CREATE INDEX IF NOT EXISTS idx_runs_job
            ON report_runs(job_id, occurrence);

        CREATE TABLE IF NOT EXISTS artifacts (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id     INTEGER NOT NULL REFERENCES report_jobs(id),
            occurrence TEXT NOT NULL,
            path       TEXT NOT NULL,
            metadata   TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            UNIQUE(job_id, occurrence)
        );

        COMMIT;
        "#,
    )
}
