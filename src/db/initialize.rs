use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
///
/// Schema creation and upgrades are owned entirely by the migration
/// engine, including the partial unique index that backs occurrence
/// claims on `report_runs`. The only per-connection setup done here is
/// foreign-key enforcement, which SQLite leaves off by default.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    run_pending_migrations(conn)?;
    Ok(())
}
