use chrono::Local;
use rusqlite::{Connection, Result, params};

/// Append a row to the internal audit log. Non-blocking by convention:
/// callers report a warning on failure instead of aborting the operation.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
        params![Local::now().to_rfc3339(), operation, target, message],
    )?;
    Ok(())
}
