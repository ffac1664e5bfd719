//! Report-run records and the durable occurrence claim.
//!
//! `(job_id, occurrence)` uniqueness over `running`/`success` rows is the
//! only cross-process coordination primitive: invocations may run from
//! independent processes, so no in-memory lock could cover them.

use crate::errors::{AppError, AppResult};
use crate::models::report_run::{ReportRun, RunStatus};
use crate::utils::time::format_timestamp;
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, ErrorCode, Result, Row, params};

/// Outcome of a claim attempt. First writer wins; everyone else observes
/// the existing claim and yields.
#[derive(Debug)]
pub enum Claim {
    Claimed(i64),
    AlreadyTaken,
}

/// Atomically claim `(job_id, occurrence)` by inserting the `running` row.
/// A constraint violation means another invocation holds (or completed)
/// the occurrence; the caller records a skip, not an error.
pub fn claim_run(conn: &Connection, job_id: i64, occurrence: NaiveDateTime) -> AppResult<Claim> {
    let res = conn.execute(
        "INSERT INTO report_runs (job_id, occurrence, status, created_at)
         VALUES (?1, ?2, 'running', ?3)",
        params![job_id, format_timestamp(occurrence), Local::now().to_rfc3339()],
    );

    match res {
        Ok(_) => Ok(Claim::Claimed(conn.last_insert_rowid())),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
        {
            Ok(Claim::AlreadyTaken)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn finalize_success(conn: &Connection, run_id: i64, artifact_ref: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE report_runs SET status = 'success', artifact_ref = ?1
         WHERE id = ?2 AND status = 'running'",
        params![artifact_ref, run_id],
    )?;
    Ok(())
}

pub fn finalize_failure(conn: &Connection, run_id: i64, error: &str) -> AppResult<()> {
    conn.execute(
        "UPDATE report_runs SET status = 'failure', error = ?1
         WHERE id = ?2 AND status = 'running'",
        params![error, run_id],
    )?;
    Ok(())
}

/// Record that this invocation yielded to an existing claim.
pub fn insert_skipped(conn: &Connection, job_id: i64, occurrence: NaiveDateTime) -> AppResult<()> {
    conn.execute(
        "INSERT INTO report_runs (job_id, occurrence, status, created_at)
         VALUES (?1, ?2, 'skipped', ?3)",
        params![job_id, format_timestamp(occurrence), Local::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn load_runs(conn: &Connection, job_id: Option<i64>) -> AppResult<Vec<ReportRun>> {
    let mut out = Vec::new();

    match job_id {
        Some(id) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM report_runs WHERE job_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([id], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM report_runs ORDER BY id ASC")?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn map_row(row: &Row) -> Result<ReportRun> {
    let status_str: String = row.get("status")?;
    let status = RunStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid run status: {status_str}"))),
        )
    })?;

    let occ_str: String = row.get("occurrence")?;
    let occurrence = crate::utils::time::parse_timestamp(&occ_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(ReportRun {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        occurrence,
        status,
        artifact_ref: row.get("artifact_ref")?,
        error: row.get("error")?,
        created_at: row.get("created_at")?,
    })
}
