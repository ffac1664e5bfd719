use crate::errors::{AppError, AppResult};
use crate::models::cadence::Cadence;
use crate::models::report_job::{ReportJob, ReportType};
use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use rusqlite::{Connection, Result, Row, params};

pub fn insert_job(conn: &Connection, job: &ReportJob) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO report_jobs
            (report_type, cadence, recipients, enabled, catch_up, last_run_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            job.report_type.to_db_str(),
            job.cadence.to_string(),
            job.recipients,
            if job.enabled { 1 } else { 0 },
            if job.catch_up { 1 } else { 0 },
            job.last_run_at.map(format_timestamp),
            format_timestamp(job.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_job(conn: &Connection, id: i64) -> AppResult<ReportJob> {
    let mut stmt = conn.prepare("SELECT * FROM report_jobs WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], map_row)?;

    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(AppError::JobNotFound(id)),
    }
}

pub fn load_jobs(conn: &Connection) -> AppResult<Vec<ReportJob>> {
    let mut stmt = conn.prepare("SELECT * FROM report_jobs ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_enabled_jobs(conn: &Connection) -> AppResult<Vec<ReportJob>> {
    let mut stmt = conn.prepare("SELECT * FROM report_jobs WHERE enabled = 1 ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_enabled(conn: &Connection, id: i64, enabled: bool) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE report_jobs SET enabled = ?1 WHERE id = ?2",
        params![if enabled { 1 } else { 0 }, id],
    )?;
    if n == 0 {
        return Err(AppError::JobNotFound(id));
    }
    Ok(())
}

pub fn delete_job(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM report_jobs WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::JobNotFound(id));
    }
    Ok(())
}

/// Advance `last_run_at` to `occurrence`. The WHERE guard keeps the marker
/// monotonic: a stale writer can never rewind it.
pub fn advance_last_run(
    conn: &Connection,
    job_id: i64,
    occurrence: NaiveDateTime,
) -> AppResult<()> {
    let occ = format_timestamp(occurrence);
    conn.execute(
        "UPDATE report_jobs SET last_run_at = ?1
         WHERE id = ?2 AND (last_run_at IS NULL OR last_run_at < ?1)",
        params![occ, job_id],
    )?;
    Ok(())
}

pub fn map_row(row: &Row) -> Result<ReportJob> {
    let type_str: String = row.get("report_type")?;
    let report_type = ReportType::from_db_str(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid report type: {type_str}"))),
        )
    })?;

    let cadence_str: String = row.get("cadence")?;
    let cadence: Cadence = cadence_str.parse().map_err(|e: AppError| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(ReportJob {
        id: row.get("id")?,
        report_type,
        cadence,
        recipients: row.get("recipients")?,
        enabled: row.get::<_, i64>("enabled")? == 1,
        catch_up: row.get::<_, i64>("catch_up")? == 1,
        last_run_at: get_optional_ts(row, "last_run_at")?,
        created_at: get_ts(row, "created_at")?,
    })
}

fn get_ts(row: &Row, col: &str) -> Result<NaiveDateTime> {
    let s: String = row.get(col)?;
    crate::utils::time::parse_timestamp(&s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn get_optional_ts(row: &Row, col: &str) -> Result<Option<NaiveDateTime>> {
    let s: Option<String> = row.get(col)?;
    match s {
        None => Ok(None),
        Some(s) => crate::utils::time::parse_timestamp(&s).map(Some).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        }),
    }
}
