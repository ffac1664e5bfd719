//! Artifact store. `save_artifact` is idempotent per `(job_id, occurrence)`:
//! the file path is deterministic and the row is upserted, so a re-run for
//! the same occurrence can never leave two distinct artifacts behind.

use crate::errors::{AppError, AppResult};
use crate::utils::time::format_timestamp;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Result, Row, params};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct ArtifactMeta<'a> {
    pub report_type: &'a str,
    pub recipients: &'a str,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub size_bytes: usize,
}

#[derive(Debug)]
pub struct ArtifactRecord {
    pub job_id: i64,
    pub occurrence: NaiveDateTime,
    pub path: String,
    pub metadata: String,
    pub created_at: String,
}

/// Deterministic artifact location for an occurrence.
pub fn artifact_path(
    artifacts_dir: &str,
    job_id: i64,
    occurrence: NaiveDateTime,
    extension: &str,
) -> PathBuf {
    Path::new(artifacts_dir).join(format!(
        "job{:04}_{}.{}",
        job_id,
        occurrence.format("%Y%m%d%H%M"),
        extension
    ))
}

pub fn save_artifact(
    conn: &Connection,
    artifacts_dir: &str,
    job_id: i64,
    occurrence: NaiveDateTime,
    extension: &str,
    bytes: &[u8],
    meta: &ArtifactMeta<'_>,
) -> AppResult<String> {
    fs::create_dir_all(artifacts_dir)
        .map_err(|e| AppError::Artifact(format!("cannot create {artifacts_dir}: {e}")))?;

    let path = artifact_path(artifacts_dir, job_id, occurrence, extension);
    fs::write(&path, bytes)
        .map_err(|e| AppError::Artifact(format!("cannot write {}: {e}", path.display())))?;

    let metadata = serde_json::to_string(meta)
        .map_err(|e| AppError::Artifact(format!("metadata serialization failed: {e}")))?;

    conn.execute(
        "INSERT INTO artifacts (job_id, occurrence, path, metadata, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(job_id, occurrence) DO UPDATE
             SET path = excluded.path, metadata = excluded.metadata",
        params![
            job_id,
            format_timestamp(occurrence),
            path.to_string_lossy(),
            metadata,
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(path.to_string_lossy().to_string())
}

pub fn load_artifacts(conn: &Connection, job_id: Option<i64>) -> AppResult<Vec<ArtifactRecord>> {
    let mut out = Vec::new();

    match job_id {
        Some(id) => {
            let mut stmt =
                conn.prepare("SELECT * FROM artifacts WHERE job_id = ?1 ORDER BY id ASC")?;
            let rows = stmt.query_map([id], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM artifacts ORDER BY id ASC")?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

fn map_row(row: &Row) -> Result<ArtifactRecord> {
    let occ_str: String = row.get("occurrence")?;
    let occurrence = crate::utils::time::parse_timestamp(&occ_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(ArtifactRecord {
        job_id: row.get("job_id")?,
        occurrence,
        path: row.get("path")?,
        metadata: row.get("metadata")?,
        created_at: row.get("created_at")?,
    })
}
