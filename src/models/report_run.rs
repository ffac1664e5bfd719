use chrono::NaiveDateTime;
use serde::Serialize;

/// Terminal of the per-occurrence state machine:
/// `running → {success, failure, skipped}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Success,
    Failure,
    Skipped,
}

impl RunStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Success => "success",
            RunStatus::Failure => "failure",
            RunStatus::Skipped => "skipped",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "running" => Some(RunStatus::Running),
            "success" => Some(RunStatus::Success),
            "failure" => Some(RunStatus::Failure),
            "skipped" => Some(RunStatus::Skipped),
            _ => None,
        }
    }
}

/// Record of one execution attempt for `(job_id, occurrence)`.
/// Rows are finalized once and never touched again; a retried occurrence
/// gets a fresh row.
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub id: i64,
    pub job_id: i64,
    pub occurrence: NaiveDateTime,
    pub status: RunStatus,
    pub artifact_ref: Option<String>,
    pub error: Option<String>,
    pub created_at: String,
}
