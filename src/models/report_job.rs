use super::cadence::Cadence;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;

/// Kind of artifact a report job produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// Portaria 671 AFD flat file (one detail record per clock mark).
    Afd,
    /// Portaria 671 AEJ flat file (one detail record per day summary).
    Aej,
    /// Espelho de ponto: CSV with every day summary.
    Mirror,
    /// CSV with only the days carrying overtime.
    Overtime,
    /// CSV with scheduled workdays without any worked minutes.
    Absence,
}

impl ReportType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ReportType::Afd => "afd",
            ReportType::Aej => "aej",
            ReportType::Mirror => "mirror",
            ReportType::Overtime => "overtime",
            ReportType::Absence => "absence",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "afd" => Some(ReportType::Afd),
            "aej" => Some(ReportType::Aej),
            "mirror" => Some(ReportType::Mirror),
            "overtime" => Some(ReportType::Overtime),
            "absence" => Some(ReportType::Absence),
            _ => None,
        }
    }

    /// File extension of the produced artifact.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportType::Afd | ReportType::Aej => "txt",
            _ => "csv",
        }
    }
}

/// Persisted definition of a recurring report request.
/// `last_run_at` is mutated only by the scheduler, and only forward.
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub id: i64,
    pub report_type: ReportType,
    pub cadence: Cadence,
    /// Free-form recipient list (comma separated), recorded on artifacts.
    pub recipients: String,
    pub enabled: bool,
    /// When set, one invocation drains every pending occurrence in order
    /// instead of advancing a single occurrence.
    pub catch_up: bool,
    pub last_run_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl ReportJob {
    /// Anchor instant for cadence evaluation: the last successful
    /// occurrence, or the job's creation when it never ran.
    pub fn anchor(&self) -> NaiveDateTime {
        self.last_run_at.unwrap_or(self.created_at)
    }
}
