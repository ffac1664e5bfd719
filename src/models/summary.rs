use chrono::NaiveDate;
use serde::Serialize;

/// Data-quality condition attached to a summary. Anomalies are data, not
/// errors: the calculator always returns a value and the flags stay visible
/// in reports for audit.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    UnterminatedSession,
    ExcessiveOvertime,
    WorkedOnRestDay,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::UnterminatedSession => "unterminated_session",
            AnomalyKind::ExcessiveOvertime => "excessive_overtime",
            AnomalyKind::WorkedOnRestDay => "worked_on_rest_day",
        }
    }
}

/// Derived per-day CLT metrics. Recomputable from clock events + schedule,
/// never hand-edited; identical inputs always produce the identical value.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTimeSummary {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub worked_minutes: i64,
    pub expected_minutes: i64,
    pub overtime_minutes: i64,
    pub night_premium_minutes: i64,
    pub rest_compensation_minutes: i64,
    /// Signed surplus/deficit that accrues to the time bank.
    pub bank_delta_minutes: i64,
    /// Sorted, deduplicated set of flags.
    pub anomalies: Vec<AnomalyKind>,
}

impl DailyTimeSummary {
    pub fn has_anomaly(&self, kind: AnomalyKind) -> bool {
        self.anomalies.contains(&kind)
    }
}
