//! CSV report artifacts: mirror (espelho de ponto), overtime and absence.

use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::summary::DailyTimeSummary;
use std::collections::HashMap;

/// Every day summary of the range.
pub fn mirror_csv(summaries: &[DailyTimeSummary], employees: &[Employee]) -> AppResult<Vec<u8>> {
    write_summaries(summaries, employees, |_| true)
}

/// Only the days that carry overtime.
pub fn overtime_csv(summaries: &[DailyTimeSummary], employees: &[Employee]) -> AppResult<Vec<u8>> {
    write_summaries(summaries, employees, |s| s.overtime_minutes > 0)
}

/// Scheduled workdays without a single worked minute.
pub fn absence_csv(summaries: &[DailyTimeSummary], employees: &[Employee]) -> AppResult<Vec<u8>> {
    write_summaries(summaries, employees, |s| {
        s.expected_minutes > 0 && s.worked_minutes == 0
    })
}

fn write_summaries<F>(
    summaries: &[DailyTimeSummary],
    employees: &[Employee],
    keep: F,
) -> AppResult<Vec<u8>>
where
    F: Fn(&DailyTimeSummary) -> bool,
{
    let names: HashMap<i64, &str> = employees
        .iter()
        .map(|e| (e.id, e.name.as_str()))
        .collect();

    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record([
        "employee_id",
        "employee_name",
        "date",
        "worked_minutes",
        "expected_minutes",
        "overtime_minutes",
        "night_premium_minutes",
        "rest_compensation_minutes",
        "bank_delta_minutes",
        "anomalies",
    ])
    .map_err(csv_err)?;

    for s in summaries.iter().filter(|s| keep(s)) {
        let anomalies = s
            .anomalies
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join("|");

        wtr.write_record(&[
            s.employee_id.to_string(),
            names.get(&s.employee_id).unwrap_or(&"?").to_string(),
            s.date.format("%Y-%m-%d").to_string(),
            s.worked_minutes.to_string(),
            s.expected_minutes.to_string(),
            s.overtime_minutes.to_string(),
            s.night_premium_minutes.to_string(),
            s.rest_compensation_minutes.to_string(),
            s.bank_delta_minutes.to_string(),
            anomalies,
        ])
        .map_err(csv_err)?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Other(format!("CSV buffer error: {e}")))
}

fn csv_err(e: csv::Error) -> AppError {
    AppError::Other(format!("CSV write error: {e}"))
}
