//! Compliance file generation: the byte-exact AFD/AEJ flat files plus the
//! CSV report types. One entry point, `encode`, dispatches per report type;
//! a failed validation aborts the whole encode — no partial files.

pub mod aej;
pub mod afd;
pub mod csv_reports;
pub mod fields;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::employee::Employee;
use crate::models::report_job::ReportType;
use crate::models::summary::DailyTimeSummary;
use chrono::{NaiveDate, NaiveDateTime};
use fields::pad_digits;

/// Company identification for the file headers.
#[derive(Debug, Clone)]
pub struct CompanyMeta {
    pub name: String,
    pub cnpj: String,
}

impl CompanyMeta {
    /// Carries whatever the configuration holds; the flat-file encoders
    /// validate the fields they actually need, so CSV reports keep working
    /// on an unconfigured company.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            name: cfg.company_name.clone(),
            cnpj: cfg.company_cnpj.clone(),
        }
    }

    pub fn name60(&self) -> AppResult<String> {
        if self.name.trim().is_empty() {
            return Err(AppError::MissingField("company_name".to_string()));
        }
        Ok(fields::pad_text(&self.name, 60))
    }

    /// CNPJ as a 14-digit field.
    pub fn cnpj14(&self) -> AppResult<String> {
        pad_digits(&self.cnpj, 14).ok_or_else(|| AppError::MissingField("company_cnpj".to_string()))
    }
}

/// Serialize one report. Pure: the generation stamp is a parameter, so the
/// same inputs always produce the same bytes.
pub fn encode(
    report_type: ReportType,
    company: &CompanyMeta,
    employees: &[Employee],
    events: &[ClockEvent],
    summaries: &[DailyTimeSummary],
    range: (NaiveDate, NaiveDate),
    generated_at: NaiveDateTime,
) -> AppResult<Vec<u8>> {
    if range.0 > range.1 {
        return Err(AppError::InvalidRange(format!(
            "end {} before start {}",
            range.1, range.0
        )));
    }

    match report_type {
        ReportType::Afd => afd::encode_afd(company, employees, events, range, generated_at),
        ReportType::Aej => aej::encode_aej(company, employees, summaries, range, generated_at),
        ReportType::Mirror => csv_reports::mirror_csv(summaries, employees),
        ReportType::Overtime => csv_reports::overtime_csv(summaries, employees),
        ReportType::Absence => csv_reports::absence_csv(summaries, employees),
    }
}
