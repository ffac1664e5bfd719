//! AEJ encoder: one detail record per daily summary.
//!
//! Record layout (CRLF terminated):
//! - header, type `1`:  NSR `000000000`, CNPJ (14), company name (60),
//!   range start/end `DDMMYYYY`, generation `DDMMYYYY` + `HHMM`
//! - detail, type `2`:  NSR (9, from 1), employee PIS (12), date `DDMMYYYY`,
//!   worked/expected/overtime/night/rest-compensation minutes (4 each),
//!   signed bank delta (sign + 5), anomaly flags (3: unterminated,
//!   excessive overtime, rest-day work, each `0`/`1`)
//! - trailer, type `9`: NSR `999999999`, detail count (9), checksum (9)

use crate::compliance::CompanyMeta;
use crate::compliance::afd::pis_map;
use crate::compliance::fields::{checksum, fmt_date, fmt_num, fmt_signed, fmt_time};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::models::summary::{AnomalyKind, DailyTimeSummary};
use chrono::{NaiveDate, NaiveDateTime};

const CRLF: &str = "\r\n";

pub fn encode_aej(
    company: &CompanyMeta,
    employees: &[Employee],
    summaries: &[DailyTimeSummary],
    range: (NaiveDate, NaiveDate),
    generated_at: NaiveDateTime,
) -> AppResult<Vec<u8>> {
    let pis_by_employee = pis_map(employees)?;

    //
    // 1) HEADER
    //
    let header = format!(
        "{}1{}{}{}{}{}{}",
        fmt_num(0, 9),
        company.cnpj14()?,
        company.name60()?,
        fmt_date(range.0),
        fmt_date(range.1),
        fmt_date(generated_at.date()),
        fmt_time(generated_at.time()),
    );

    //
    // 2) DETAIL RECORDS (one per employee/day summary)
    //
    let mut details = Vec::with_capacity(summaries.len());
    for (i, s) in summaries.iter().enumerate() {
        let pis = pis_by_employee
            .get(&s.employee_id)
            .ok_or(AppError::EmployeeNotFound(s.employee_id))?;

        details.push(format!(
            "{}2{}{}{}{}{}{}{}{}{}",
            fmt_num(i as i64 + 1, 9),
            pis,
            fmt_date(s.date),
            fmt_num(s.worked_minutes, 4),
            fmt_num(s.expected_minutes, 4),
            fmt_num(s.overtime_minutes, 4),
            fmt_num(s.night_premium_minutes, 4),
            fmt_num(s.rest_compensation_minutes, 4),
            fmt_signed(s.bank_delta_minutes, 5),
            anomaly_flags(s),
        ));
    }

    //
    // 3) TRAILER
    //
    let trailer = format!(
        "{}9{}{}",
        "999999999",
        fmt_num(details.len() as i64, 9),
        fmt_num(checksum(&details), 9),
    );

    let mut out = String::new();
    out.push_str(&header);
    out.push_str(CRLF);
    for d in &details {
        out.push_str(d);
        out.push_str(CRLF);
    }
    out.push_str(&trailer);
    out.push_str(CRLF);

    Ok(out.into_bytes())
}

fn anomaly_flags(s: &DailyTimeSummary) -> String {
    let flag = |k| if s.has_anomaly(k) { '1' } else { '0' };
    format!(
        "{}{}{}",
        flag(AnomalyKind::UnterminatedSession),
        flag(AnomalyKind::ExcessiveOvertime),
        flag(AnomalyKind::WorkedOnRestDay),
    )
}
