//! AFD encoder: one detail record per clock mark.
//!
//! Record layout (CRLF terminated):
//! - header, type `1`:  NSR `000000000`, CNPJ (14), company name (60),
//!   range start/end `DDMMYYYY`, generation `DDMMYYYY` + `HHMM`
//! - detail, type `3`:  NSR (9, from 1), event date `DDMMYYYY`, event time
//!   `HHMM`, employee PIS (12)
//! - trailer, type `9`: NSR `999999999`, detail count (9), checksum (9)

use crate::compliance::CompanyMeta;
use crate::compliance::fields::{checksum, fmt_date, fmt_num, fmt_time, pad_digits};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::employee::Employee;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

const CRLF: &str = "\r\n";

pub fn encode_afd(
    company: &CompanyMeta,
    employees: &[Employee],
    events: &[ClockEvent],
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
    // 2) DETAIL RECORDS (one per clock mark, NSR ascending)
    //
    let mut details = Vec::with_capacity(events.len());
    for (i, ev) in events.iter().enumerate() {
        let pis = pis_by_employee
            .get(&ev.employee_id)
            .ok_or(AppError::EmployeeNotFound(ev.employee_id))?;

        details.push(format!(
            "{}3{}{}{}",
            fmt_num(i as i64 + 1, 9),
            fmt_date(ev.date),
            fmt_time(ev.time),
            pis,
        ));
    }

    //
    // 3) TRAILER (count + checksum must match the body exactly)
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

/// PIS per employee, left-padded to 12 digits. A missing PIS fails the
/// whole encode: no partial files.
pub(crate) fn pis_map(employees: &[Employee]) -> AppResult<HashMap<i64, String>> {
    let mut map = HashMap::new();
    for emp in employees {
        let pis = pad_digits(&emp.pis, 12)
            .ok_or_else(|| AppError::MissingField(format!("pis (employee {})", emp.id)))?;
        map.insert(emp.id, pis);
    }
    Ok(map)
}
