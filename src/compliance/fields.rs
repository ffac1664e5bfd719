//! Byte-exact field formatting for the flat-file formats.
//!
//! These are wire-format helpers, not rendering: `DDMMYYYY` dates, `HHMM`
//! times, zero-padded fixed-width numerics, space-padded text and the
//! additive trailer checksum must match what auditor tooling recomputes.

use chrono::{NaiveDate, NaiveTime};

pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `DDMMYYYY`
pub fn fmt_date(d: NaiveDate) -> String {
    d.format("%d%m%Y").to_string()
}

/// `HHMM`
pub fn fmt_time(t: NaiveTime) -> String {
    t.format("%H%M").to_string()
}

/// Zero-padded unsigned numeric field. Values outside `0..10^width` are
/// clamped so the record width never drifts.
pub fn fmt_num(v: i64, width: usize) -> String {
    let max = 10_i64.pow(width as u32) - 1;
    format!("{:0width$}", v.clamp(0, max), width = width)
}

/// Sign character followed by the zero-padded magnitude (`width` digits).
pub fn fmt_signed(v: i64, width: usize) -> String {
    let sign = if v < 0 { '-' } else { '+' };
    format!("{}{}", sign, fmt_num(v.abs(), width))
}

/// Space-padded (and truncated) fixed-width text field.
pub fn pad_text(s: &str, width: usize) -> String {
    let truncated: String = s.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

/// Left-pad a digit string with zeros to `width`; `None` when it is empty
/// or too long (the caller turns that into a missing/invalid field error).
pub fn pad_digits(s: &str, width: usize) -> Option<String> {
    let d = digits_only(s);
    if d.is_empty() || d.len() > width {
        return None;
    }
    Some(format!("{:0>width$}", d, width = width))
}

/// Additive control checksum over the detail records (line terminators
/// excluded): sum of bytes modulo 10^9, emitted as a 9-digit field.
pub fn checksum(records: &[String]) -> i64 {
    let sum: u64 = records
        .iter()
        .flat_map(|r| r.as_bytes())
        .map(|&b| b as u64)
        .sum();
    (sum % 1_000_000_000) as i64
}
