use chrono::{NaiveTime, Weekday};
use serde::Serialize;

/// Per-employee work-schedule configuration. Owned by the employee record
/// and read-only to the calculator.
#[derive(Debug, Clone, Serialize)]
pub struct WorkSchedule {
    /// Contractual minutes per workday.
    pub expected_minutes: i64,
    pub shift_start: NaiveTime,
    pub shift_end: NaiveTime,
    /// Night-premium window; crosses midnight when start > end
    /// (the CLT default is 22:00–05:00).
    pub night_start: NaiveTime,
    pub night_end: NaiveTime,
    /// Designated weekly rest day (descanso semanal remunerado).
    pub rest_weekday: Weekday,
}

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// PIS/NIT number, digits only. Mandatory for AFD/AEJ encoding.
    pub pis: String,
    #[serde(flatten)]
    pub schedule: WorkSchedule,
    pub created_at: String,
}

/// DB string for a weekday ("mon".."sun").
pub fn weekday_to_db_str(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

pub fn weekday_from_db_str(s: &str) -> Option<Weekday> {
    match s {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}
