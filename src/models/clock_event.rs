use super::event_kind::EventKind;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Immutable clock mark for one employee.
/// Ordered by `(date, time)` within a day; the calculator never mutates it.
#[derive(Debug, Clone, Serialize)]
pub struct ClockEvent {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,  // ⇔ clock_events.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,  // ⇔ clock_events.time (TEXT "HH:MM")
    pub kind: EventKind,  // ⇔ clock_events.kind
    pub source: String,   // ⇔ clock_events.source (TEXT, default 'cli')
    pub created_at: String, // ⇔ clock_events.created_at (TEXT, ISO8601)
}

impl ClockEvent {
    /// High-level constructor for events recorded from the CLI.
    pub fn new(employee_id: i64, date: NaiveDate, time: NaiveTime, kind: EventKind) -> Self {
        Self {
            id: 0,
            employee_id,
            date,
            time,
            kind,
            source: "cli".to_string(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
