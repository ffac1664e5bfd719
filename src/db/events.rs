use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_kind::EventKind;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, Result, Row, params};

pub fn insert_event(conn: &Connection, ev: &ClockEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO clock_events (employee_id, date, time, kind, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ev.employee_id,
            ev.date_str(),
            ev.time_str(),
            ev.kind.to_db_str(),
            ev.source,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Events for one employee over an inclusive date range, ordered by
/// timestamp ascending. An empty result is not an error.
pub fn load_events(
    conn: &Connection,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<ClockEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM clock_events
         WHERE employee_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, time ASC",
    )?;

    let rows = stmt.query_map(
        params![
            employee_id,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Events for every employee over an inclusive date range (AFD detail
/// records cover the whole company), ordered by timestamp then employee.
pub fn load_events_all(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<ClockEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM clock_events
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, time ASC, employee_id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_row(row: &Row) -> Result<ClockEvent> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let time = NaiveTime::parse_from_str(&time_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(time_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidEventKind(kind_str)),
        )
    })?;

    Ok(ClockEvent {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date,
        time,
        kind,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}
