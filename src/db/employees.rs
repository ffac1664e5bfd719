use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, WorkSchedule, weekday_from_db_str, weekday_to_db_str};
use chrono::NaiveTime;
use rusqlite::{Connection, Result, Row, params};

pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO employees
            (name, pis, expected_minutes, shift_start, shift_end,
             night_start, night_end, rest_weekday, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            emp.name,
            emp.pis,
            emp.schedule.expected_minutes,
            emp.schedule.shift_start.format("%H:%M").to_string(),
            emp.schedule.shift_end.format("%H:%M").to_string(),
            emp.schedule.night_start.format("%H:%M").to_string(),
            emp.schedule.night_end.format("%H:%M").to_string(),
            weekday_to_db_str(emp.schedule.rest_weekday),
            emp.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_employee(conn: &Connection, id: i64) -> AppResult<Employee> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], map_row)?;

    match rows.next() {
        Some(row) => Ok(row?),
        None => Err(AppError::EmployeeNotFound(id)),
    }
}

pub fn load_all_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_row(row: &Row) -> Result<Employee> {
    let rest_str: String = row.get("rest_weekday")?;
    let rest_weekday = weekday_from_db_str(&rest_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid rest weekday: {rest_str}"))),
        )
    })?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        pis: row.get("pis")?,
        schedule: WorkSchedule {
            expected_minutes: row.get("expected_minutes")?,
            shift_start: get_time(row, "shift_start")?,
            shift_end: get_time(row, "shift_end")?,
            night_start: get_time(row, "night_start")?,
            night_end: get_time(row, "night_end")?,
            rest_weekday,
        },
        created_at: row.get("created_at")?,
    })
}

fn get_time(row: &Row, col: &str) -> Result<NaiveTime> {
    let s: String = row.get(col)?;
    NaiveTime::parse_from_str(&s, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(s)),
        )
    })
}
