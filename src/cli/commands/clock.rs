use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{employees, events, log};
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_kind::EventKind;
use crate::utils::{date, time};
use chrono::Local;

/// Record a clock event.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock {
        employee,
        kind,
        date: d,
        time: t,
    } = cmd
    {
        //
        // 1) Parse kind
        //
        let kind = EventKind::from_cli_str(kind)
            .ok_or_else(|| AppError::InvalidEventKind(kind.to_string()))?;

        //
        // 2) Parse date/time, defaulting to now
        //
        let ev_date = match d {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
            None => date::today(),
        };
        let ev_time = match t {
            Some(s) => time::parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?,
            None => Local::now().time(),
        };

        //
        // 3) Persist (employee must exist)
        //
        let pool = DbPool::new(&cfg.database)?;
        let emp = employees::load_employee(&pool.conn, *employee)?;

        let ev = ClockEvent::new(emp.id, ev_date, ev_time, kind);
        let id = events::insert_event(&pool.conn, &ev)?;

        if let Err(e) = log::ttlog(
            &pool.conn,
            "clock",
            &format!("event {id}"),
            &format!(
                "{} {} at {} {}",
                emp.name,
                kind.to_db_str(),
                ev.date_str(),
                ev.time_str()
            ),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        println!(
            "✅ Recorded {} for {} at {} {}",
            kind.to_db_str(),
            emp.name,
            ev.date_str(),
            ev.time_str()
        );
    }

    Ok(())
}
