//! High-level summary access: load events + schedule, run the calculator.

use crate::config::Config;
use crate::core::calculator::summary::{CalcContext, compute_daily_summary};
use crate::db::{employees, events};
use crate::errors::AppResult;
use crate::models::employee::Employee;
use crate::models::summary::DailyTimeSummary;
use crate::utils::date::date_iter;
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct SummaryLogic;

impl SummaryLogic {
    pub fn calc_context(cfg: &Config) -> CalcContext {
        CalcContext {
            daily_overtime_cap: cfg.daily_overtime_cap,
        }
    }

    /// Summary of one day for one employee.
    pub fn day(
        conn: &Connection,
        cfg: &Config,
        employee_id: i64,
        date: NaiveDate,
    ) -> AppResult<DailyTimeSummary> {
        let emp = employees::load_employee(conn, employee_id)?;
        let mut summaries = Self::range_for(conn, cfg, &emp, date, date)?;
        // range_for returns exactly one entry per day of the range
        Ok(summaries.remove(0))
    }

    /// One summary per day of the inclusive range, in date order, including
    /// days without any event (those still accrue their expected-minutes
    /// deficit to the bank).
    pub fn range_for(
        conn: &Connection,
        cfg: &Config,
        emp: &Employee,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyTimeSummary>> {
        let ctx = Self::calc_context(cfg);

        // Load one day of margin on both sides so sessions crossing
        // midnight split correctly at the range edges.
        let load_from = start.pred_opt().unwrap_or(start);
        let load_to = end.succ_opt().unwrap_or(end);
        let events = events::load_events(conn, emp.id, load_from, load_to)?;

        let out = date_iter(start, end)
            .into_iter()
            .map(|date| compute_daily_summary(&events, &emp.schedule, emp.id, date, &ctx))
            .collect();

        Ok(out)
    }

    /// Summaries for every employee over the range (report inputs).
    pub fn range_all(
        conn: &Connection,
        cfg: &Config,
        employees: &[Employee],
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailyTimeSummary>> {
        let mut out = Vec::new();
        for emp in employees {
            out.extend(Self::range_for(conn, cfg, emp, start, end)?);
        }
        Ok(out)
    }
}
