use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{employees, log};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, WorkSchedule, weekday_from_db_str, weekday_to_db_str};
use crate::utils::table::Table;
use crate::utils::time::{format_minutes, parse_window};
use chrono::{Local, NaiveTime, Weekday};

/// Add or list employees.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee {
        add,
        list,
        name,
        pis,
        expected,
        shift,
        night,
        rest,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) ADD
        //
        if *add {
            let name = name
                .clone()
                .ok_or_else(|| AppError::MissingField("--name".into()))?;
            let pis = pis
                .clone()
                .ok_or_else(|| AppError::MissingField("--pis".into()))?;

            if !pis.chars().all(|c| c.is_ascii_digit()) || pis.is_empty() {
                return Err(AppError::Other(format!(
                    "PIS must be digits only, got '{pis}'"
                )));
            }

            // 2) Schedule, falling back to config defaults
            let (shift_start, shift_end) = match shift {
                Some(w) => {
                    parse_window(w).ok_or_else(|| AppError::InvalidTime(w.to_string()))?
                }
                None => (
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                ),
            };

            let night_src = night.clone().unwrap_or_else(|| cfg.night_window.clone());
            let (night_start, night_end) = parse_window(&night_src)
                .ok_or_else(|| AppError::InvalidTime(night_src.clone()))?;

            let rest_weekday = match rest {
                Some(r) => weekday_from_db_str(r)
                    .ok_or_else(|| AppError::Other(format!("Invalid rest day '{r}', use mon..sun")))?,
                None => Weekday::Sun,
            };

            let emp = Employee {
                id: 0,
                name: name.clone(),
                pis,
                schedule: WorkSchedule {
                    expected_minutes: expected.unwrap_or(cfg.expected_minutes),
                    shift_start,
                    shift_end,
                    night_start,
                    night_end,
                    rest_weekday,
                },
                created_at: Local::now().to_rfc3339(),
            };

            // 3) Persist + internal log
            let id = employees::insert_employee(&pool.conn, &emp)?;

            if let Err(e) = log::ttlog(
                &pool.conn,
                "employee_add",
                &format!("employee {id}"),
                &format!("Added employee '{name}'"),
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            println!("✅ Employee '{}' registered with id {}", name, id);
        }

        //
        // 2) LIST
        //
        if *list {
            let emps = employees::load_all_employees(&pool.conn)?;

            if emps.is_empty() {
                println!("No employees registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                "ID", "Name", "PIS", "Expected", "Shift", "Night", "Rest",
            ]);

            for e in &emps {
                table.add_row(vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.pis.clone(),
                    format_minutes(e.schedule.expected_minutes),
                    format!(
                        "{}-{}",
                        e.schedule.shift_start.format("%H:%M"),
                        e.schedule.shift_end.format("%H:%M")
                    ),
                    format!(
                        "{}-{}",
                        e.schedule.night_start.format("%H:%M"),
                        e.schedule.night_end.format("%H:%M")
                    ),
                    weekday_to_db_str(e.schedule.rest_weekday).to_string(),
                ]);
            }

            println!("👥 Employees:\n");
            print!("{}", table.render());
        }
    }

    Ok(())
}
