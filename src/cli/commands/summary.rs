use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::SummaryLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREY, RESET, YELLOW, color_for_delta};
use crate::utils::date;
use crate::utils::time::format_minutes;

/// Show the daily CLT summary for one employee.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary {
        employee,
        date: d,
        json,
    } = cmd
    {
        let day = date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?;

        let pool = DbPool::new(&cfg.database)?;
        let summary = SummaryLogic::day(&pool.conn, cfg, *employee, day)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!(
            "{}📋 Summary for employee {} on {}{}\n",
            CYAN, summary.employee_id, summary.date, RESET
        );

        println!("  Worked            : {}", format_minutes(summary.worked_minutes));
        println!("  Expected          : {}", format_minutes(summary.expected_minutes));
        println!("  Overtime          : {}", format_minutes(summary.overtime_minutes));
        println!("  Night premium     : {}", format_minutes(summary.night_premium_minutes));
        println!(
            "  Rest compensation : {}",
            format_minutes(summary.rest_compensation_minutes)
        );

        let delta = summary.bank_delta_minutes;
        println!(
            "  Bank delta        : {}{}{}{}",
            color_for_delta(delta),
            if delta >= 0 { "+" } else { "-" },
            format_minutes(delta.abs()),
            RESET
        );

        if summary.anomalies.is_empty() {
            println!("\n  {}No anomalies.{}", GREY, RESET);
        } else {
            println!("\n  {}⚠️ Anomalies:{}", YELLOW, RESET);
            for a in &summary.anomalies {
                println!("    - {}", a.as_str());
            }
        }
    }

    Ok(())
}
