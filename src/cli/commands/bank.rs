use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::bank;
use crate::core::logic::SummaryLogic;
use crate::db::employees;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, RESET, color_for_delta};
use crate::utils::date::parse_range;
use crate::utils::time::format_minutes;

/// Replay the time bank for one employee over a period.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Bank { employee, period } = cmd {
        let (start, end) = parse_range(period)?;

        let pool = DbPool::new(&cfg.database)?;
        let emp = employees::load_employee(&pool.conn, *employee)?;
        let summaries = SummaryLogic::range_for(&pool.conn, cfg, &emp, start, end)?;

        let entries = bank::replay(&summaries);

        println!(
            "{}🏦 Time bank for {} ({} → {}){}\n",
            CYAN, emp.name, start, end, RESET
        );

        for e in &entries {
            let signed = |v: i64| {
                format!(
                    "{}{}{}{}",
                    color_for_delta(v),
                    if v >= 0 { "+" } else { "-" },
                    format_minutes(v.abs()),
                    RESET
                )
            };
            println!("  {} | delta {:>18} | balance {:>18}", e.date, signed(e.delta), signed(e.balance));
        }

        let closing = bank::closing_balance(&summaries);
        println!(
            "\n  Closing balance: {}{}{}{}",
            color_for_delta(closing),
            if closing >= 0 { "+" } else { "-" },
            format_minutes(closing.abs()),
            RESET
        );
    }

    Ok(())
}
