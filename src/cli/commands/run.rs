use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scheduler::Scheduler;
use crate::errors::AppResult;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::Local;

/// Scheduler entry point: process every due report occurrence.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run { at, json } = cmd {
        //
        // 1) Resolve the trigger instant
        //
        let as_of = match at {
            Some(s) => parse_timestamp(s)?,
            None => Local::now().naive_local(),
        };

        //
        // 2) Process
        //
        let report = Scheduler::process_scheduled_reports(cfg, as_of)?;

        //
        // 3) Print the invocation outcome
        //
        if *json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("⏰ Scheduler run as of {}\n", format_timestamp(as_of));

        if report.is_empty() {
            println!("No report occurrences were due.");
            return Ok(());
        }

        for id in &report.succeeded {
            println!("✅ job {}: report generated", id);
        }
        for id in &report.skipped {
            println!("⏭️  job {}: occurrence already claimed, skipped", id);
        }
        for (id, err) in &report.failed {
            println!("❌ job {}: {}", id, err);
        }
    }

    Ok(())
}
