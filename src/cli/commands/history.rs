use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{history, runs};
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::time::format_timestamp;

/// Show report runs, or stored artifacts with `--artifacts`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { job, artifacts } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) ARTIFACT LISTING
        //
        if *artifacts {
            let records = history::load_artifacts(&pool.conn, *job)?;

            if records.is_empty() {
                println!("No artifacts stored.");
                return Ok(());
            }

            println!("📦 Artifacts:\n");
            for a in &records {
                println!(
                    "  job {:>4} @ {} | {}",
                    a.job_id,
                    format_timestamp(a.occurrence),
                    a.path
                );
                println!("           {}", a.metadata);
            }
            return Ok(());
        }

        //
        // 2) RUN HISTORY
        //
        let all = runs::load_runs(&pool.conn, *job)?;

        if all.is_empty() {
            println!("No report runs recorded.");
            return Ok(());
        }

        println!("🕘 Report runs:\n");
        for r in &all {
            let status = r.status.to_db_str();
            let detail = match (&r.artifact_ref, &r.error) {
                (Some(path), _) => path.clone(),
                (None, Some(err)) => err.clone(),
                (None, None) => String::new(),
            };

            println!(
                "  {:>4} | job {:>4} @ {} | {}{:<8}{} {}",
                r.id,
                r.job_id,
                format_timestamp(r.occurrence),
                color_for_status(status),
                status,
                RESET,
                detail
            );
        }
    }

    Ok(())
}
