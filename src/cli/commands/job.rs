use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{jobs, log};
use crate::errors::{AppError, AppResult};
use crate::models::cadence::Cadence;
use crate::models::report_job::ReportJob;
use crate::utils::table::Table;
use crate::utils::time::format_timestamp;
use chrono::Local;

/// Manage report jobs: register, list, enable/disable, delete.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Job {
        add,
        list,
        enable,
        disable,
        del,
        report_type,
        cadence,
        recipients,
        catch_up,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) ADD
        //
        if *add {
            let report_type =
                report_type.ok_or_else(|| AppError::MissingField("--type".into()))?;
            let cadence_src = cadence
                .clone()
                .ok_or_else(|| AppError::MissingField("--cadence".into()))?;
            let cadence: Cadence = cadence_src.parse()?;

            let job = ReportJob {
                id: 0,
                report_type,
                cadence,
                recipients: recipients.clone().unwrap_or_default(),
                enabled: true,
                catch_up: *catch_up,
                last_run_at: None,
                created_at: Local::now().naive_local(),
            };

            let id = jobs::insert_job(&pool.conn, &job)?;

            if let Err(e) = log::ttlog(
                &pool.conn,
                "job_add",
                &format!("job {id}"),
                &format!("Registered {} job ({})", job.report_type.to_db_str(), job.cadence),
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            println!(
                "✅ Job {} registered: {} every {}",
                id,
                job.report_type.to_db_str(),
                job.cadence
            );
        }

        //
        // 2) ENABLE / DISABLE
        //
        if let Some(id) = enable {
            jobs::load_job(&pool.conn, *id)?;
            jobs::set_enabled(&pool.conn, *id, true)?;
            let _ = log::ttlog(&pool.conn, "job_enable", &format!("job {id}"), "Job enabled");
            println!("✅ Job {} enabled", id);
        }
        if let Some(id) = disable {
            jobs::load_job(&pool.conn, *id)?;
            jobs::set_enabled(&pool.conn, *id, false)?;
            let _ = log::ttlog(&pool.conn, "job_disable", &format!("job {id}"), "Job disabled");
            println!("⏸️  Job {} disabled", id);
        }

        //
        // 3) DELETE
        //
        if let Some(id) = del {
            jobs::load_job(&pool.conn, *id)?;
            jobs::delete_job(&pool.conn, *id)?;
            let _ = log::ttlog(&pool.conn, "job_del", &format!("job {id}"), "Job deleted");
            println!("🗑️  Job {} deleted", id);
        }

        //
        // 4) LIST
        //
        if *list {
            let all = jobs::load_jobs(&pool.conn)?;

            if all.is_empty() {
                println!("No report jobs registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                "ID", "Type", "Cadence", "Enabled", "Catch-up", "Last run", "Recipients",
            ]);

            for j in &all {
                table.add_row(vec![
                    j.id.to_string(),
                    j.report_type.to_db_str().to_string(),
                    j.cadence.to_string(),
                    if j.enabled { "yes".into() } else { "no".into() },
                    if j.catch_up { "yes".into() } else { "no".into() },
                    j.last_run_at
                        .map(format_timestamp)
                        .unwrap_or_else(|| "never".into()),
                    j.recipients.clone(),
                ]);
            }

            println!("🗓️  Report jobs:\n");
            print!("{}", table.render());
        }
    }

    Ok(())
}
