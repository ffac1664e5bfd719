//! Report scheduler.
//!
//! Invoked by an external time trigger with at-least-once semantics: the
//! same minute may fire twice, possibly from separate processes. The only
//! cross-process guard is the durable claim on `(job_id, occurrence)` in
//! `report_runs` — first writer wins, later claimants observe the existing
//! row and report `skipped`.
//!
//! Per due occurrence the state machine is
//! `running → {success, failure, skipped}`. On success the artifact row,
//! the run finalization and the `last_run_at` advance commit in one SQLite
//! transaction; any failure rolls all three back, so the occurrence stays
//! eligible for a later retry. One job's failure never blocks the others.

use crate::compliance::{self, CompanyMeta};
use crate::config::Config;
use crate::core::logic::SummaryLogic;
use crate::db::history::ArtifactMeta;
use crate::db::pool::DbPool;
use crate::db::runs::Claim;
use crate::db::{employees, events, history, jobs, runs};
use crate::errors::AppResult;
use crate::models::report_job::ReportJob;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Aggregate outcome of one scheduler invocation.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub succeeded: Vec<i64>,
    pub failed: Vec<(i64, String)>,
    pub skipped: Vec<i64>,
}

impl RunReport {
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty() && self.skipped.is_empty()
    }
}

enum Outcome {
    Success,
    Failed(String),
    Skipped,
}

pub struct Scheduler;

impl Scheduler {
    /// The trigger entry point. Evaluates every enabled job against
    /// `as_of` and processes each due occurrence to a terminal state.
    pub fn process_scheduled_reports(cfg: &Config, as_of: NaiveDateTime) -> AppResult<RunReport> {
        let mut pool = DbPool::new(&cfg.database)?;

        let due = jobs::load_enabled_jobs(&pool.conn)?;
        let mut report = RunReport::default();

        for job in due {
            // Cadence evaluation is monotonic: the anchor only moves
            // forward (advance_last_run guards against rewinds), so an
            // occurrence already run for T is never produced again.
            let mut anchor = job.anchor();

            loop {
                let Some(occurrence) = job.cadence.next_occurrence(anchor) else {
                    break;
                };
                if occurrence > as_of {
                    break;
                }

                match Self::run_occurrence(&mut pool, cfg, &job, occurrence) {
                    Outcome::Success => {
                        report.succeeded.push(job.id);
                        if !job.catch_up {
                            break;
                        }
                        anchor = occurrence;
                    }
                    Outcome::Skipped => {
                        report.skipped.push(job.id);
                        break;
                    }
                    Outcome::Failed(err) => {
                        report.failed.push((job.id, err));
                        break;
                    }
                }
            }
        }

        Ok(report)
    }

    /// Drive one `(job, occurrence)` to a terminal state. Every error is
    /// absorbed into the outcome: nothing propagates past the job boundary.
    fn run_occurrence(
        pool: &mut DbPool,
        cfg: &Config,
        job: &ReportJob,
        occurrence: NaiveDateTime,
    ) -> Outcome {
        //
        // 1) CLAIM the occurrence (the only concurrency control)
        //
        let run_id = match runs::claim_run(&pool.conn, job.id, occurrence) {
            Ok(Claim::Claimed(id)) => id,
            Ok(Claim::AlreadyTaken) => {
                if let Err(e) = runs::insert_skipped(&pool.conn, job.id, occurrence) {
                    eprintln!("⚠️ Failed to record skipped run: {}", e);
                }
                return Outcome::Skipped;
            }
            Err(e) => return Outcome::Failed(e.to_string()),
        };

        //
        // 2) EXECUTE compute → encode → persist
        //
        match Self::execute(pool, cfg, job, occurrence, run_id) {
            Ok(()) => Outcome::Success,
            Err(e) => {
                let msg = e.to_string();
                // The claim row becomes the immutable failure record;
                // last_run_at was not advanced, so the occurrence retries.
                if let Err(e2) = runs::finalize_failure(&pool.conn, run_id, &msg) {
                    eprintln!("⚠️ Failed to record run failure: {}", e2);
                }
                Outcome::Failed(msg)
            }
        }
    }

    fn execute(
        pool: &mut DbPool,
        cfg: &Config,
        job: &ReportJob,
        occurrence: NaiveDateTime,
        run_id: i64,
    ) -> AppResult<()> {
        let (start, end) = job.cadence.period_for(occurrence);
        let company = CompanyMeta::from_config(cfg);

        let all_employees = employees::load_all_employees(&pool.conn)?;
        let range_events = events::load_events_all(&pool.conn, start, end)?;
        let summaries = SummaryLogic::range_all(&pool.conn, cfg, &all_employees, start, end)?;

        let bytes = compliance::encode(
            job.report_type,
            &company,
            &all_employees,
            &range_events,
            &summaries,
            (start, end),
            occurrence,
        )?;

        let meta = ArtifactMeta {
            report_type: job.report_type.to_db_str(),
            recipients: &job.recipients,
            range_start: start,
            range_end: end,
            size_bytes: bytes.len(),
        };

        // Artifact row, run finalization and last_run_at advance are one
        // logical unit: commit together or not at all.
        let tx = pool.conn.transaction()?;
        let artifact_ref = history::save_artifact(
            &tx,
            &cfg.artifacts_dir,
            job.id,
            occurrence,
            job.report_type.extension(),
            &bytes,
            &meta,
        )?;
        runs::finalize_success(&tx, run_id, &artifact_ref)?;
        jobs::advance_last_run(&tx, job.id, occurrence)?;
        tx.commit()?;

        Ok(())
    }
}
