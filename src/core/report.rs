//! One-off report generation to an explicit file, outside the scheduler.
//! Shares the encoder with scheduled runs; no run row or artifact row is
//! recorded, only the internal log.

use crate::compliance::{self, CompanyMeta};
use crate::config::Config;
use crate::core::logic::SummaryLogic;
use crate::db::pool::DbPool;
use crate::db::{employees, events, log};
use crate::errors::AppResult;
use crate::models::report_job::ReportType;
use crate::utils::date::parse_range;
use crate::utils::fs::ensure_writable;
use chrono::Local;
use std::fs;
use std::path::Path;

pub struct ReportLogic;

impl ReportLogic {
    pub fn generate(
        pool: &mut DbPool,
        cfg: &Config,
        report_type: ReportType,
        file: &str,
        range: &str,
        force: bool,
    ) -> AppResult<()> {
        //
        // 1) Resolve period and output path
        //
        let (start, end) = parse_range(range)?;
        let path = Path::new(file);
        ensure_writable(path, force)?;

        //
        // 2) Load inputs
        //
        let company = CompanyMeta::from_config(cfg);
        let emps = employees::load_all_employees(&pool.conn)?;
        let evts = events::load_events_all(&pool.conn, start, end)?;
        let summaries = SummaryLogic::range_all(&pool.conn, cfg, &emps, start, end)?;

        //
        // 3) Encode and write
        //
        let bytes = compliance::encode(
            report_type,
            &company,
            &emps,
            &evts,
            &summaries,
            (start, end),
            Local::now().naive_local(),
        )?;

        fs::write(path, &bytes)?;

        if let Err(e) = log::ttlog(
            &pool.conn,
            "report",
            &format!("{} {}..{}", report_type.to_db_str(), start, end),
            &format!("Wrote {} ({} bytes)", path.display(), bytes.len()),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        println!(
            "📄 {} report written to {} ({} bytes, {} → {})",
            report_type.to_db_str(),
            path.display(),
            bytes.len(),
            start,
            end
        );

        Ok(())
    }
}
