//! The daily CLT summary: a pure, total function of clock events and the
//! employee's schedule. Irregular input surfaces as anomaly flags, never as
//! an error, so audits always see a value.

use crate::core::calculator::night::night_overlap_minutes;
use crate::core::calculator::sessions::{WorkedInterval, pair_sessions};
use crate::models::clock_event::ClockEvent;
use crate::models::employee::WorkSchedule;
use crate::models::summary::{AnomalyKind, DailyTimeSummary};
use chrono::{Datelike, NaiveDate, NaiveTime};

/// Calculation tunables taken from the configuration.
#[derive(Debug, Clone)]
pub struct CalcContext {
    /// Daily overtime minutes beyond which `excessive_overtime` is flagged.
    pub daily_overtime_cap: i64,
}

impl Default for CalcContext {
    fn default() -> Self {
        Self {
            daily_overtime_cap: 120,
        }
    }
}

/// Compute the summary of `date` for one employee.
///
/// `events` should cover the surrounding days as well (the callers load
/// `date − 1 ..= date + 1`): a session crossing midnight is split at the
/// date boundary and each day receives its own portion.
pub fn compute_daily_summary(
    events: &[ClockEvent],
    schedule: &WorkSchedule,
    employee_id: i64,
    date: NaiveDate,
    ctx: &CalcContext,
) -> DailyTimeSummary {
    let sessions = pair_sessions(events);

    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = date
        .succ_opt()
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(day_start);

    let mut anomalies = Vec::new();

    // -----------------------------
    // Clip worked intervals to the day
    // -----------------------------
    let mut clipped: Vec<WorkedInterval> = Vec::new();
    for iv in &sessions.intervals {
        let start = iv.start.max(day_start);
        let end = iv.end.min(day_end);
        if end > start {
            clipped.push(WorkedInterval { start, end });
        }
    }

    let worked_minutes: i64 = clipped.iter().map(WorkedInterval::minutes).sum();

    // -----------------------------
    // Expected / overtime / bank
    // -----------------------------
    let rest_day = date.weekday() == schedule.rest_weekday;
    let expected_minutes = if rest_day { 0 } else { schedule.expected_minutes };

    let overtime_minutes = (worked_minutes - expected_minutes).max(0);
    if overtime_minutes > ctx.daily_overtime_cap {
        anomalies.push(AnomalyKind::ExcessiveOvertime);
    }

    // Signed: a deficit carries into the bank as a negative delta. On the
    // rest day expected is 0, so any work fully accrues.
    let bank_delta_minutes = worked_minutes - expected_minutes;

    // -----------------------------
    // Night premium (independent of overtime: a minute can be both)
    // -----------------------------
    let night_premium_minutes: i64 = clipped
        .iter()
        .map(|iv| night_overlap_minutes(iv, date, schedule.night_start, schedule.night_end))
        .sum();

    // -----------------------------
    // Rest-day compensation
    // -----------------------------
    let rest_compensation_minutes = if rest_day { worked_minutes } else { 0 };
    if rest_day && worked_minutes > 0 {
        anomalies.push(AnomalyKind::WorkedOnRestDay);
    }

    // -----------------------------
    // Data-quality flags of this day only
    // -----------------------------
    if sessions
        .irregular_at
        .iter()
        .any(|ts| *ts >= day_start && *ts < day_end)
    {
        anomalies.push(AnomalyKind::UnterminatedSession);
    }

    anomalies.sort();
    anomalies.dedup();

    DailyTimeSummary {
        employee_id,
        date,
        worked_minutes,
        expected_minutes,
        overtime_minutes,
        night_premium_minutes,
        rest_compensation_minutes,
        bank_delta_minutes,
        anomalies,
    }
}
