//! Recurring-report cadence, modeled as a tagged type with a pure
//! `next_occurrence` evaluation instead of ad hoc string branching.
//!
//! Canonical text forms (round-trip through `FromStr`/`Display`):
//! - `daily@HH:MM`
//! - `weekly@DOW@HH:MM`   (DOW = mon..sun)
//! - `monthly@DD@HH:MM`   (DD clamped to the month length)
//! - `cron:M H DOM MON DOW`

use crate::errors::{AppError, AppResult};
use crate::models::employee::{weekday_from_db_str, weekday_to_db_str};
use crate::utils::date::month_last_day;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Bounded search horizon for cron evaluation (days).
const CRON_HORIZON_DAYS: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cadence {
    Daily { at: NaiveTime },
    Weekly { weekday: Weekday, at: NaiveTime },
    Monthly { day: u32, at: NaiveTime },
    Cron(CronExpr),
}

impl Cadence {
    /// First occurrence strictly after `after`. Pure: no clock access.
    pub fn next_occurrence(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Cadence::Daily { at } => {
                let today = after.date().and_time(*at);
                if today > after {
                    Some(today)
                } else {
                    Some(after.date().succ_opt()?.and_time(*at))
                }
            }
            Cadence::Weekly { weekday, at } => {
                let mut d = after.date();
                for _ in 0..8 {
                    if d.weekday() == *weekday {
                        let c = d.and_time(*at);
                        if c > after {
                            return Some(c);
                        }
                    }
                    d = d.succ_opt()?;
                }
                None
            }
            Cadence::Monthly { day, at } => {
                let (mut y, mut m) = (after.year(), after.month());
                for _ in 0..14 {
                    let dom = (*day).min(month_last_day(y, m)?);
                    if let Some(d) = NaiveDate::from_ymd_opt(y, m, dom) {
                        let c = d.and_time(*at);
                        if c > after {
                            return Some(c);
                        }
                    }
                    if m == 12 {
                        y += 1;
                        m = 1;
                    } else {
                        m += 1;
                    }
                }
                None
            }
            Cadence::Cron(expr) => expr.next_after(after),
        }
    }

    /// Inclusive date span covered by a report fired at `occurrence`:
    /// the previous day (daily/cron), the previous 7 days (weekly), or the
    /// previous calendar month (monthly).
    pub fn period_for(&self, occurrence: NaiveDateTime) -> (NaiveDate, NaiveDate) {
        let day = occurrence.date();
        let day_before = day.pred_opt().unwrap_or(day);
        match self {
            Cadence::Daily { .. } | Cadence::Cron(_) => (day_before, day_before),
            Cadence::Weekly { .. } => {
                let start = day - chrono::Days::new(7);
                (start, day_before)
            }
            Cadence::Monthly { .. } => {
                let (y, m) = if day.month() == 1 {
                    (day.year() - 1, 12)
                } else {
                    (day.year(), day.month() - 1)
                };
                let last = month_last_day(y, m).unwrap_or(28);
                let start = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(day_before);
                let end = NaiveDate::from_ymd_opt(y, m, last).unwrap_or(day_before);
                (start, end)
            }
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Daily { at } => write!(f, "daily@{}", at.format("%H:%M")),
            Cadence::Weekly { weekday, at } => {
                write!(f, "weekly@{}@{}", weekday_to_db_str(*weekday), at.format("%H:%M"))
            }
            Cadence::Monthly { day, at } => {
                write!(f, "monthly@{:02}@{}", day, at.format("%H:%M"))
            }
            Cadence::Cron(expr) => write!(f, "cron:{}", expr.expr()),
        }
    }
}

impl FromStr for Cadence {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidCadence(s.to_string());

        if let Some(expr) = s.strip_prefix("cron:") {
            return Ok(Cadence::Cron(CronExpr::parse(expr.trim())?));
        }

        let parts: Vec<&str> = s.split('@').collect();
        match parts.as_slice() {
            ["daily", at] => {
                let at = parse_at(at).ok_or_else(invalid)?;
                Ok(Cadence::Daily { at })
            }
            ["weekly", dow, at] => {
                let weekday = weekday_from_db_str(&dow.to_lowercase()).ok_or_else(invalid)?;
                let at = parse_at(at).ok_or_else(invalid)?;
                Ok(Cadence::Weekly { weekday, at })
            }
            ["monthly", dd, at] => {
                let day: u32 = dd.parse().map_err(|_| invalid())?;
                if !(1..=31).contains(&day) {
                    return Err(invalid());
                }
                let at = parse_at(at).ok_or_else(invalid)?;
                Ok(Cadence::Monthly { day, at })
            }
            _ => Err(invalid()),
        }
    }
}

fn parse_at(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Five-field cron subset: minute, hour, day-of-month, month, day-of-week
/// (0 = Sunday). Each field accepts `*`, `*/step`, numbers, ranges and
/// comma lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    expr: String,
    minutes: Vec<u32>,
    hours: Vec<u32>,
    days: Vec<u32>,
    months: Vec<u32>,
    weekdays: Vec<u32>,
}

impl CronExpr {
    pub fn parse(expr: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidCadence(format!("cron:{expr}"));

        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(invalid());
        }

        // Shape check up front so field parsing below only sees sane input.
        let shape = Regex::new(r"^(\*(/\d+)?|\d+(-\d+)?(,\d+(-\d+)?)*)$")
            .map_err(|e| AppError::Other(e.to_string()))?;
        for f in &fields {
            if !shape.is_match(f) {
                return Err(invalid());
            }
        }

        Ok(Self {
            expr: expr.to_string(),
            minutes: parse_field(fields[0], 0, 59).ok_or_else(invalid)?,
            hours: parse_field(fields[1], 0, 23).ok_or_else(invalid)?,
            days: parse_field(fields[2], 1, 31).ok_or_else(invalid)?,
            months: parse_field(fields[3], 1, 12).ok_or_else(invalid)?,
            weekdays: parse_field(fields[4], 0, 6).ok_or_else(invalid)?,
        })
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    fn day_matches(&self, date: NaiveDate) -> bool {
        if !self.months.is_empty() && !self.months.contains(&date.month()) {
            return false;
        }
        let dom_ok = self.days.is_empty() || self.days.contains(&date.day());
        let dow = date.weekday().num_days_from_sunday();
        let dow_ok = self.weekdays.is_empty() || self.weekdays.contains(&dow);

        // Vixie rule: when both day fields are restricted, either may match.
        if !self.days.is_empty() && !self.weekdays.is_empty() {
            dom_ok || dow_ok
        } else {
            dom_ok && dow_ok
        }
    }

    fn next_after(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut date = after.date();
        for _ in 0..CRON_HORIZON_DAYS {
            if self.day_matches(date) {
                for h in self.hours_iter() {
                    for m in self.minutes_iter() {
                        let t = NaiveTime::from_hms_opt(h, m, 0)?;
                        let c = date.and_time(t);
                        if c > after {
                            return Some(c);
                        }
                    }
                }
            }
            date = date.succ_opt()?;
        }
        None
    }

    fn hours_iter(&self) -> Vec<u32> {
        if self.hours.is_empty() {
            (0..24).collect()
        } else {
            self.hours.clone()
        }
    }

    fn minutes_iter(&self) -> Vec<u32> {
        if self.minutes.is_empty() {
            (0..60).collect()
        } else {
            self.minutes.clone()
        }
    }
}

/// Empty vec means wildcard. Returns `None` for out-of-range values.
fn parse_field(field: &str, min: u32, max: u32) -> Option<Vec<u32>> {
    if field == "*" {
        return Some(Vec::new());
    }

    if let Some(step) = field.strip_prefix("*/") {
        let step: u32 = step.parse().ok()?;
        if step == 0 {
            return None;
        }
        return Some((min..=max).step_by(step as usize).collect());
    }

    let mut out = Vec::new();
    for part in field.split(',') {
        if let Some((a, b)) = part.split_once('-') {
            let (a, b): (u32, u32) = (a.parse().ok()?, b.parse().ok()?);
            if a > b || a < min || b > max {
                return None;
            }
            out.extend(a..=b);
        } else {
            let v: u32 = part.parse().ok()?;
            if v < min || v > max {
                return None;
            }
            out.push(v);
        }
    }
    out.sort_unstable();
    out.dedup();
    Some(out)
}
