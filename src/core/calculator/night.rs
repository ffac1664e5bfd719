//! Night-premium window overlap.
//!
//! Overlap is computed at minute precision on worked intervals that have
//! already been clipped to the day under summary, so a session that crossed
//! midnight contributes exactly its in-day portion.

use crate::core::calculator::sessions::WorkedInterval;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Minutes two half-open intervals share.
pub fn overlap_minutes(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> i64 {
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    if end > start {
        (end - start).num_minutes()
    } else {
        0
    }
}

/// Overlap of one worked interval with the night window of `date`.
///
/// A window whose start is later than its end (e.g. 22:00–05:00) crosses
/// midnight; within a single date it materializes as two segments, the
/// early one (00:00–end) and the late one (start–24:00).
pub fn night_overlap_minutes(
    interval: &WorkedInterval,
    date: NaiveDate,
    night_start: NaiveTime,
    night_end: NaiveTime,
) -> i64 {
    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = match date.succ_opt() {
        Some(next) => next.and_time(NaiveTime::MIN),
        None => return 0,
    };

    if night_start == night_end {
        return 0;
    }

    if night_start < night_end {
        return overlap_minutes(
            interval.start,
            interval.end,
            date.and_time(night_start),
            date.and_time(night_end),
        );
    }

    // Crosses midnight: early segment + late segment of this date.
    overlap_minutes(interval.start, interval.end, day_start, date.and_time(night_end))
        + overlap_minutes(interval.start, interval.end, date.and_time(night_start), day_end)
}
