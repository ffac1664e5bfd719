//! Pairing of raw clock marks into worked intervals.
//!
//! `in`/`out` open and close a session; `break_in`/`break_out` carve a break
//! out of the enclosing session. Irregular sequences never abort the
//! computation: the offending timestamp is collected so the summary of that
//! day (and only that day) can carry the `unterminated_session` flag.

use crate::models::clock_event::ClockEvent;
use crate::models::event_kind::EventKind;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WorkedInterval {
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[derive(Debug, Default)]
pub struct SessionSet {
    /// Net worked intervals (sessions minus completed breaks), in order.
    /// May span midnight; callers clip to the day they are summarizing.
    pub intervals: Vec<WorkedInterval>,
    /// Timestamps of irregular marks (unterminated session or break, stray
    /// `out`/`break_*`).
    pub irregular_at: Vec<NaiveDateTime>,
}

struct OpenSession {
    start: NaiveDateTime,
    breaks: Vec<(NaiveDateTime, NaiveDateTime)>,
    open_break: Option<NaiveDateTime>,
}

pub fn pair_sessions(events: &[ClockEvent]) -> SessionSet {
    if events.is_empty() {
        return SessionSet::default();
    }

    // -----------------------------
    // Sort events chronologically
    // -----------------------------
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.timestamp());

    let mut set = SessionSet::default();
    let mut open: Option<OpenSession> = None;

    for ev in &sorted {
        let ts = ev.timestamp();

        match ev.kind {
            EventKind::In => {
                // A new IN while a session is open: the previous session
                // never closed. Best effort: discard it, flag its start.
                if let Some(prev) = open.take() {
                    set.irregular_at.push(prev.start);
                }
                open = Some(OpenSession {
                    start: ts,
                    breaks: Vec::new(),
                    open_break: None,
                });
            }

            EventKind::Out => match open.take() {
                Some(mut session) => {
                    // An unclosed break runs to the session end and is
                    // flagged: the worked portion stops at break_in.
                    if let Some(b) = session.open_break.take() {
                        set.irregular_at.push(b);
                        session.breaks.push((b, ts));
                    }
                    close_session(&mut set, &session, ts);
                }
                // OUT without a matching IN.
                None => set.irregular_at.push(ts),
            },

            EventKind::BreakIn => match open {
                Some(ref mut session) if session.open_break.is_none() => {
                    session.open_break = Some(ts);
                }
                // Nested break or break outside a session.
                _ => set.irregular_at.push(ts),
            },

            EventKind::BreakOut => match open {
                Some(ref mut session) if session.open_break.is_some() => {
                    if let Some(b) = session.open_break.take() {
                        session.breaks.push((b, ts));
                    }
                }
                _ => set.irregular_at.push(ts),
            },
        }
    }

    // Trailing open session (odd final IN): discard, flag.
    if let Some(session) = open {
        set.irregular_at.push(session.start);
    }

    set
}

/// Emit the session's net worked intervals: `[start, end]` minus its breaks.
fn close_session(set: &mut SessionSet, session: &OpenSession, end: NaiveDateTime) {
    let mut cursor = session.start;

    for &(b_start, b_end) in &session.breaks {
        if b_start > cursor {
            set.intervals.push(WorkedInterval {
                start: cursor,
                end: b_start.min(end),
            });
        }
        cursor = cursor.max(b_end);
    }

    if end > cursor {
        set.intervals.push(WorkedInterval { start: cursor, end });
    }
}
