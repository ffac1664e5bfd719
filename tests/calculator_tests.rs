mod common;

use common::{date, default_schedule, ev};
use pontolog::core::calculator::bank;
use pontolog::core::calculator::summary::{CalcContext, compute_daily_summary};
use pontolog::models::event_kind::EventKind::{BreakIn, BreakOut, In, Out};
use pontolog::models::summary::AnomalyKind;

fn ctx() -> CalcContext {
    CalcContext {
        daily_overtime_cap: 120,
    }
}

#[test]
fn standard_day_with_lunch_break() {
    // Monday: 09:00-18:00 with a one-hour break = exactly 480 worked
    let events = vec![
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "12:00", BreakIn),
        ev(1, "2024-01-15", "13:00", BreakOut),
        ev(1, "2024-01-15", "18:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());

    assert_eq!(s.worked_minutes, 480);
    assert_eq!(s.expected_minutes, 480);
    assert_eq!(s.overtime_minutes, 0);
    assert_eq!(s.bank_delta_minutes, 0);
    assert!(s.anomalies.is_empty());
}

#[test]
fn nine_hours_with_lunch_break_is_sixty_overtime() {
    // 08:00-18:00 minus a one-hour break = 540 worked against 480 expected
    let events = vec![
        ev(1, "2024-01-15", "08:00", In),
        ev(1, "2024-01-15", "12:00", BreakIn),
        ev(1, "2024-01-15", "13:00", BreakOut),
        ev(1, "2024-01-15", "18:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());

    assert_eq!(s.worked_minutes, 540);
    assert_eq!(s.overtime_minutes, 60);
    assert_eq!(s.bank_delta_minutes, 60);
}

#[test]
fn surplus_becomes_overtime_and_positive_delta() {
    // 540 worked against 480 expected
    let events = vec![
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "18:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());

    assert_eq!(s.worked_minutes, 540);
    assert_eq!(s.overtime_minutes, 60);
    assert_eq!(s.bank_delta_minutes, 60);
    assert!(!s.has_anomaly(AnomalyKind::ExcessiveOvertime));
}

#[test]
fn overtime_beyond_cap_is_flagged() {
    // 660 worked -> 180 overtime, over the 120-minute cap
    let events = vec![
        ev(1, "2024-01-15", "08:00", In),
        ev(1, "2024-01-15", "19:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());

    assert_eq!(s.overtime_minutes, 180);
    assert!(s.has_anomaly(AnomalyKind::ExcessiveOvertime));
}

#[test]
fn deficit_accrues_negative_delta() {
    let events = vec![
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "13:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());

    assert_eq!(s.worked_minutes, 240);
    assert_eq!(s.overtime_minutes, 0);
    assert_eq!(s.bank_delta_minutes, -240);
}

#[test]
fn empty_workday_accrues_full_deficit() {
    let s = compute_daily_summary(&[], &default_schedule(), 1, date("2024-01-15"), &ctx());

    assert_eq!(s.worked_minutes, 0);
    assert_eq!(s.expected_minutes, 480);
    assert_eq!(s.bank_delta_minutes, -480);
    assert!(s.anomalies.is_empty());
}

#[test]
fn rest_day_work_is_compensated_and_flagged() {
    // 2024-01-14 is a Sunday, the default rest day
    let events = vec![
        ev(1, "2024-01-14", "10:00", In),
        ev(1, "2024-01-14", "12:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-14"), &ctx());

    assert_eq!(s.expected_minutes, 0);
    assert_eq!(s.worked_minutes, 120);
    assert_eq!(s.rest_compensation_minutes, 120);
    assert_eq!(s.bank_delta_minutes, 120);
    assert!(s.has_anomaly(AnomalyKind::WorkedOnRestDay));
}

#[test]
fn idle_rest_day_accrues_nothing() {
    let s = compute_daily_summary(&[], &default_schedule(), 1, date("2024-01-14"), &ctx());

    assert_eq!(s.expected_minutes, 0);
    assert_eq!(s.bank_delta_minutes, 0);
    assert!(s.anomalies.is_empty());
}

#[test]
fn session_crossing_midnight_is_split_per_day() {
    // 21:00 Monday to 01:00 Tuesday: each date gets its own portion
    let events = vec![
        ev(1, "2024-01-15", "21:00", In),
        ev(1, "2024-01-16", "01:00", Out),
    ];

    let monday = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());
    let tuesday = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-16"), &ctx());

    assert_eq!(monday.worked_minutes, 180); // 21:00-24:00
    assert_eq!(tuesday.worked_minutes, 60); // 00:00-01:00
    assert!(monday.anomalies.is_empty());
    assert!(tuesday.anomalies.is_empty());
}

#[test]
fn night_premium_window_crossing_midnight() {
    // Night window 22:00-05:00: the Monday portion overlaps 22:00-24:00,
    // the Tuesday portion 00:00-01:00.
    let events = vec![
        ev(1, "2024-01-15", "21:00", In),
        ev(1, "2024-01-16", "01:00", Out),
    ];

    let monday = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());
    let tuesday = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-16"), &ctx());

    assert_eq!(monday.night_premium_minutes, 120);
    assert_eq!(tuesday.night_premium_minutes, 60);
}

#[test]
fn day_work_earns_no_night_premium() {
    let events = vec![
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "18:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());
    assert_eq!(s.night_premium_minutes, 0);
}

#[test]
fn unterminated_session_counts_nothing_and_flags_its_day_only() {
    let events = vec![ev(1, "2024-01-15", "09:00", In)];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());
    assert_eq!(s.worked_minutes, 0);
    assert!(s.has_anomaly(AnomalyKind::UnterminatedSession));

    // The day after carries no flag from it
    let next = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-16"), &ctx());
    assert!(!next.has_anomaly(AnomalyKind::UnterminatedSession));
}

#[test]
fn stray_out_is_flagged() {
    let events = vec![ev(1, "2024-01-15", "17:00", Out)];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());
    assert_eq!(s.worked_minutes, 0);
    assert!(s.has_anomaly(AnomalyKind::UnterminatedSession));
}

#[test]
fn double_in_discards_the_first_session() {
    let events = vec![
        ev(1, "2024-01-15", "08:00", In),
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "17:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());

    // Only 09:00-17:00 counts, the abandoned 08:00 start is flagged
    assert_eq!(s.worked_minutes, 480);
    assert!(s.has_anomaly(AnomalyKind::UnterminatedSession));
}

#[test]
fn unclosed_break_stops_the_worked_portion() {
    let events = vec![
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "12:00", BreakIn),
        ev(1, "2024-01-15", "18:00", Out),
    ];

    let s = compute_daily_summary(&events, &default_schedule(), 1, date("2024-01-15"), &ctx());

    assert_eq!(s.worked_minutes, 180); // 09:00-12:00
    assert!(s.has_anomaly(AnomalyKind::UnterminatedSession));
}

#[test]
fn bank_replay_accumulates_in_date_order() {
    let sched = default_schedule();
    let c = ctx();

    // Mon +60, Tue -240, Wed 0
    let summaries = vec![
        compute_daily_summary(
            &[ev(1, "2024-01-15", "09:00", In), ev(1, "2024-01-15", "18:00", Out)],
            &sched,
            1,
            date("2024-01-15"),
            &c,
        ),
        compute_daily_summary(
            &[ev(1, "2024-01-16", "09:00", In), ev(1, "2024-01-16", "13:00", Out)],
            &sched,
            1,
            date("2024-01-16"),
            &c,
        ),
        compute_daily_summary(
            &[ev(1, "2024-01-17", "09:00", In), ev(1, "2024-01-17", "17:00", Out)],
            &sched,
            1,
            date("2024-01-17"),
            &c,
        ),
    ];

    let entries = bank::replay(&summaries);

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].balance, 60);
    assert_eq!(entries[1].balance, -180);
    assert_eq!(entries[2].balance, -180);
    assert_eq!(bank::closing_balance(&summaries), -180);
}
