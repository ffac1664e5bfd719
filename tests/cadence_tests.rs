mod common;

use common::{date, ts};
use pontolog::models::cadence::Cadence;

fn cad(s: &str) -> Cadence {
    s.parse().expect("valid cadence")
}

#[test]
fn canonical_forms_round_trip() {
    for s in [
        "daily@06:00",
        "weekly@mon@07:30",
        "monthly@01@05:00",
        "monthly@31@23:59",
        "cron:0 6 * * *",
        "cron:*/15 8-18 * * 1-5",
    ] {
        assert_eq!(cad(s).to_string(), s);
    }
}

#[test]
fn invalid_specs_are_rejected() {
    for s in [
        "",
        "daily",
        "daily@25:00",
        "weekly@xyz@06:00",
        "monthly@00@06:00",
        "monthly@32@06:00",
        "hourly@06:00",
        "cron:0 6 * *",
        "cron:61 6 * * *",
        "cron:0 6 * * seg",
    ] {
        assert!(s.parse::<Cadence>().is_err(), "accepted: {s}");
    }
}

#[test]
fn daily_next_occurrence_is_strictly_after() {
    let c = cad("daily@06:00");

    // Before today's slot -> today
    assert_eq!(c.next_occurrence(ts("2024-01-02T05:59")), Some(ts("2024-01-02T06:00")));
    // Exactly at the slot -> tomorrow (strictly after)
    assert_eq!(c.next_occurrence(ts("2024-01-02T06:00")), Some(ts("2024-01-03T06:00")));
    assert_eq!(c.next_occurrence(ts("2024-01-02T06:01")), Some(ts("2024-01-03T06:00")));
}

#[test]
fn weekly_lands_on_the_requested_weekday() {
    let c = cad("weekly@mon@08:00");

    // 2024-01-03 is a Wednesday -> next Monday is 2024-01-08
    assert_eq!(c.next_occurrence(ts("2024-01-03T12:00")), Some(ts("2024-01-08T08:00")));
    // On a Monday before the slot, the same day qualifies
    assert_eq!(c.next_occurrence(ts("2024-01-08T07:00")), Some(ts("2024-01-08T08:00")));
    // On a Monday at the slot, it moves one week out
    assert_eq!(c.next_occurrence(ts("2024-01-08T08:00")), Some(ts("2024-01-15T08:00")));
}

#[test]
fn monthly_clamps_to_short_months() {
    let c = cad("monthly@31@06:00");

    // February 2024 is a leap month: day 31 clamps to 29
    assert_eq!(c.next_occurrence(ts("2024-02-01T00:00")), Some(ts("2024-02-29T06:00")));
    // Non-leap February clamps to 28
    assert_eq!(c.next_occurrence(ts("2025-02-01T00:00")), Some(ts("2025-02-28T06:00")));
    // Regular month keeps day 31
    assert_eq!(c.next_occurrence(ts("2024-01-01T00:00")), Some(ts("2024-01-31T06:00")));
}

#[test]
fn cron_daily_slot() {
    let c = cad("cron:0 6 * * *");

    assert_eq!(c.next_occurrence(ts("2024-01-01T05:00")), Some(ts("2024-01-01T06:00")));
    assert_eq!(c.next_occurrence(ts("2024-01-01T06:00")), Some(ts("2024-01-02T06:00")));
}

#[test]
fn cron_weekday_restriction() {
    // 08:30 Monday-Friday; 2024-01-06 is a Saturday
    let c = cad("cron:30 8 * * 1-5");

    assert_eq!(c.next_occurrence(ts("2024-01-06T00:00")), Some(ts("2024-01-08T08:30")));
}

#[test]
fn cron_vixie_dom_dow_or_rule() {
    // Both day fields restricted: day 15 OR Sunday (0), whichever first.
    let c = cad("cron:0 6 15 * 0");

    // From the 10th: Sunday the 14th comes before the 15th
    assert_eq!(c.next_occurrence(ts("2024-01-10T00:00")), Some(ts("2024-01-14T06:00")));
    // After the Sunday slot: the day-of-month leg fires next
    assert_eq!(c.next_occurrence(ts("2024-01-14T06:00")), Some(ts("2024-01-15T06:00")));
}

#[test]
fn cron_step_minutes() {
    let c = cad("cron:*/20 10 * * *");

    assert_eq!(c.next_occurrence(ts("2024-01-01T10:00")), Some(ts("2024-01-01T10:20")));
    assert_eq!(c.next_occurrence(ts("2024-01-01T10:40")), Some(ts("2024-01-02T10:00")));
}

#[test]
fn period_for_daily_is_the_previous_day() {
    let c = cad("daily@06:00");
    assert_eq!(
        c.period_for(ts("2024-01-02T06:00")),
        (date("2024-01-01"), date("2024-01-01"))
    );
}

#[test]
fn period_for_weekly_is_the_previous_seven_days() {
    let c = cad("weekly@mon@06:00");
    assert_eq!(
        c.period_for(ts("2024-01-08T06:00")),
        (date("2024-01-01"), date("2024-01-07"))
    );
}

#[test]
fn period_for_monthly_is_the_previous_calendar_month() {
    let c = cad("monthly@01@06:00");
    assert_eq!(
        c.period_for(ts("2024-02-01T06:00")),
        (date("2024-01-01"), date("2024-01-31"))
    );
    // January reports cover December of the previous year
    assert_eq!(
        c.period_for(ts("2024-01-01T06:00")),
        (date("2023-12-01"), date("2023-12-31"))
    );
}
