mod common;

use common::{date, default_schedule, employee_with_id, ev, ts};
use pontolog::compliance::{self, CompanyMeta};
use pontolog::core::calculator::summary::{CalcContext, compute_daily_summary};
use pontolog::errors::AppError;
use pontolog::models::event_kind::EventKind::{In, Out};
use pontolog::models::report_job::ReportType;
use pontolog::models::summary::DailyTimeSummary;

fn company() -> CompanyMeta {
    CompanyMeta {
        name: "ACME Ltda".to_string(),
        cnpj: "12345678000199".to_string(),
    }
}

fn lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8(bytes.to_vec()).expect("ascii output");
    assert!(text.ends_with("\r\n"), "records must be CRLF terminated");
    text.split("\r\n")
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Re-derive the trailer checksum the way auditor tooling does: sum of the
/// detail-record bytes, line terminators excluded, modulo 10^9.
fn recompute_checksum(details: &[String]) -> u64 {
    details
        .iter()
        .flat_map(|l| l.as_bytes())
        .map(|&b| b as u64)
        .sum::<u64>()
        % 1_000_000_000
}

fn sample_summaries() -> Vec<DailyTimeSummary> {
    let sched = default_schedule();
    let ctx = CalcContext {
        daily_overtime_cap: 120,
    };
    vec![
        // 540 worked -> +60
        compute_daily_summary(
            &[ev(1, "2024-01-15", "09:00", In), ev(1, "2024-01-15", "18:00", Out)],
            &sched,
            1,
            date("2024-01-15"),
            &ctx,
        ),
        // absence
        compute_daily_summary(&[], &sched, 1, date("2024-01-16"), &ctx),
    ]
}

#[test]
fn afd_structure_counts_and_checksum() {
    let emps = vec![employee_with_id(1)];
    let events = vec![
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "18:00", Out),
        ev(1, "2024-01-16", "08:30", In),
    ];

    let bytes = compliance::encode(
        ReportType::Afd,
        &company(),
        &emps,
        &events,
        &[],
        (date("2024-01-15"), date("2024-01-16")),
        ts("2024-01-17T06:00"),
    )
    .expect("encode afd");

    let all = lines(&bytes);
    assert_eq!(all.len(), 5); // header + 3 details + trailer

    // Header: NSR 000000000, type 1, CNPJ, padded name, ranges, generation
    let header = &all[0];
    assert!(header.starts_with("0000000001"));
    assert_eq!(&header[10..24], "12345678000199");
    assert_eq!(header[24..84].trim_end(), "ACME Ltda");
    assert_eq!(&header[84..92], "15012024");
    assert_eq!(&header[92..100], "16012024");
    assert_eq!(&header[100..108], "17012024");
    assert_eq!(&header[108..112], "0600");

    // Details: ascending NSR from 1, type 3, date+time+PIS
    let details = &all[1..4];
    assert_eq!(&details[0][..10], "0000000013");
    assert_eq!(&details[1][..10], "0000000023");
    assert_eq!(&details[2][..10], "0000000033");
    assert_eq!(&details[0][10..18], "15012024");
    assert_eq!(&details[0][18..22], "0900");
    assert_eq!(&details[0][22..34], "012345678901"); // PIS left-padded to 12
    assert_eq!(&details[2][18..22], "0830");

    // Trailer: fixed NSR, type 9, count, checksum
    let trailer = all.last().unwrap();
    assert!(trailer.starts_with("9999999999"));
    let count: u64 = trailer[10..19].parse().unwrap();
    let declared: u64 = trailer[19..28].parse().unwrap();
    assert_eq!(count, 3);
    assert_eq!(declared, recompute_checksum(details));
}

#[test]
fn afd_of_empty_range_still_carries_header_and_trailer() {
    let bytes = compliance::encode(
        ReportType::Afd,
        &company(),
        &[],
        &[],
        &[],
        (date("2024-01-15"), date("2024-01-15")),
        ts("2024-01-16T06:00"),
    )
    .expect("encode empty afd");

    let all = lines(&bytes);
    assert_eq!(all.len(), 2);
    let trailer = &all[1];
    assert_eq!(&trailer[10..19], "000000000");
    assert_eq!(&trailer[19..28], "000000000");
}

#[test]
fn aej_detail_fields_and_anomaly_flags() {
    let emps = vec![employee_with_id(1)];
    let summaries = sample_summaries();

    let bytes = compliance::encode(
        ReportType::Aej,
        &company(),
        &emps,
        &[],
        &summaries,
        (date("2024-01-15"), date("2024-01-16")),
        ts("2024-01-17T06:00"),
    )
    .expect("encode aej");

    let all = lines(&bytes);
    assert_eq!(all.len(), 4);

    // First detail: NSR 1, type 2, PIS, date, then the minute fields
    let d = &all[1];
    assert_eq!(&d[..10], "0000000012");
    assert_eq!(&d[10..22], "012345678901");
    assert_eq!(&d[22..30], "15012024");
    assert_eq!(&d[30..34], "0540"); // worked
    assert_eq!(&d[34..38], "0480"); // expected
    assert_eq!(&d[38..42], "0060"); // overtime
    assert_eq!(&d[42..46], "0000"); // night premium
    assert_eq!(&d[46..50], "0000"); // rest compensation
    assert_eq!(&d[50..56], "+00060"); // signed bank delta
    assert_eq!(&d[56..59], "000"); // no anomalies

    // Second detail: the empty day carries a -480 delta
    let d2 = &all[2];
    assert_eq!(&d2[30..34], "0000");
    assert_eq!(&d2[50..56], "-00480");

    // Trailer checksum covers both details
    let trailer = all.last().unwrap();
    let declared: u64 = trailer[19..28].parse().unwrap();
    assert_eq!(declared, recompute_checksum(&all[1..3]));
}

#[test]
fn encoding_is_deterministic() {
    let emps = vec![employee_with_id(1)];
    let events = vec![
        ev(1, "2024-01-15", "09:00", In),
        ev(1, "2024-01-15", "18:00", Out),
    ];
    let summaries = sample_summaries();

    for rt in [ReportType::Afd, ReportType::Aej, ReportType::Mirror] {
        let a = compliance::encode(
            rt,
            &company(),
            &emps,
            &events,
            &summaries,
            (date("2024-01-15"), date("2024-01-16")),
            ts("2024-01-17T06:00"),
        )
        .expect("encode");
        let b = compliance::encode(
            rt,
            &company(),
            &emps,
            &events,
            &summaries,
            (date("2024-01-15"), date("2024-01-16")),
            ts("2024-01-17T06:00"),
        )
        .expect("encode again");
        assert_eq!(a, b);
    }
}

#[test]
fn csv_reports_filter_rows() {
    let emps = vec![employee_with_id(1)];
    let summaries = sample_summaries();

    let mirror = String::from_utf8(
        compliance::encode(
            ReportType::Mirror,
            &company(),
            &emps,
            &[],
            &summaries,
            (date("2024-01-15"), date("2024-01-16")),
            ts("2024-01-17T06:00"),
        )
        .unwrap(),
    )
    .unwrap();
    // header + both days
    assert_eq!(mirror.lines().count(), 3);
    assert!(mirror.contains("employee_id,employee_name,date"));

    let overtime = String::from_utf8(
        compliance::encode(
            ReportType::Overtime,
            &company(),
            &emps,
            &[],
            &summaries,
            (date("2024-01-15"), date("2024-01-16")),
            ts("2024-01-17T06:00"),
        )
        .unwrap(),
    )
    .unwrap();
    // only the +60 day survives
    assert_eq!(overtime.lines().count(), 2);
    assert!(overtime.contains("2024-01-15"));

    let absence = String::from_utf8(
        compliance::encode(
            ReportType::Absence,
            &company(),
            &emps,
            &[],
            &summaries,
            (date("2024-01-15"), date("2024-01-16")),
            ts("2024-01-17T06:00"),
        )
        .unwrap(),
    )
    .unwrap();
    // only the empty workday survives
    assert_eq!(absence.lines().count(), 2);
    assert!(absence.contains("2024-01-16"));
}

#[test]
fn reversed_range_is_rejected() {
    let err = compliance::encode(
        ReportType::Afd,
        &company(),
        &[],
        &[],
        &[],
        (date("2024-01-16"), date("2024-01-15")),
        ts("2024-01-17T06:00"),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidRange(_)));
}

#[test]
fn missing_pis_fails_the_whole_encode() {
    let mut emp = employee_with_id(1);
    emp.pis = String::new();

    let err = compliance::encode(
        ReportType::Afd,
        &company(),
        &[emp],
        &[ev(1, "2024-01-15", "09:00", In)],
        &[],
        (date("2024-01-15"), date("2024-01-15")),
        ts("2024-01-16T06:00"),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::MissingField(_)));
}

#[test]
fn missing_cnpj_fails_the_whole_encode() {
    let company = CompanyMeta {
        name: "ACME Ltda".to_string(),
        cnpj: String::new(),
    };

    let err = compliance::encode(
        ReportType::Aej,
        &company,
        &[],
        &[],
        &[],
        (date("2024-01-15"), date("2024-01-15")),
        ts("2024-01-16T06:00"),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::MissingField(_)));
}
