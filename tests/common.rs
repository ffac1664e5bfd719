#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use pontolog::config::Config;
use pontolog::models::clock_event::ClockEvent;
use pontolog::models::employee::{Employee, WorkSchedule};
use pontolog::models::event_kind::EventKind;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn plog() -> Command {
    cargo_bin_cmd!("pontolog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pontolog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create (and reset) a per-test artifacts directory inside tempdir
pub fn setup_artifacts_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pontolog_artifacts", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_dir_all(&p).ok();
    fs::create_dir_all(&p).expect("create artifacts dir");
    p
}

/// Fully-populated Config pointing at test paths, with a valid company
/// identity so AFD/AEJ encoding can succeed.
pub fn test_config(db_path: &str, artifacts_dir: &str) -> Config {
    Config {
        database: db_path.to_string(),
        artifacts_dir: artifacts_dir.to_string(),
        company_name: "ACME Ltda".to_string(),
        company_cnpj: "12345678000199".to_string(),
        expected_minutes: 480,
        night_window: "22:00-05:00".to_string(),
        daily_overtime_cap: 120,
    }
}

/// Default schedule used across tests: 480 expected minutes, 09:00-18:00
/// shift, 22:00-05:00 night window, Sunday rest.
pub fn default_schedule() -> WorkSchedule {
    WorkSchedule {
        expected_minutes: 480,
        shift_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        shift_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        night_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        night_end: NaiveTime::from_hms_opt(5, 0, 0).unwrap(),
        rest_weekday: Weekday::Sun,
    }
}

pub fn employee_with_id(id: i64) -> Employee {
    Employee {
        id,
        name: format!("Employee {id}"),
        pis: "12345678901".to_string(),
        schedule: default_schedule(),
        created_at: "2024-01-01T00:00:00+00:00".to_string(),
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").expect("valid timestamp")
}

/// Build a clock event on `d` at `hhmm` ("HH:MM")
pub fn ev(employee_id: i64, d: &str, hhmm: &str, kind: EventKind) -> ClockEvent {
    ClockEvent::new(
        employee_id,
        date(d),
        NaiveTime::parse_from_str(hhmm, "%H:%M").expect("valid time"),
        kind,
    )
}

/// Initialize DB via the CLI and register one employee with defaults
pub fn init_db_with_employee(db_path: &str) {
    plog()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args([
            "--db",
            db_path,
            "employee",
            "--add",
            "--name",
            "Ana Souza",
            "--pis",
            "12345678901",
        ])
        .assert()
        .success();
}

/// Record one clock mark via the CLI
pub fn clock(db_path: &str, employee: &str, kind: &str, d: &str, t: &str) {
    plog()
        .args([
            "--db", db_path, "clock", employee, kind, "--date", d, "--time", t,
        ])
        .assert()
        .success();
}

/// Seed a database directly through the library (no CLI round trips):
/// schema + one employee, returning its id.
pub fn seed_db(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    pontolog::db::initialize::init_db(&conn).expect("init db");

    let emp = employee_with_id(0);
    pontolog::db::employees::insert_employee(&conn, &emp).expect("insert employee")
}
