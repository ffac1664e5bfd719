use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{clock, init_db_with_employee, plog, setup_test_db, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_employee_add_and_list() {
    let db_path = setup_test_db("employee_list");
    init_db_with_employee(&db_path);

    plog()
        .args(["--db", &db_path, "employee", "--list"])
        .assert()
        .success()
        .stdout(contains("Ana Souza").and(contains("12345678901")));
}

#[test]
fn test_employee_add_requires_name_and_pis() {
    let db_path = setup_test_db("employee_missing");
    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args(["--db", &db_path, "employee", "--add", "--pis", "123"])
        .assert()
        .failure()
        .stderr(contains("--name"));
}

#[test]
fn test_clock_and_summary() {
    let db_path = setup_test_db("clock_summary");
    init_db_with_employee(&db_path);

    // 2024-01-15 is a Monday: 09:00-18:00 straight through = 540 worked
    clock(&db_path, "1", "in", "2024-01-15", "09:00");
    clock(&db_path, "1", "out", "2024-01-15", "18:00");

    plog()
        .args(["--db", &db_path, "summary", "1", "2024-01-15"])
        .assert()
        .success()
        .stdout(contains("09:00")) // worked
        .stdout(contains("Overtime"))
        .stdout(contains("01:00")); // 60 minutes of overtime
}

#[test]
fn test_summary_json_output() {
    let db_path = setup_test_db("summary_json");
    init_db_with_employee(&db_path);

    clock(&db_path, "1", "in", "2024-01-15", "09:00");
    clock(&db_path, "1", "out", "2024-01-15", "17:00");

    let out = plog()
        .args(["--db", &db_path, "summary", "1", "2024-01-15", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(out).unwrap();
    let json_start = text.find('{').expect("json in output");
    let v: serde_json::Value = serde_json::from_str(text[json_start..].trim()).unwrap();
    assert_eq!(v["worked_minutes"], 480);
    assert_eq!(v["bank_delta_minutes"], 0);
}

#[test]
fn test_invalid_event_kind_is_rejected() {
    let db_path = setup_test_db("bad_kind");
    init_db_with_employee(&db_path);

    plog()
        .args(["--db", &db_path, "clock", "1", "lunch", "--date", "2024-01-15", "--time", "12:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid event kind"));
}

#[test]
fn test_clock_for_unknown_employee_fails() {
    let db_path = setup_test_db("no_employee");
    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args(["--db", &db_path, "clock", "42", "in", "--date", "2024-01-15", "--time", "09:00"])
        .assert()
        .failure()
        .stderr(contains("No employee found with id 42"));
}

#[test]
fn test_bank_over_a_period() {
    let db_path = setup_test_db("bank");
    init_db_with_employee(&db_path);

    // Mon +60, Tue -240
    clock(&db_path, "1", "in", "2024-01-15", "09:00");
    clock(&db_path, "1", "out", "2024-01-15", "18:00");
    clock(&db_path, "1", "in", "2024-01-16", "09:00");
    clock(&db_path, "1", "out", "2024-01-16", "13:00");

    plog()
        .args(["--db", &db_path, "bank", "1", "--period", "2024-01-15:2024-01-16"])
        .assert()
        .success()
        .stdout(contains("2024-01-15"))
        .stdout(contains("2024-01-16"))
        .stdout(contains("Closing balance"));
}

#[test]
fn test_job_add_and_list() {
    let db_path = setup_test_db("job_list");
    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args([
            "--db", &db_path, "job", "--add", "--type", "afd", "--cadence", "daily@06:00",
            "--recipients", "rh@acme.example",
        ])
        .assert()
        .success()
        .stdout(contains("registered"));

    plog()
        .args(["--db", &db_path, "job", "--list"])
        .assert()
        .success()
        .stdout(contains("afd").and(contains("daily@06:00")));
}

#[test]
fn test_job_invalid_cadence_is_rejected() {
    let db_path = setup_test_db("job_bad_cadence");
    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args(["--db", &db_path, "job", "--add", "--type", "afd", "--cadence", "hourly@06:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid cadence"));
}

#[test]
fn test_job_enable_disable_delete() {
    let db_path = setup_test_db("job_toggle");
    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args(["--db", &db_path, "job", "--add", "--type", "mirror", "--cadence", "daily@06:00"])
        .assert()
        .success();

    plog()
        .args(["--db", &db_path, "job", "--disable", "1"])
        .assert()
        .success()
        .stdout(contains("disabled"));

    plog()
        .args(["--db", &db_path, "job", "--enable", "1"])
        .assert()
        .success()
        .stdout(contains("enabled"));

    plog()
        .args(["--db", &db_path, "job", "--del", "1"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    plog()
        .args(["--db", &db_path, "job", "--del", "1"])
        .assert()
        .failure()
        .stderr(contains("No report job found with id 1"));
}

#[test]
fn test_run_reports_nothing_due_without_jobs() {
    let db_path = setup_test_db("run_idle");
    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args(["--db", &db_path, "run", "--at", "2024-01-02T06:30"])
        .assert()
        .success()
        .stdout(contains("No report occurrences were due"));
}

#[test]
fn test_run_surfaces_a_failing_job() {
    // Without a configured company identity the AFD encode must fail, and
    // the failure shows up in the invocation outcome and in the history.
    let db_path = setup_test_db("run_failure");
    init_db_with_employee(&db_path);

    plog()
        .args(["--db", &db_path, "job", "--add", "--type", "afd", "--cadence", "daily@06:00"])
        .assert()
        .success();

    // The job's cadence anchor is its creation instant, so trigger far in
    // the future to make the first occurrence due.
    plog()
        .args(["--db", &db_path, "run", "--at", "2099-01-02T06:30"])
        .assert()
        .success()
        .stdout(contains("❌ job 1"));

    plog()
        .args(["--db", &db_path, "history"])
        .assert()
        .success()
        .stdout(contains("failure"));
}

#[test]
fn test_one_off_mirror_report_to_file() {
    let db_path = setup_test_db("report_mirror");
    let out_file = temp_out("report_mirror", "csv");
    init_db_with_employee(&db_path);

    clock(&db_path, "1", "in", "2024-01-15", "09:00");
    clock(&db_path, "1", "out", "2024-01-15", "18:00");

    plog()
        .args([
            "--db", &db_path, "report", "--type", "mirror", "--file", &out_file,
            "--range", "2024-01-15:2024-01-16", "--force",
        ])
        .assert()
        .success()
        .stdout(contains("report written"));

    let content = std::fs::read_to_string(&out_file).unwrap();
    assert!(content.starts_with("employee_id,"));
    assert!(content.contains("2024-01-15"));
}

#[test]
fn test_history_empty() {
    let db_path = setup_test_db("history_empty");
    plog()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    plog()
        .args(["--db", &db_path, "history"])
        .assert()
        .success()
        .stdout(contains("No report runs recorded"));

    plog()
        .args(["--db", &db_path, "history", "--artifacts"])
        .assert()
        .success()
        .stdout(contains("No artifacts stored"));
}

#[test]
fn test_internal_log_records_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_employee(&db_path);

    plog()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("employee_add")));
}
