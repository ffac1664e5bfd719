pub mod cadence;
pub mod clock_event;
pub mod employee;
pub mod event_kind;
pub mod report_job;
pub mod report_run;
pub mod summary;
