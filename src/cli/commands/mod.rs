pub mod bank;
pub mod clock;
pub mod config;
pub mod db;
pub mod employee;
pub mod history;
pub mod init;
pub mod job;
pub mod log;
pub mod report;
pub mod run;
pub mod summary;
