use crate::models::report_job::ReportType;
use clap::{Parser, Subcommand};

/// Command-line interface definition for pontolog
/// CLI application for CLT time tracking and scheduled compliance reports
#[derive(Parser)]
#[command(
    name = "pontolog",
    version = env!("CARGO_PKG_VERSION"),
    about = "CLT time tracking and compliance reporting: daily summaries, time bank, scheduled AFD/AEJ generation",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration for fields required by report encoding")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employees and their work schedules
    Employee {
        #[arg(long = "add", help = "Add a new employee")]
        add: bool,

        #[arg(long = "list", help = "List registered employees")]
        list: bool,

        #[arg(long = "name", help = "Employee full name (with --add)")]
        name: Option<String>,

        #[arg(long = "pis", help = "PIS/NIT number, digits only (with --add)")]
        pis: Option<String>,

        #[arg(long = "expected", help = "Contractual minutes per workday (default from config)")]
        expected: Option<i64>,

        #[arg(long = "shift", help = "Shift window HH:MM-HH:MM (default 09:00-18:00)")]
        shift: Option<String>,

        #[arg(long = "night", help = "Night-premium window HH:MM-HH:MM (default from config)")]
        night: Option<String>,

        #[arg(long = "rest", help = "Weekly rest day, mon..sun (default sun)")]
        rest: Option<String>,
    },

    /// Record a clock event for an employee
    Clock {
        /// Employee id
        employee: i64,

        /// Event kind: in, out, break-in, break-out
        kind: String,

        #[arg(long = "date", help = "Event date YYYY-MM-DD (default today)")]
        date: Option<String>,

        #[arg(long = "time", help = "Event time HH:MM (default now)")]
        time: Option<String>,
    },

    /// Show the daily CLT summary for an employee
    Summary {
        /// Employee id
        employee: i64,

        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "json", help = "Emit the summary as JSON")]
        json: bool,
    },

    /// Show the time-bank replay for an employee
    Bank {
        /// Employee id
        employee: i64,

        #[arg(long, short, help = "Period: year/month/day or a custom range")]
        period: String,
    },

    /// Manage scheduled report jobs
    Job {
        #[arg(long = "add", help = "Register a new report job")]
        add: bool,

        #[arg(long = "list", help = "List report jobs")]
        list: bool,

        #[arg(long = "enable", value_name = "ID", help = "Enable a job")]
        enable: Option<i64>,

        #[arg(long = "disable", value_name = "ID", help = "Disable a job")]
        disable: Option<i64>,

        #[arg(long = "del", value_name = "ID", help = "Delete a job")]
        del: Option<i64>,

        #[arg(long = "type", value_enum, help = "Report type (with --add)")]
        report_type: Option<ReportType>,

        #[arg(
            long = "cadence",
            help = "Cadence: daily@HH:MM, weekly@DOW@HH:MM, monthly@DD@HH:MM or cron:EXPR (with --add)"
        )]
        cadence: Option<String>,

        #[arg(long = "recipients", help = "Comma-separated recipient list (with --add)")]
        recipients: Option<String>,

        #[arg(
            long = "catch-up",
            help = "Drain every pending occurrence per invocation instead of one (with --add)"
        )]
        catch_up: bool,
    },

    /// Process due report jobs (the scheduler entry point)
    Run {
        #[arg(
            long = "at",
            value_name = "TIMESTAMP",
            help = "Evaluate cadences as of YYYY-MM-DDTHH:MM (default now)"
        )]
        at: Option<String>,

        #[arg(long = "json", help = "Emit the invocation summary as JSON")]
        json: bool,
    },

    /// Generate a one-off report file for a date range
    Report {
        #[arg(long = "type", value_enum, default_value = "afd")]
        report_type: ReportType,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Report period: year/month/day or a custom range"
        )]
        range: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show report runs and generated artifacts
    History {
        #[arg(long = "job", value_name = "ID", help = "Filter by job id")]
        job: Option<i64>,

        #[arg(long = "artifacts", help = "List stored artifacts instead of runs")]
        artifacts: bool,
    },
}
