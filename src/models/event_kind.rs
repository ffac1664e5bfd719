use serde::Serialize;

/// Kind of a clock mark. Breaks are explicit events, not a minute count:
/// a `break_in`/`break_out` interval inside a work session is subtracted
/// from the worked time.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventKind {
    In,
    Out,
    BreakIn,
    BreakOut,
}

impl EventKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::In => "in",
            EventKind::Out => "out",
            EventKind::BreakIn => "break_in",
            EventKind::BreakOut => "break_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(EventKind::In),
            "out" => Some(EventKind::Out),
            "break_in" => Some(EventKind::BreakIn),
            "break_out" => Some(EventKind::BreakOut),
            _ => None,
        }
    }

    /// Lenient parse for CLI input (accepts dashes and mixed case).
    pub fn from_cli_str(s: &str) -> Option<Self> {
        Self::from_db_str(&s.to_lowercase().replace('-', "_"))
    }
}
