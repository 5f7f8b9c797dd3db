//! Monitoring check severities.
use std::fmt;

/// Severity of a single check result or of the whole run.
///
/// The numeric values are the status codes understood by the monitoring agent and double as the
/// process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl Status {
    /// Severity used for per-mount problems.
    pub fn for_problem(warn: bool) -> Self {
        if warn { Status::Warning } else { Status::Critical }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn exit_code(self) -> i32 {
        i32::from(self.code())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Status {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}
