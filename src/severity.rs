//! # Severity Levels
//!
//! Severities are ordered from most to least severe:
//!
//! ```text
//! Fatal < Error < Warning < Information < Debug < Trace
//! ```
//!
//! A logger configured with threshold `L` accepts a record of severity `s`
//! when `s <= L`, so the default threshold of `Trace` lets everything through
//! and `Warning` keeps only warnings, errors and fatal records.

use crate::error::LoggingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, and the threshold type of a named logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum Severity {
    Fatal = 1,
    Error = 2,
    Warning = 3,
    Information = 4,
    Debug = 5,
    Trace = 6,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Information,
        Severity::Debug,
        Severity::Trace,
    ];

    /// Name as it appears in the `%p` field of a log line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Fatal => "Fatal",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Information => "Information",
            Severity::Debug => "Debug",
            Severity::Trace => "Trace",
        }
    }

    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|severity| severity.as_u8() == value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LoggingError;

    /// Case-insensitive; accepts the short forms `warn` and `info` as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "information" | "info" => Ok(Severity::Information),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            _ => Err(LoggingError::UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = LoggingError;

    fn try_from(value: String) -> Result<Self, LoggingError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_runs_from_fatal_to_trace() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Warning < Severity::Information);
        assert!(Severity::Debug < Severity::Trace);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Information);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn u8_roundtrip_covers_every_level() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_u8(severity.as_u8()), Some(severity));
        }
        assert_eq!(Severity::from_u8(0), None);
    }
}
