use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::logger::error::LoggerError;

/// Event severity, ordered from least to most severe.
///
/// A handle emits an event only when its level is at or above the handle's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoggerLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl LoggerLevel {
    pub const ALL: [LoggerLevel; 5] = [
        LoggerLevel::Debug,
        LoggerLevel::Info,
        LoggerLevel::Warn,
        LoggerLevel::Error,
        LoggerLevel::Fatal,
    ];

    /// Upper-case name as it appears in output lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerLevel::Debug => "DEBUG",
            LoggerLevel::Info => "INFO",
            LoggerLevel::Warn => "WARN",
            LoggerLevel::Error => "ERROR",
            LoggerLevel::Fatal => "FATAL",
        }
    }

    /// Lenient resolution: missing or unrecognized values become [`LoggerLevel::Info`].
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(s) => s.parse().unwrap_or_else(|e: LoggerError| {
                tracing::debug!(value = s, error = %e, "falling back to default log level");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "debug" => Ok(LoggerLevel::Debug),
            "info" => Ok(LoggerLevel::Info),
            "warn" | "warning" => Ok(LoggerLevel::Warn),
            "error" => Ok(LoggerLevel::Error),
            "fatal" | "critical" => Ok(LoggerLevel::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LoggerLevel {
    fn from(s: String) -> Self {
        Self::resolve(Some(&s))
    }
}

impl From<LoggerLevel> for String {
    fn from(level: LoggerLevel) -> Self {
        level.as_str().to_string()
    }
}

// tracing has no fatal level and an extra trace level below debug.
impl From<Level> for LoggerLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::TRACE | Level::DEBUG => LoggerLevel::Debug,
            Level::INFO => LoggerLevel::Info,
            Level::WARN => LoggerLevel::Warn,
            _ => LoggerLevel::Error,
        }
    }
}
