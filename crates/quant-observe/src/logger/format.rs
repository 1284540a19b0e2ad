use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::logger::{error::LoggerError, level::LoggerLevel};

/// Output line shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoggerFormat {
    /// `<timestamp> - <name> - <level> - <message>`
    #[default]
    Plain,
    /// `{"timestamp":..,"name":..,"level":..,"message":..}`
    Json,
}

/// A single event, ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct Record<'a> {
    pub timestamp: &'a str,
    pub name: &'a str,
    pub level: &'a str,
    pub message: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(timestamp: &'a str, name: &'a str, level: LoggerLevel, message: &'a str) -> Self {
        Self {
            timestamp,
            name,
            level: level.as_str(),
            message,
        }
    }
}

impl LoggerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerFormat::Plain => "plain",
            LoggerFormat::Json => "json",
        }
    }

    /// Lenient resolution: anything other than `json` selects [`LoggerFormat::Plain`].
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(s) => s.parse().unwrap_or_else(|e: LoggerError| {
                tracing::debug!(value = s, error = %e, "falling back to default log format");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Render a record as one line, without the trailing newline.
    pub fn render(&self, record: &Record<'_>) -> String {
        match self {
            LoggerFormat::Plain => format!(
                "{} - {} - {} - {}",
                record.timestamp,
                record.name,
                record.level,
                single_line(record.message)
            ),
            LoggerFormat::Json => serde_json::to_string(record).unwrap_or_else(|e| {
                // Serializing four strings cannot fail; keep a line anyway.
                format!(r#"{{"level":"ERROR","message":"unserializable record: {e}"}}"#)
            }),
        }
    }
}

fn single_line(message: &str) -> std::borrow::Cow<'_, str> {
    if message.contains(['\n', '\r']) {
        message.replace('\n', "\\n").replace('\r', "\\r").into()
    } else {
        message.into()
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "plain" => Ok(LoggerFormat::Plain),
            "json" => Ok(LoggerFormat::Json),
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LoggerFormat {
    fn from(s: String) -> Self {
        Self::resolve(Some(&s))
    }
}

impl From<LoggerFormat> for String {
    fn from(format: LoggerFormat) -> Self {
        format.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2026-10-18T09:30:00.000000000Z";

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("JSON".parse::<LoggerFormat>().unwrap(), LoggerFormat::Json);
        assert_eq!("Plain".parse::<LoggerFormat>().unwrap(), LoggerFormat::Plain);
        assert!(matches!(
            "text".parse::<LoggerFormat>(),
            Err(LoggerError::InvalidFormat(_))
        ));
    }

    #[test]
    fn resolve_falls_back_to_plain() {
        assert_eq!(LoggerFormat::resolve(None), LoggerFormat::Plain);
        assert_eq!(LoggerFormat::resolve(Some("bogus")), LoggerFormat::Plain);
        assert_eq!(LoggerFormat::resolve(Some("Json")), LoggerFormat::Json);
    }

    #[test]
    fn plain_line_shape() {
        let record = Record::new(TS, "app", LoggerLevel::Info, "hello");
        assert_eq!(
            LoggerFormat::Plain.render(&record),
            format!("{TS} - app - INFO - hello")
        );
    }

    #[test]
    fn plain_keeps_one_line_per_event() {
        let record = Record::new(TS, "app", LoggerLevel::Warn, "first\nsecond\r");
        let line = LoggerFormat::Plain.render(&record);
        assert!(!line.contains('\n'));
        assert!(line.ends_with(r"first\nsecond\r"));
    }

    #[test]
    fn json_line_has_fixed_keys_in_order() {
        let record = Record::new(TS, "app", LoggerLevel::Info, "hello");
        let line = LoggerFormat::Json.render(&record);
        assert_eq!(
            line,
            format!(r#"{{"timestamp":"{TS}","name":"app","level":"INFO","message":"hello"}}"#)
        );
    }

    #[test]
    fn json_escapes_message() {
        let record = Record::new(TS, "app", LoggerLevel::Error, "say \"hi\"\nbye");
        let line = LoggerFormat::Json.render(&record);
        assert!(!line.contains('\n'));

        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["message"], "say \"hi\"\nbye");
        assert_eq!(v["level"], "ERROR");
        assert_eq!(v.as_object().unwrap().len(), 4);
    }
}
