use std::{fmt, io, sync::Arc};

use crate::logger::{
    clock::Clock,
    config::LoggerConfig,
    format::{LoggerFormat, Record},
    level::LoggerLevel,
    sink::Sink,
};

/// A configured, named logger.
///
/// Threshold, format and sink are fixed at creation. Clones share the same
/// underlying logger.
#[derive(Clone)]
pub struct LoggerHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    name: String,
    config: LoggerConfig,
    sink: Arc<dyn Sink>,
    clock: Clock,
}

impl LoggerHandle {
    pub(crate) fn new(name: String, config: LoggerConfig, sink: Arc<dyn Sink>, clock: Clock) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                name,
                config,
                sink,
                clock,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn level(&self) -> LoggerLevel {
        self.inner.config.level
    }

    pub fn format(&self) -> LoggerFormat {
        self.inner.config.format
    }

    pub fn config(&self) -> LoggerConfig {
        self.inner.config
    }

    /// Whether an event at `level` would be written.
    pub fn enabled(&self, level: LoggerLevel) -> bool {
        level >= self.inner.config.level
    }

    /// Whether both handles refer to the same logger (and thus the same attached sink).
    pub fn ptr_eq(&self, other: &LoggerHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Write one line for `message` if `level` passes the threshold.
    ///
    /// Events below the threshold are dropped and return `Ok(())`. Sink write
    /// failures are returned as-is.
    pub fn log(&self, level: LoggerLevel, message: impl fmt::Display) -> io::Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        let timestamp = self.inner.clock.timestamp();
        let message = message.to_string();
        let record = Record::new(&timestamp, &self.inner.name, level, &message);
        let line = self.inner.config.format.render(&record);
        self.inner.sink.write_line(&line)
    }

    pub fn debug(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(LoggerLevel::Debug, message)
    }

    pub fn info(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(LoggerLevel::Info, message)
    }

    pub fn warn(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(LoggerLevel::Warn, message)
    }

    pub fn error(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(LoggerLevel::Error, message)
    }

    pub fn fatal(&self, message: impl fmt::Display) -> io::Result<()> {
        self.log(LoggerLevel::Fatal, message)
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.inner.name)
            .field("level", &self.inner.config.level)
            .field("format", &self.inner.config.format)
            .finish_non_exhaustive()
    }
}
