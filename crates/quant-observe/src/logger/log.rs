use std::fmt::{self, Write as _};

use tracing::{
    Event, Metadata, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::logger::{error::LoggerError, handle::LoggerHandle, level::LoggerLevel};

/// Routes `tracing` events through a [`LoggerHandle`].
///
/// The handle's threshold and line shape apply. Fields other than `message`
/// are appended to the message as `key=value`.
pub struct HandleLayer {
    handle: LoggerHandle,
}

impl HandleLayer {
    pub fn new(handle: LoggerHandle) -> Self {
        Self { handle }
    }
}

impl<S: Subscriber> Layer<S> for HandleLayer {
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.handle.enabled(LoggerLevel::from(*metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = LoggerLevel::from(*event.metadata().level());
        // tracing offers no way to hand a write error back to the caller.
        let _ = self.handle.log(level, visitor.finish());
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }
}

/// Install `handle` as the process-wide `tracing` subscriber.
///
/// Fails with [`LoggerError::AlreadyInitialized`] when a global subscriber is
/// already set.
pub fn init_global(handle: &LoggerHandle) -> Result<(), LoggerError> {
    tracing_subscriber::registry()
        .with(HandleLayer::new(handle.clone()))
        .try_init()
        .map_err(as_error)
}

fn as_error(e: impl std::fmt::Display) -> LoggerError {
    let s = e.to_string();
    if s.contains("SetGlobalDefaultError") || s.contains("global default trace dispatcher") {
        LoggerError::AlreadyInitialized
    } else {
        LoggerError::InitializationFailed(s)
    }
}
