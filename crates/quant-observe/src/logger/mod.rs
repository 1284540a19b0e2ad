mod clock;
mod config;
mod error;
mod format;
mod handle;
mod level;
mod log;
mod registry;
mod sink;

pub use clock::Clock;
pub use config::{ConfigSource, EnvSource, LOG_FORMAT_KEY, LOG_LEVEL_KEY, LoggerConfig};
pub use error::LoggerError;
pub use format::{LoggerFormat, Record};
pub use handle::LoggerHandle;
pub use level::LoggerLevel;
pub use log::{HandleLayer, init_global};
pub use registry::{DEFAULT_LOGGER, LoggerRegistry, LoggerState};
pub use sink::{MemorySink, Sink, StdoutSink};
