use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid logger format: {0} (expected: plain|json)")]
    InvalidFormat(String),
    #[error("Invalid log level: {0} (expected: debug|info|warn|error|fatal)")]
    InvalidLevel(String),
    #[error("Global subscriber has been already initialized")]
    AlreadyInitialized,
    #[error("Failed to initialize global subscriber: {0}")]
    InitializationFailed(String),
}
