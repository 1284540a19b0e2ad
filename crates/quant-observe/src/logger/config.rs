use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logger::{format::LoggerFormat, level::LoggerLevel};

pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
pub const LOG_FORMAT_KEY: &str = "LOG_FORMAT";

/// Where a registry reads `LOG_LEVEL` / `LOG_FORMAT` from.
///
/// Consulted once per handle creation, never afterwards.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// An explicit config acts as a source that always yields its own values.
impl ConfigSource for LoggerConfig {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            LOG_LEVEL_KEY => Some(self.level.to_string()),
            LOG_FORMAT_KEY => Some(self.format.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LoggerLevel,
    pub format: LoggerFormat,
}

impl LoggerConfig {
    /// Resolve both options from `source`, substituting defaults for missing or invalid values.
    pub fn from_source(source: &dyn ConfigSource) -> Self {
        Self {
            level: LoggerLevel::resolve(source.get(LOG_LEVEL_KEY).as_deref()),
            format: LoggerFormat::resolve(source.get(LOG_FORMAT_KEY).as_deref()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_source(&EnvSource)
    }
}
