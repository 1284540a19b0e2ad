use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

use crate::logger::{
    clock::Clock,
    config::{ConfigSource, EnvSource, LoggerConfig},
    handle::LoggerHandle,
    sink::{Sink, StdoutSink},
};

/// Name used when the caller does not pick one.
pub const DEFAULT_LOGGER: &str = "app";

/// Lifecycle of a registered name.
#[derive(Debug, Clone)]
pub enum LoggerState {
    /// Name is known, nothing is attached yet.
    Unconfigured,
    /// Sink attached; threshold and format fixed for good.
    Configured(LoggerHandle),
}

impl LoggerState {
    pub fn is_configured(&self) -> bool {
        matches!(self, LoggerState::Configured(_))
    }
}

/// Hands out named loggers, configuring each name exactly once.
///
/// Built once at startup and passed by reference to whatever needs a logger.
pub struct LoggerRegistry {
    source: Box<dyn ConfigSource>,
    sink: Arc<dyn Sink>,
    clock: Clock,
    loggers: Mutex<HashMap<String, LoggerState>>,
}

impl LoggerRegistry {
    /// Registry reading the process environment and writing to stdout.
    pub fn new() -> Self {
        Self {
            source: Box::new(EnvSource),
            sink: Arc::new(StdoutSink),
            clock: Clock::new(),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the configuration source consulted on handle creation.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Replace the sink attached to every handle created from now on.
    pub fn with_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Return the logger for `name`, configuring it on first use.
    ///
    /// Configuration is read only when the name is not configured yet; later
    /// calls return the same handle regardless of configuration changes.
    /// Empty names resolve to [`DEFAULT_LOGGER`].
    pub fn acquire(&self, name: &str) -> LoggerHandle {
        let name = normalize(name);
        let mut loggers = self.lock();

        if let Some(LoggerState::Configured(handle)) = loggers.get(name) {
            return handle.clone();
        }

        let config = LoggerConfig::from_source(self.source.as_ref());
        let handle = LoggerHandle::new(name.to_string(), config, Arc::clone(&self.sink), self.clock);
        loggers.insert(name.to_string(), LoggerState::Configured(handle.clone()));

        debug!(
            logger = name,
            level = %config.level,
            format = %config.format,
            "logger configured"
        );
        handle
    }

    /// Shorthand for `acquire(DEFAULT_LOGGER)`.
    pub fn acquire_default(&self) -> LoggerHandle {
        self.acquire(DEFAULT_LOGGER)
    }

    /// Make `name` known without configuring it. No-op if it already exists.
    pub fn reserve(&self, name: &str) {
        self.lock()
            .entry(normalize(name).to_string())
            .or_insert(LoggerState::Unconfigured);
    }

    pub fn state(&self, name: &str) -> Option<LoggerState> {
        self.lock().get(normalize(name)).cloned()
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.state(name).is_some_and(|s| s.is_configured())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, LoggerState>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(name: &str) -> &str {
    let name = name.trim();
    if name.is_empty() { DEFAULT_LOGGER } else { name }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, RwLock},
        thread,
    };

    use super::*;
    use crate::logger::{format::LoggerFormat, level::LoggerLevel, sink::MemorySink};

    /// Source whose values can change between acquisitions.
    #[derive(Clone, Default)]
    struct MutableSource(Arc<RwLock<HashMap<String, String>>>);

    impl MutableSource {
        fn set(&self, key: &str, value: &str) {
            self.0.write().unwrap().insert(key.into(), value.into());
        }
    }

    impl ConfigSource for MutableSource {
        fn get(&self, key: &str) -> Option<String> {
            self.0.read().unwrap().get(key).cloned()
        }
    }

    fn registry(pairs: &[(&str, &str)]) -> (LoggerRegistry, MemorySink) {
        let source: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let sink = MemorySink::new();
        let registry = LoggerRegistry::new()
            .with_source(source)
            .with_sink(sink.clone());
        (registry, sink)
    }

    fn json(line: &str) -> serde_json::Value {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn double_acquire_emits_one_line_per_event() {
        let (registry, sink) = registry(&[]);

        let first = registry.acquire("app");
        let second = registry.acquire("app");
        assert!(first.ptr_eq(&second));

        second.info("hello").unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn json_format_line() {
        let (registry, sink) = registry(&[("LOG_FORMAT", "json")]);

        registry.acquire("app").info("hello").unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let v = json(&lines[0]);
        assert_eq!(v["level"], "INFO");
        assert_eq!(v["name"], "app");
        assert_eq!(v["message"], "hello");
        assert!(v["timestamp"].is_string());
    }

    #[test]
    fn plain_format_when_unset_or_bogus() {
        let cases: [&[(&str, &str)]; 3] = [
            &[],
            &[("LOG_FORMAT", "plain")],
            &[("LOG_FORMAT", "bogus")],
        ];
        for pairs in cases {
            let (registry, sink) = registry(pairs);

            let handle = registry.acquire("app");
            assert_eq!(handle.format(), LoggerFormat::Plain);
            handle.info("hello").unwrap();

            let lines = sink.lines();
            assert_eq!(lines.len(), 1);
            let parts: Vec<_> = lines[0].splitn(4, " - ").collect();
            assert_eq!(parts.len(), 4, "{}", lines[0]);
            assert!(!parts[0].is_empty());
            assert_eq!(&parts[1..], ["app", "INFO", "hello"]);
        }
    }

    #[test]
    fn warn_threshold_filters_info() {
        let (registry, sink) = registry(&[("LOG_LEVEL", "WARN")]);
        let handle = registry.acquire("app");

        handle.info("dropped").unwrap();
        assert!(sink.is_empty());

        handle.warn("kept").unwrap();
        assert_eq!(sink.len(), 1);
        assert!(sink.lines()[0].ends_with(" - WARN - kept"));
    }

    #[test]
    fn bogus_level_behaves_like_info() {
        let (registry, sink) = registry(&[("LOG_LEVEL", "bogus")]);
        let handle = registry.acquire("app");
        assert_eq!(handle.level(), LoggerLevel::Info);

        handle.debug("dropped").unwrap();
        handle.info("kept").unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn names_resolve_independently_at_first_acquire() {
        let source = MutableSource::default();
        let sink = MemorySink::new();
        let registry = LoggerRegistry::new()
            .with_source(source.clone())
            .with_sink(sink.clone());

        source.set("LOG_LEVEL", "ERROR");
        let app = registry.acquire("app");

        source.set("LOG_LEVEL", "DEBUG");
        source.set("LOG_FORMAT", "json");
        let worker = registry.acquire("worker");

        assert!(!app.ptr_eq(&worker));
        assert_eq!(app.level(), LoggerLevel::Error);
        assert_eq!(app.format(), LoggerFormat::Plain);
        assert_eq!(worker.level(), LoggerLevel::Debug);
        assert_eq!(worker.format(), LoggerFormat::Json);

        // Re-acquiring does not pick up the new configuration.
        let again = registry.acquire("app");
        assert!(again.ptr_eq(&app));
        assert_eq!(again.level(), LoggerLevel::Error);

        worker.debug("from worker").unwrap();
        app.info("dropped").unwrap();
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(json(&lines[0])["name"], "worker");
    }

    #[test]
    fn reserved_name_is_configured_on_first_acquire() {
        let (registry, _sink) = registry(&[]);

        registry.reserve("worker");
        assert!(matches!(registry.state("worker"), Some(LoggerState::Unconfigured)));
        assert!(!registry.is_configured("worker"));

        let handle = registry.acquire("worker");
        assert!(registry.is_configured("worker"));

        // Reserving a configured name leaves it alone.
        registry.reserve("worker");
        assert!(registry.acquire("worker").ptr_eq(&handle));
    }

    #[test]
    fn empty_name_uses_default() {
        let (registry, _sink) = registry(&[]);

        let a = registry.acquire("");
        let b = registry.acquire_default();
        let c = registry.acquire("  ");

        assert_eq!(a.name(), DEFAULT_LOGGER);
        assert!(a.ptr_eq(&b));
        assert!(a.ptr_eq(&c));
        assert_eq!(registry.names(), [DEFAULT_LOGGER]);
    }

    #[test]
    fn unknown_name_has_no_state() {
        let (registry, sink) = registry(&[]);
        assert!(registry.state("nope").is_none());
        assert!(registry.names().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn concurrent_first_acquire_configures_once() {
        let (registry, sink) = registry(&[]);
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.acquire("app"))
            })
            .collect();
        let handles: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(handles.iter().all(|h| h.ptr_eq(&handles[0])));
        assert_eq!(registry.names(), ["app"]);

        handles[3].info("once").unwrap();
        assert_eq!(sink.len(), 1);
    }
}
