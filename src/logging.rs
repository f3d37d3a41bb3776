//! Injected logging capability.
//!
//! The hosting binary owns a [`Logger`] and hands clones to the resolver and
//! the registry; neither component touches a global logger. Events are
//! forwarded to `tracing` for stderr/file output and, when a sink is
//! attached, to that sink as structured [`LogEvent`]s so callers (and tests)
//! can observe exactly what was emitted.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU8, Ordering},
};

/// Severity of an emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Atomic minimum-level filter shared between [`Logger`] clones.
///
/// Stored as a u8 corresponding to [`LogLevel`] variants:
/// 0=Debug, 1=Info, 2=Warning, 3=Error.
pub struct LogLevelFilter(AtomicU8);

impl LogLevelFilter {
    /// Create a new filter with the given minimum level.
    pub fn new(level: LogLevel) -> Self {
        Self(AtomicU8::new(level_to_u8(level)))
    }

    /// Get the current minimum level.
    pub fn get(&self) -> LogLevel {
        u8_to_level(self.0.load(Ordering::Relaxed))
    }

    /// Set the minimum level.
    pub fn set(&self, level: LogLevel) {
        self.0.store(level_to_u8(level), Ordering::Relaxed);
    }

    /// Check if a message at the given level should be logged.
    pub fn should_log(&self, level: LogLevel) -> bool {
        level_to_u8(level) >= self.0.load(Ordering::Relaxed)
    }
}

impl Default for LogLevelFilter {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

fn level_to_u8(level: LogLevel) -> u8 {
    match level {
        LogLevel::Debug => 0,
        LogLevel::Info => 1,
        LogLevel::Warning => 2,
        LogLevel::Error => 3,
    }
}

fn u8_to_level(val: u8) -> LogLevel {
    match val {
        0 => LogLevel::Debug,
        1 => LogLevel::Info,
        2 => LogLevel::Warning,
        _ => LogLevel::Error,
    }
}

/// A single emitted event.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    /// Name of the logger that emitted the event, if it has one.
    pub logger: Option<String>,
    pub message: String,
}

/// Receives every event that passes the level filter.
pub trait LogSink: Send + Sync {
    fn emit(&self, event: &LogEvent);
}

/// In-memory sink recording events, for tests and diagnostics.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().expect("sink poisoned").clone()
    }

    /// Number of recorded events at exactly `level`.
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.events
            .lock()
            .expect("sink poisoned")
            .iter()
            .filter(|e| e.level == level)
            .count()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: &LogEvent) {
        self.events.lock().expect("sink poisoned").push(event.clone());
    }
}

/// Logging handle passed into components at construction.
///
/// Cloning is cheap; clones share the level filter and sink.
#[derive(Clone)]
pub struct Logger {
    /// Logger name/category.
    name: Option<String>,
    /// Minimum level to log.
    filter: Arc<LogLevelFilter>,
    /// Optional structured-event sink.
    sink: Option<Arc<dyn LogSink>>,
}

impl Logger {
    /// Create a new logger with default settings.
    pub fn new() -> Self {
        Self {
            name: None,
            filter: Arc::new(LogLevelFilter::default()),
            sink: None,
        }
    }

    /// Set the logger name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the level filter.
    pub fn with_level_filter(mut self, filter: Arc<LogLevelFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Attach a structured-event sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Log a message to all configured endpoints.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.filter.should_log(level) {
            return;
        }

        match level {
            LogLevel::Error => {
                if let Some(ref name) = self.name {
                    tracing::error!(logger = %name, "{}", message);
                } else {
                    tracing::error!("{}", message);
                }
            }
            LogLevel::Warning => {
                if let Some(ref name) = self.name {
                    tracing::warn!(logger = %name, "{}", message);
                } else {
                    tracing::warn!("{}", message);
                }
            }
            LogLevel::Info => {
                if let Some(ref name) = self.name {
                    tracing::info!(logger = %name, "{}", message);
                } else {
                    tracing::info!("{}", message);
                }
            }
            LogLevel::Debug => {
                if let Some(ref name) = self.name {
                    tracing::debug!(logger = %name, "{}", message);
                } else {
                    tracing::debug!("{}", message);
                }
            }
        }

        if let Some(ref sink) = self.sink {
            sink.emit(&LogEvent {
                level,
                logger: self.name.clone(),
                message: message.to_string(),
            });
        }
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    /// Log an info message.
    pub fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    /// Log a warning message.
    pub fn warning(&self, msg: &str) {
        self.log(LogLevel::Warning, msg);
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
