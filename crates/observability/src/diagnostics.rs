//! Structured diagnostics emitted by the form rules.
//!
//! Rules never log through globals directly; they are handed a
//! [`DiagnosticSink`]. Production wiring uses [`TracingSink`], tests use
//! [`MemorySink`] and assert on what was recorded.

use std::sync::Mutex;

use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// One structured diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    /// Stable dotted event name, e.g. `price.invalid_description`.
    pub event: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl Diagnostic {
    pub fn new(level: Level, event: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            event,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn warn(event: &'static str, message: impl Into<String>) -> Self {
        Self::new(Level::Warn, event, message)
    }

    pub fn error(event: &'static str, message: impl Into<String>) -> Self {
        Self::new(Level::Error, event, message)
    }

    pub fn info(event: &'static str, message: impl Into<String>) -> Self {
        Self::new(Level::Info, event, message)
    }

    pub fn with_field(mut self, key: &'static str, value: impl ToString) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Destination for rule diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let fields = serde_json::to_string(&diagnostic.fields).unwrap_or_default();
        let Diagnostic {
            level,
            event,
            message,
            ..
        } = diagnostic;
        match level {
            Level::Debug => tracing::debug!(event, fields = %fields, "{message}"),
            Level::Info => tracing::info!(event, fields = %fields, "{message}"),
            Level::Warn => tracing::warn!(event, fields = %fields, "{message}"),
            Level::Error => tracing::error!(event, fields = %fields, "{message}"),
        }
    }
}

/// Keeps every diagnostic in memory.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.entries().iter().map(|d| d.event).collect()
    }

    pub fn find(&self, event: &str) -> Option<Diagnostic> {
        self.entries().into_iter().find(|d| d.event == event)
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(diagnostic);
        }
    }
}
