//! Tracing, logging and structured diagnostics (shared setup).

/// Initialize process-wide observability (tracing/logging) from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&config::LogConfig::from_env());
}

/// Logging configuration.
pub mod config;

/// Injected diagnostic sinks.
pub mod diagnostics;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use config::{ConfigError, LogConfig, LogFormat};
pub use diagnostics::{Diagnostic, DiagnosticSink, Level, MemorySink, TracingSink};
