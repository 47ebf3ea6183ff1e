//! The level-gated log dispatcher.
//!
//! # Data Flow
//! ```text
//! caller → log(severity, message)
//!     → LevelFilter::permits     (before any formatting)
//!     → LogRecord { payload, timestamp, label snapshot }
//!     → bound Sink (console or cloud, fixed at construction)
//! ```
//!
//! # Design Decisions
//! - The filter runs before formatting; suppressed calls cost one atomic load
//! - Every logging call returns the emitted/suppressed boolean so callers can
//!   skip expensive upstream formatting
//! - A dispatcher without a sink still honors the boolean contract; emission
//!   is simply a no-op

use std::collections::BTreeMap;
use std::sync::RwLock;

use dashmap::DashMap;

use crate::config::{DeployStage, LoggerConfig};
use crate::error::LoggerError;
use crate::level::{LevelFilter, Severity};
use crate::record::{join_parts, LogRecord, Payload};
use crate::sink::{CloudSink, ConsoleSink, HttpTransport, Sink};

/// Leveled logger multiplexing between a console sink and a cloud sink.
///
/// Constructed once per process (see [`crate::init`]) or per named instance
/// for isolated contexts; lives for the process lifetime. The operating mode
/// (Local or Cloud) is fixed at construction and never switches.
pub struct LogDispatcher {
    name: String,
    filter: LevelFilter,
    sink: Option<Box<dyn Sink>>,
    labels: DashMap<String, String>,
    ignored_paths: RwLock<Vec<String>>,
}

impl std::fmt::Debug for LogDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogDispatcher")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl LogDispatcher {
    /// Build from a config. Cloud stages bind a [`CloudSink`] over an HTTP
    /// transport (requires a Tokio runtime); everything else binds the
    /// console sink.
    pub fn from_config(config: LoggerConfig) -> Self {
        let sink: Box<dyn Sink> = if config.stage.is_cloud() {
            Box::new(CloudSink::new(
                Box::new(HttpTransport::new(config.cloud.endpoint.clone())),
                config.resource_type.clone(),
            ))
        } else {
            Box::new(ConsoleSink::new())
        };
        Self::build(config, Some(sink))
    }

    /// Build from the environment: `DEPLOY_STAGE` selects the mode.
    pub fn from_env(name: impl Into<String>) -> Self {
        Self::from_config(LoggerConfig::from_env(name))
    }

    /// Independent Local-mode instance, not registered globally. Useful for
    /// isolated and test contexts.
    pub fn local(name: impl Into<String>) -> Self {
        let config = LoggerConfig {
            name: name.into(),
            stage: DeployStage::Dev,
            ..LoggerConfig::default()
        };
        Self::build(config, Some(Box::new(ConsoleSink::new())))
    }

    /// Instance bound to an arbitrary sink. The seam tests use to observe
    /// emissions.
    pub fn with_sink(name: impl Into<String>, sink: Box<dyn Sink>) -> Self {
        let config = LoggerConfig {
            name: name.into(),
            ..LoggerConfig::default()
        };
        Self::build(config, Some(sink))
    }

    /// Instance with no sink bound: every permitted call is a documented
    /// no-op that still reports `true`.
    pub fn unbound(name: impl Into<String>) -> Self {
        let config = LoggerConfig {
            name: name.into(),
            ..LoggerConfig::default()
        };
        Self::build(config, None)
    }

    fn build(config: LoggerConfig, sink: Option<Box<dyn Sink>>) -> Self {
        let labels = DashMap::new();
        for (k, v) in config.labels {
            labels.insert(k, v);
        }
        Self {
            name: config.name,
            filter: LevelFilter::new(),
            sink,
            labels,
            ignored_paths: RwLock::new(config.ignored_paths),
        }
    }

    /// Logger instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ---- level control -------------------------------------------------

    /// Set the emission threshold by name.
    pub fn set_level(&self, name: &str) -> Result<(), LoggerError> {
        self.filter.set_level(name)
    }

    /// Current threshold.
    pub fn level(&self) -> Severity {
        self.filter.level()
    }

    /// Canonical name of the current threshold.
    pub fn level_name(&self) -> &'static str {
        self.filter.level_name()
    }

    /// Whether a call at `severity` would be emitted right now.
    pub fn permits(&self, severity: Severity) -> bool {
        self.filter.permits(severity)
    }

    // ---- logging calls -------------------------------------------------

    /// Log a formatted message. Returns true iff the filter permitted the
    /// call; with no sink bound a permitted call is a no-op but still true.
    pub fn log(&self, severity: Severity, message: &str) -> bool {
        self.dispatch(severity, || Payload::Text(message.to_string()))
    }

    /// Log message parts joined with single spaces. An empty slice emits an
    /// empty message when the threshold permits.
    pub fn log_parts(&self, severity: Severity, parts: &[&str]) -> bool {
        self.dispatch(severity, || Payload::Text(join_parts(parts)))
    }

    /// Log a structured value. A cloud sink forwards it unmodified as the
    /// entry payload; the console sink stringifies it into the line.
    pub fn log_structured(&self, severity: Severity, value: serde_json::Value) -> bool {
        self.dispatch(severity, || Payload::Structured(value))
    }

    pub fn debug(&self, message: &str) -> bool {
        self.log(Severity::Debug, message)
    }

    pub fn info(&self, message: &str) -> bool {
        self.log(Severity::Info, message)
    }

    pub fn warn(&self, message: &str) -> bool {
        self.log(Severity::Warn, message)
    }

    pub fn error(&self, message: &str) -> bool {
        self.log(Severity::Error, message)
    }

    fn dispatch<F>(&self, severity: Severity, payload: F) -> bool
    where
        F: FnOnce() -> Payload,
    {
        if !self.filter.permits(severity) {
            return false;
        }
        if let Some(sink) = &self.sink {
            let record = LogRecord::new(severity, payload(), self.label_snapshot());
            sink.write(severity, &record);
        }
        true
    }

    // ---- labels ----------------------------------------------------------

    /// Set a process-wide label, overwriting any existing value under that
    /// name. Affects all subsequently formatted structured entries.
    pub fn add_label(&self, name: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(name.into(), value.into());
    }

    fn label_snapshot(&self) -> BTreeMap<String, String> {
        self.labels
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    // ---- ignored paths ---------------------------------------------------

    /// Append one path to the middleware's ignore list.
    pub fn add_ignored_path(&self, path: impl Into<String>) {
        if let Ok(mut paths) = self.ignored_paths.write() {
            paths.push(path.into());
        }
    }

    /// Append several paths, preserving prior entries and order.
    pub fn add_ignored_paths<I, S>(&self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut existing) = self.ignored_paths.write() {
            existing.extend(paths.into_iter().map(Into::into));
        }
    }

    /// Exact-match membership test used by the request middleware.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignored_paths
            .read()
            .map(|paths| paths.iter().any(|p| p == path))
            .unwrap_or(false)
    }

    /// Current ignore list, in insertion order.
    pub fn ignored_paths(&self) -> Vec<String> {
        self.ignored_paths
            .read()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}
