//! Per-call record construction and formatting.
//!
//! # Responsibilities
//! - Build the ephemeral record a sink receives (payload, timestamp, labels)
//! - Join message parts into a single string
//! - Render local timestamps (`YYYY-MM-DD HH:mm:ss.SSS`, no timezone suffix)
//! - Map severities into the cloud stream vocabulary

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::Local;

use crate::level::Severity;

/// The body of a log call: either an already-formatted string or a
/// structured JSON value that a cloud sink forwards unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Structured(serde_json::Value),
}

impl Payload {
    /// Render the payload as a single line of text. Structured values are
    /// stringified; this is the local-sink path.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Payload::Text(s) => Cow::Borrowed(s),
            Payload::Structured(v) => Cow::Owned(v.to_string()),
        }
    }
}

/// One log record, created per emitted call and discarded after the sink
/// write. Never persisted.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub severity: Severity,
    pub payload: Payload,
    /// Formatted local timestamp, millisecond precision.
    pub timestamp: String,
    /// Snapshot of the process-wide labels at emission time.
    pub labels: BTreeMap<String, String>,
}

impl LogRecord {
    pub fn new(severity: Severity, payload: Payload, labels: BTreeMap<String, String>) -> Self {
        Self {
            severity,
            payload,
            timestamp: format_timestamp(),
            labels,
        }
    }
}

/// Join message parts with single spaces. An empty slice yields an empty
/// message (still an emittable record).
pub fn join_parts(parts: &[&str]) -> String {
    parts.join(" ")
}

/// Local wall-clock timestamp, 24-hour clock, space-separated date and time.
pub fn format_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Map a severity name into the cloud stream vocabulary.
///
/// debug/info/error pass through, warn becomes "warning", and anything
/// unrecognized routes to "info" rather than being dropped.
pub fn cloud_severity(name: &str) -> &'static str {
    match name {
        "debug" => "debug",
        "info" => "info",
        "warn" => "warning",
        "error" => "error",
        _ => "info",
    }
}
