//! Cloud logging sink.
//!
//! # Responsibilities
//! - Map severities into the cloud stream vocabulary (warn → "warning",
//!   unrecognized → "info")
//! - Build structured entries carrying labels and the resource-type tag
//! - Hand entries to a transport without awaiting delivery
//!
//! # Design Decisions
//! - The transport is a trait seam; the HTTP implementation drains an
//!   unbounded channel from a spawned task so logging call sites never touch
//!   the network
//! - Delivery failures are the transport's concern: reported on stderr,
//!   never retried here, never surfaced to callers

use std::collections::BTreeMap;

use serde::Serialize;
use tokio::sync::mpsc;

use crate::level::Severity;
use crate::record::{cloud_severity, LogRecord, Payload};
use crate::sink::Sink;

/// Resource metadata attached to every entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
}

/// One structured entry as submitted to the cloud backend.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CloudEntry {
    /// Severity in the stream's own vocabulary.
    pub severity: String,
    pub timestamp: String,
    pub labels: BTreeMap<String, String>,
    pub resource: Resource,
    /// Formatted message, for text calls.
    #[serde(rename = "textPayload", skip_serializing_if = "Option::is_none")]
    pub text_payload: Option<String>,
    /// Raw structured payload, passed through unmodified.
    #[serde(rename = "jsonPayload", skip_serializing_if = "Option::is_none")]
    pub json_payload: Option<serde_json::Value>,
}

/// Delivery seam between the sink and the actual backend.
///
/// `submit` must not block: implementations queue or drop, they never make
/// the caller wait on network completion.
pub trait CloudTransport: Send + Sync {
    fn submit(&self, entry: CloudEntry);
}

/// Sink wrapping a named log stream on a cloud backend.
pub struct CloudSink {
    transport: Box<dyn CloudTransport>,
    resource_type: String,
}

impl CloudSink {
    pub fn new(transport: Box<dyn CloudTransport>, resource_type: impl Into<String>) -> Self {
        Self {
            transport,
            resource_type: resource_type.into(),
        }
    }
}

impl Sink for CloudSink {
    fn write(&self, severity: Severity, record: &LogRecord) -> bool {
        let (text_payload, json_payload) = match &record.payload {
            Payload::Text(s) => (Some(s.clone()), None),
            Payload::Structured(v) => (None, Some(v.clone())),
        };

        self.transport.submit(CloudEntry {
            severity: cloud_severity(severity.as_str()).to_string(),
            timestamp: record.timestamp.clone(),
            labels: record.labels.clone(),
            resource: Resource {
                kind: self.resource_type.clone(),
            },
            text_payload,
            json_payload,
        });
        true
    }
}

/// Transport POSTing entries as JSON to an ingestion endpoint.
///
/// Entries flow through an unbounded channel into a drain task spawned on
/// the current Tokio runtime, so construction requires one. If the task has
/// gone away the send fails silently; a logger must not take the process
/// down.
pub struct HttpTransport {
    tx: mpsc::UnboundedSender<CloudEntry>,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<CloudEntry>();
        let client = reqwest::Client::new();

        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if let Err(e) = client.post(&endpoint).json(&entry).send().await {
                    // Can't log through ourselves; stderr is the escape hatch.
                    eprintln!("logmux: cloud entry delivery failed: {e}");
                }
            }
        });

        Self { tx }
    }
}

impl CloudTransport for HttpTransport {
    fn submit(&self, entry: CloudEntry) {
        let _ = self.tx.send(entry);
    }
}
