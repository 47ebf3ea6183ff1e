//! Output sinks.
//!
//! # Data Flow
//! ```text
//! LogDispatcher (permitted call)
//!     → LogRecord { payload, timestamp, labels }
//!     → Sink::write
//!         → console.rs  (human-readable line on stdout)
//!         → cloud.rs    (structured entry → CloudTransport, fire-and-forget)
//! ```
//!
//! # Design Decisions
//! - A dispatcher binds exactly one sink at construction and never switches
//! - Writes are non-blocking from the dispatcher's perspective; the cloud
//!   transport owns delivery and any internal buffering
//! - Sink failures never propagate into logging call sites

pub mod cloud;
pub mod console;

pub use cloud::{CloudEntry, CloudSink, CloudTransport, HttpTransport};
pub use console::ConsoleSink;

use crate::level::Severity;
use crate::record::LogRecord;

/// Destination for emitted records.
pub trait Sink: Send + Sync {
    /// Write one record. Returns true if the sink accepted it.
    fn write(&self, severity: Severity, record: &LogRecord) -> bool;
}
