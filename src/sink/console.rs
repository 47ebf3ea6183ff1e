//! Local console sink.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::level::Severity;
use crate::record::LogRecord;
use crate::sink::Sink;

/// Writes one human-readable line per record: `<timestamp> <message>`.
///
/// Structured payloads are stringified into the line; machine-readable
/// passthrough is the cloud sink's concern. The writer is injectable so
/// tests can capture output without touching process stdout.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Sink writing to standard output.
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Sink writing to an arbitrary writer.
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, _severity: Severity, record: &LogRecord) -> bool {
        let line = format!("{} {}\n", record.timestamp, record.payload.to_text());
        match self.out.lock() {
            Ok(mut out) => out.write_all(line.as_bytes()).is_ok(),
            Err(_) => false,
        }
    }
}
