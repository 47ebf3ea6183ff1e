//! Error definitions for the logging facility.

use thiserror::Error;

/// Errors surfaced to callers of the logging API.
///
/// Both variants are programmer errors raised synchronously; neither is an
/// operational failure to retry. Everything else in the crate degrades
/// gracefully instead of erroring (see the dispatcher and sink docs).
#[derive(Debug, Error)]
pub enum LoggerError {
    /// An unknown severity name was passed to `set_level`.
    #[error("illegal log level: {0}")]
    InvalidLevel(String),

    /// A second `init` call used a different logger name.
    #[error("logger already initialized as {existing:?}, refusing {requested:?}")]
    DuplicateLogger { existing: String, requested: String },
}
