//! Process-wide logger instance and legacy capture.
//!
//! # Responsibilities
//! - Hold the one process-scoped [`LogDispatcher`] behind a `OnceLock`
//! - Enforce the init contract: same name is an idempotent no-op, a
//!   different name fails with `DuplicateLogger`
//! - Route `log` crate macros (`log::info!` etc.) through the dispatcher so
//!   legacy call sites keep working unmodified
//!
//! # Design Decisions
//! - No monkey-patching of output streams: the capture surface is a narrow
//!   `log::Log` shim installed once at init
//! - Calls before init are documented no-ops, never a panic

use std::sync::{Arc, OnceLock};

use crate::dispatcher::LogDispatcher;
use crate::error::LoggerError;
use crate::level::Severity;

static GLOBAL: OnceLock<Arc<LogDispatcher>> = OnceLock::new();

/// Initialize the process-wide logger.
///
/// Idempotent: a second call with the same name returns the existing
/// instance; a second call with a different name fails with
/// [`LoggerError::DuplicateLogger`]. The deployment stage (and with it the
/// sink mode) is read from `DEPLOY_STAGE` on first call. Installing the
/// instance also binds the `log` facade shim, so `log::info!` and friends
/// start routing through the dispatcher.
pub fn init(name: &str) -> Result<Arc<LogDispatcher>, LoggerError> {
    let instance = GLOBAL.get_or_init(|| {
        let dispatcher = Arc::new(LogDispatcher::from_env(name));
        install_capture_shim();
        dispatcher
    });
    if instance.name() != name {
        return Err(LoggerError::DuplicateLogger {
            existing: instance.name().to_string(),
            requested: name.to_string(),
        });
    }
    Ok(Arc::clone(instance))
}

/// The process-wide instance, if `init` has run.
pub fn try_global() -> Option<Arc<LogDispatcher>> {
    GLOBAL.get().cloned()
}

/// Log through the process-wide instance. Before init this is a no-op
/// reporting `false`.
pub fn log(severity: Severity, message: &str) -> bool {
    match GLOBAL.get() {
        Some(dispatcher) => dispatcher.log(severity, message),
        None => false,
    }
}

/// Convenience passthroughs for call sites that don't hold the instance.
pub fn debug(message: &str) -> bool {
    log(Severity::Debug, message)
}

pub fn info(message: &str) -> bool {
    log(Severity::Info, message)
}

pub fn warn(message: &str) -> bool {
    log(Severity::Warn, message)
}

pub fn error(message: &str) -> bool {
    log(Severity::Error, message)
}

/// Shim routing the `log` facade into the dispatcher.
struct CaptureShim;

static CAPTURE_SHIM: CaptureShim = CaptureShim;

impl log::Log for CaptureShim {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        match GLOBAL.get() {
            Some(dispatcher) => dispatcher.permits(map_level(metadata.level())),
            None => false,
        }
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Some(dispatcher) = GLOBAL.get() {
            dispatcher.log(map_level(record.level()), &record.args().to_string());
        }
    }

    fn flush(&self) {}
}

/// Map `log` facade levels onto the four-step scale. Trace collapses into
/// debug; the scale has no finer rank.
fn map_level(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn => Severity::Warn,
        log::Level::Info => Severity::Info,
        log::Level::Debug | log::Level::Trace => Severity::Debug,
    }
}

fn install_capture_shim() {
    // Fails only if another logger already claimed the facade; our filter
    // gates emission either way, so the error is ignorable.
    if log::set_logger(&CAPTURE_SHIM).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_is_noop_before_init_then_init_contract() {
        // Single test: the global is process state and test order is not
        // guaranteed across functions.
        assert!(!debug("no instance yet"));
        assert!(try_global().is_none());

        let first = init("svc").unwrap();
        let second = init("svc").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let err = init("other").unwrap_err();
        assert!(matches!(
            err,
            LoggerError::DuplicateLogger { ref existing, ref requested }
                if existing == "svc" && requested == "other"
        ));

        // Facade routes once initialized; local mode permits debug.
        assert!(debug("routed"));
        assert!(info("routed"));

        // Legacy call sites via the log facade go through the same filter.
        log::info!("captured");
        first.set_level("error").unwrap();
        assert!(!info("suppressed now"));
        assert!(error("still emitted"));
        first.set_level("debug").unwrap();
    }

    #[test]
    fn test_trace_collapses_into_debug() {
        assert_eq!(map_level(log::Level::Trace), Severity::Debug);
        assert_eq!(map_level(log::Level::Warn), Severity::Warn);
    }
}
