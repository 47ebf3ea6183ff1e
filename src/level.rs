//! Severity scale and the level gate.
//!
//! # Responsibilities
//! - Define the ordered severity scale (debug < info < warn < error)
//! - Decide per call whether a severity passes the current threshold
//! - Validate and apply threshold changes
//!
//! # Design Decisions
//! - Comparisons are numeric over the derived `Ord` ranks
//! - The threshold lives in an `AtomicU8` so the filter works behind `Arc`
//!   without locking on the hot path

use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::LoggerError;

/// Log severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Severity {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Numeric rank used for threshold comparison.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    fn from_rank(rank: u8) -> Option<Severity> {
        match rank {
            0 => Some(Severity::Debug),
            1 => Some(Severity::Info),
            2 => Some(Severity::Warn),
            3 => Some(Severity::Error),
            _ => None,
        }
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(LoggerError::InvalidLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold gate deciding which calls are emitted.
///
/// Defaults to the most permissive threshold (`Debug`). `set_level` is the
/// only mutator; readers never observe a rank outside the scale.
#[derive(Debug)]
pub struct LevelFilter {
    threshold: AtomicU8,
}

impl LevelFilter {
    pub fn new() -> Self {
        Self {
            threshold: AtomicU8::new(Severity::Debug.rank()),
        }
    }

    /// Returns true iff `severity` is at or above the current threshold.
    pub fn permits(&self, severity: Severity) -> bool {
        severity.rank() >= self.threshold.load(Ordering::Relaxed)
    }

    /// Set the threshold by name. Fails with `InvalidLevel` on an unknown
    /// name and leaves the threshold unchanged.
    pub fn set_level(&self, name: &str) -> Result<(), LoggerError> {
        let level = Severity::from_str(name)?;
        self.threshold.store(level.rank(), Ordering::Relaxed);
        Ok(())
    }

    /// Current threshold.
    pub fn level(&self) -> Severity {
        let rank = self.threshold.load(Ordering::Relaxed);
        // Only set_level writes, and it writes valid ranks.
        Severity::from_rank(rank).expect("threshold holds a valid severity rank")
    }

    /// Canonical name whose numeric value equals the current threshold.
    pub fn level_name(&self) -> &'static str {
        self.level().as_str()
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    #[test]
    fn test_severity_ordering_is_monotonic() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_permits_all_sixteen_pairs() {
        for threshold in ALL {
            let filter = LevelFilter::new();
            filter.set_level(threshold.as_str()).unwrap();
            for severity in ALL {
                assert_eq!(
                    filter.permits(severity),
                    severity.rank() >= threshold.rank(),
                    "severity={severity} threshold={threshold}"
                );
            }
        }
    }

    #[test]
    fn test_set_level_round_trip() {
        let filter = LevelFilter::new();
        for name in ["debug", "info", "warn", "error"] {
            filter.set_level(name).unwrap();
            assert_eq!(filter.level_name(), name);
        }
    }

    #[test]
    fn test_set_level_rejects_unknown_and_keeps_threshold() {
        let filter = LevelFilter::new();
        filter.set_level("warn").unwrap();

        let err = filter.set_level("bogus").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(ref n) if n == "bogus"));
        assert_eq!(filter.level(), Severity::Warn);
    }

    #[test]
    fn test_default_threshold_is_debug() {
        let filter = LevelFilter::default();
        assert_eq!(filter.level(), Severity::Debug);
        assert!(filter.permits(Severity::Debug));
    }
}
