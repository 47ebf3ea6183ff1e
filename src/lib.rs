//! logmux — leveled logging multiplexed between console and cloud sinks.
//!
//! # Architecture Overview
//!
//! ```text
//! caller / log::info! / HTTP middleware
//!         │
//!         ▼
//!   ┌──────────────┐     permits?     ┌─────────────┐
//!   │ LogDispatcher│ ───────────────▶ │ LevelFilter │
//!   └──────┬───────┘                  └─────────────┘
//!          │ permitted: format into LogRecord
//!          ▼
//!   ┌──────────────┐   DEPLOY_STAGE=dev/absent   ┌─────────────┐
//!   │  bound Sink  │ ──────────────────────────▶ │ ConsoleSink │
//!   │ (fixed once) │                             └─────────────┘
//!   │              │   any other stage           ┌─────────────┐
//!   │              │ ──────────────────────────▶ │  CloudSink  │──▶ transport
//!   └──────────────┘                             └─────────────┘
//! ```
//!
//! The dispatcher checks the level gate before any formatting, builds one
//! ephemeral record per permitted call, and routes it to the sink bound at
//! construction. Every logging call returns whether the record was emitted.
//!
//! Most programs call [`init`] once at startup and either hold the returned
//! `Arc<LogDispatcher>` or keep using the `log` crate macros, which route
//! through the same instance after init.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod global;
pub mod level;
pub mod middleware;
pub mod record;
pub mod sink;

pub use config::{DeployStage, LoggerConfig};
pub use dispatcher::LogDispatcher;
pub use error::LoggerError;
pub use global::{init, try_global};
pub use level::{LevelFilter, Severity};
pub use middleware::log_requests;
pub use record::{LogRecord, Payload};
pub use sink::{CloudSink, ConsoleSink, Sink};
