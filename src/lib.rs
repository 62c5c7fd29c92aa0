//! Levelog is a leveled line logger with runtime-attachable secondary sinks.
//!
//! A single log call is filtered against a cumulative severity mask,
//! rendered once as a colorized line, written to the primary destination
//! and then fanned out to every registered sink whose own level admits it.
//! Sinks that fail are reported on the primary and detached.
//!
//! ```
//! use std::sync::Arc;
//! use levelog::{LogFlags, Logger, MemorySink};
//!
//! let out = Arc::new(MemorySink::new());
//! let logger = Logger::new(out.clone(), "");
//! logger.set_flags(LogFlags::NONE);
//!
//! let errors = Arc::new(MemorySink::new());
//! let token = logger.add_sink(errors.clone(), "error");
//! logger.info(&[&"starting"]);
//! logger.error(&[&"disk", &"full"]);
//! logger.remove_sink(&token);
//!
//! assert_eq!(out.lines().len(), 2);
//! assert_eq!(errors.lines(), vec!["\x1b[0;31m[error] disk full\x1b[0m"]);
//! ```

/// Handles configuration loading and management.
pub mod config;
/// Process-wide default logger and its free-function API.
pub mod global;
/// Leveled logging, formatting and sink fan-out.
pub mod log;
/// Errors raised while configuring loggers.
pub mod log_error;

pub use config::Config;
pub use global::{
    add_sink, debug, error, fatal, get_level, info, remove_sink, set_flags, set_level, set_prefix,
    set_writer, warn,
};
pub use log::{
    line_writer::LineWriter,
    log_flags::LogFlags,
    log_kind::LogKind,
    log_level::LogLevel,
    log_sink::{LogSink, StderrSink, StdoutSink, WriterSink},
    logger::{FATAL_EXIT_CODE, Logger},
    memory_sink::MemorySink,
    noop_log_sink::NoopLogSink,
    sink_registry::SinkToken,
};
pub use log_error::LogError;
