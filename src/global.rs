//! Process-wide default logger and free functions forwarding to it.
//!
//! The default logger writes to standard output with level ALL and
//! standard flags. It lives for the whole process and is never torn down.

use std::{fmt, sync::Arc, sync::LazyLock};

use crate::log::{
    log_flags::LogFlags, log_level::LogLevel, log_sink::LogSink, logger::Logger,
    sink_registry::SinkToken,
};

static DEFAULT_LOGGER: LazyLock<Logger> = LazyLock::new(Logger::stdout);

/// The process-wide default logger.
pub fn logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

pub fn set_level(name: &str) {
    logger().set_level(name);
}

pub fn get_level() -> LogLevel {
    logger().level()
}

pub fn set_writer(sink: Arc<dyn LogSink>) {
    logger().set_writer(sink);
}

pub fn set_flags(flags: LogFlags) {
    logger().set_flags(flags);
}

pub fn set_prefix(prefix: impl Into<String>) {
    logger().set_prefix(prefix);
}

pub fn add_sink(sink: Arc<dyn LogSink>, level_name: &str) -> SinkToken {
    logger().add_sink(sink, level_name)
}

pub fn remove_sink(token: &SinkToken) {
    logger().remove_sink(token);
}

#[track_caller]
pub fn fatal(args: &[&dyn fmt::Display]) {
    logger().fatal(args);
}

#[track_caller]
pub fn error(args: &[&dyn fmt::Display]) {
    logger().error(args);
}

#[track_caller]
pub fn warn(args: &[&dyn fmt::Display]) {
    logger().warn(args);
}

#[track_caller]
pub fn info(args: &[&dyn fmt::Display]) {
    logger().info(args);
}

#[track_caller]
pub fn debug(args: &[&dyn fmt::Display]) {
    logger().debug(args);
}
