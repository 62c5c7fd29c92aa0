pub mod line_writer;
pub mod log_flags;
pub mod log_format;
pub mod log_kind;
pub mod log_level;
pub mod log_macros;
pub mod log_sink;
pub mod logger;
pub mod memory_sink;
pub mod noop_log_sink;
pub mod sink_registry;
pub use noop_log_sink::NoopLogSink;
