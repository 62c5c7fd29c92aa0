use crate::{
    config::Config,
    log::{
        line_writer::LineWriter,
        log_flags::LogFlags,
        log_format::format_line,
        log_kind::LogKind,
        log_level::LogLevel,
        log_sink::{LogSink, StdoutSink},
        sink_registry::{SinkEntry, SinkRegistry, SinkToken},
    },
    log_error::LogError,
};

use std::{
    fmt,
    panic::Location,
    process,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicU8, Ordering},
    },
};

/// Exit status used after a fatal line has been written.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Config section read by [`Logger::configure`].
const CONFIG_SECTION: &str = "Logging";

/// Leveled logger with a primary destination and runtime-attachable
/// secondary sinks.
///
/// # Dispatch
///
/// For every call:
/// 1. **Filter**: kinds outside the current level return before any work.
/// 2. **Format**: the line is rendered once; every destination gets the same bytes.
/// 3. **Primary**: the line is written to the primary writer.
/// 4. **Fan-out**: every registered sink whose own level admits the kind
///    receives the line. Failing sinks are reported on the primary and
///    collected.
/// 5. **Evict**: collected sinks are removed after the pass.
///
/// `fatal` terminates the process once all five steps are done.
///
/// Instances are independent; the crate-level free functions forward to a
/// process-wide default instance.
pub struct Logger {
    primary: RwLock<LineWriter>,
    level: AtomicU8,
    sinks: SinkRegistry,
}

impl Logger {
    /// Creates a logger writing to `sink` with level ALL and standard flags.
    pub fn new(sink: Arc<dyn LogSink>, prefix: impl Into<String>) -> Self {
        Self {
            primary: RwLock::new(LineWriter::new(sink, prefix, LogFlags::STD)),
            level: AtomicU8::new(LogLevel::ALL.bits()),
            sinks: SinkRegistry::new(),
        }
    }

    /// Creates a logger writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink), "")
    }

    /// Creates a logger writing to `sink`, configured through
    /// [`configure`](Self::configure).
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnknownFlag`] if `flags` names an unknown flag.
    pub fn from_config(config: &Config, sink: Arc<dyn LogSink>) -> Result<Self, LogError> {
        let logger = Self::new(sink, "");
        logger.configure(config)?;
        Ok(logger)
    }

    /// Applies the `[Logging]` section of `config`.
    ///
    /// Recognized keys: `level` (level name, unknown names mean ALL),
    /// `flags` (comma list, see [`LogFlags::parse`]) and `prefix`. A `prefix`
    /// outside any section is used when `[Logging]` has none. Missing keys
    /// leave the current setting alone.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnknownFlag`] if `flags` names an unknown flag.
    /// Nothing is changed in that case.
    pub fn configure(&self, config: &Config) -> Result<(), LogError> {
        let flags = config
            .get(CONFIG_SECTION, "flags")
            .map(LogFlags::parse)
            .transpose()?;

        if let Some(level) = config.get(CONFIG_SECTION, "level") {
            self.set_level(level);
        }
        if let Some(flags) = flags {
            self.set_flags(flags);
        }
        if let Some(prefix) = config
            .get(CONFIG_SECTION, "prefix")
            .or_else(|| config.get_global("prefix"))
        {
            self.set_prefix(prefix);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Sets the threshold from a level name; unknown names mean ALL.
    pub fn set_level(&self, name: &str) {
        self.set_log_level(LogLevel::parse(name));
    }

    pub fn set_log_level(&self, level: LogLevel) {
        self.level.store(level.bits(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_bits(self.level.load(Ordering::Relaxed))
    }

    /// Swaps the primary destination, keeping prefix and flags.
    pub fn set_writer(&self, sink: Arc<dyn LogSink>) {
        let mut primary = self.primary.write().unwrap_or_else(PoisonError::into_inner);
        *primary = primary.with_sink(sink);
    }

    pub fn set_flags(&self, flags: LogFlags) {
        self.primary
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_flags(flags);
    }

    #[must_use]
    pub fn flags(&self) -> LogFlags {
        self.primary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .flags()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.primary
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_prefix(prefix);
    }

    #[must_use]
    pub fn prefix(&self) -> String {
        self.primary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .prefix()
            .to_owned()
    }

    /// A copy of the primary line writer, for output that should bypass
    /// leveling and fan-out.
    #[must_use]
    pub fn primary_writer(&self) -> LineWriter {
        self.primary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ------------------------------------------------------------------
    // Secondary sinks
    // ------------------------------------------------------------------

    /// Registers `sink` with its own threshold parsed from `level_name`
    /// (unknown names mean ALL). The sink gets the primary's current prefix
    /// and flags.
    ///
    /// Returns the token to pass to [`remove_sink`](Self::remove_sink).
    pub fn add_sink(&self, sink: Arc<dyn LogSink>, level_name: &str) -> SinkToken {
        self.add_sink_with_level(sink, LogLevel::parse(level_name))
    }

    /// Registers `sink` at an explicit level.
    pub fn add_sink_with_level(&self, sink: Arc<dyn LogSink>, level: LogLevel) -> SinkToken {
        let writer = self
            .primary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .with_sink(sink);
        self.sinks.insert(SinkEntry::new(writer, level))
    }

    /// Registers `sink` at this logger's current level.
    pub fn add_sink_inherit(&self, sink: Arc<dyn LogSink>) -> SinkToken {
        self.add_sink_with_level(sink, self.level())
    }

    /// Detaches a sink. Unknown or already removed tokens are ignored.
    pub fn remove_sink(&self, token: &SinkToken) {
        self.sinks.remove(token);
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn has_sink(&self, token: &SinkToken) -> bool {
        self.sinks.contains(token)
    }

    // ------------------------------------------------------------------
    // Logging
    // ------------------------------------------------------------------

    /// Logs `args` at `kind`. A `Fatal` kind that passes the level filter
    /// exits the process after dispatch.
    #[track_caller]
    pub fn log(&self, kind: LogKind, args: &[&dyn fmt::Display]) {
        let location = Location::caller();
        if self.dispatch(kind, args, location) && kind == LogKind::Fatal {
            process::exit(FATAL_EXIT_CODE);
        }
    }

    /// Logs at FATAL and exits with [`FATAL_EXIT_CODE`], unless FATAL is
    /// filtered out by the current level.
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn fmt::Display]) {
        self.log(LogKind::Fatal, args);
    }

    #[track_caller]
    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.log(LogKind::Error, args);
    }

    #[track_caller]
    pub fn warn(&self, args: &[&dyn fmt::Display]) {
        self.log(LogKind::Warn, args);
    }

    #[track_caller]
    pub fn info(&self, args: &[&dyn fmt::Display]) {
        self.log(LogKind::Info, args);
    }

    #[track_caller]
    pub fn debug(&self, args: &[&dyn fmt::Display]) {
        self.log(LogKind::Debug, args);
    }

    /// Filter, format once, write primary, fan out, evict.
    ///
    /// Returns `false` when the kind was filtered out by the global level.
    fn dispatch(&self, kind: LogKind, args: &[&dyn fmt::Display], location: &Location<'_>) -> bool {
        if !self.level().enables(kind) {
            return false;
        }

        let line = format_line(kind, args);
        let primary = self.primary.read().unwrap_or_else(PoisonError::into_inner);

        if let Err(err) = primary.output(location, &line) {
            // Best effort: the primary is its own only fallback.
            let _ = primary.output(
                location,
                &format_line(LogKind::Error, &[&"Error when write log to primary:", &err]),
            );
        }

        let mut failed = Vec::new();
        {
            let sinks = self.sinks.read();
            for (token, entry) in sinks.iter() {
                if !entry.level.enables(kind) {
                    continue;
                }
                let result = entry
                    .writer
                    .output(location, &line)
                    .and_then(|()| entry.writer.sink().flush());
                if let Err(err) = result {
                    let _ = primary.output(
                        location,
                        &format_line(
                            LogKind::Error,
                            &[&"Error when write log to trace sink:", &err],
                        ),
                    );
                    failed.push(token.clone());
                }
            }
        }
        drop(primary);

        self.sinks.remove_all(&failed);
        true
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::stdout()
    }
}
