//! Leveled logging macros for a [`Logger`](crate::log::logger::Logger)
//! instance (`logger_info!(logger, ...)`) and for the process-wide default
//! logger (`info!(...)`).
//!
//! Arguments are any `Display` values, separated by commas; they are
//! rendered space-joined: `info!("user", id, "logged in")`.
//!
//! # Feature Flags
//! Levels below the compiled ceiling are controlled by cargo features:
//! `log-debug`, `log-info`, `log-warn`, `log-error`.
//!
//! If a feature is disabled, the corresponding macros expand to `()` and
//! their arguments are never evaluated. Fatal macros are always compiled.

// ============================================================================
// 1. GENERIC MACROS
// ============================================================================

#[macro_export]
macro_rules! logger_log {
    ($logger:expr, $kind:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($kind, &[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! global_log {
    ($kind:expr $(, $arg:expr)* $(,)?) => {
        $crate::logger_log!($crate::global::logger(), $kind $(, $arg)*)
    };
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS (Feature Gated)
// ============================================================================

// ---------------------- FATAL ----------------------
#[macro_export]
macro_rules! logger_fatal { ($logger:expr $(, $arg:expr)* $(,)?) => { $crate::logger_log!($logger, $crate::log::log_kind::LogKind::Fatal $(, $arg)*) } }
#[macro_export]
macro_rules! fatal        { ($($arg:expr),* $(,)?)               => { $crate::global_log!($crate::log::log_kind::LogKind::Fatal $(, $arg)*) } }

// ---------------------- ERROR ----------------------
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! logger_error { ($logger:expr $(, $arg:expr)* $(,)?) => { $crate::logger_log!($logger, $crate::log::log_kind::LogKind::Error $(, $arg)*) } }
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! error        { ($($arg:expr),* $(,)?)               => { $crate::global_log!($crate::log::log_kind::LogKind::Error $(, $arg)*) } }

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! logger_error {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARN ----------------------
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! logger_warn { ($logger:expr $(, $arg:expr)* $(,)?) => { $crate::logger_log!($logger, $crate::log::log_kind::LogKind::Warn $(, $arg)*) } }
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! warn        { ($($arg:expr),* $(,)?)               => { $crate::global_log!($crate::log::log_kind::LogKind::Warn $(, $arg)*) } }

#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! logger_warn {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! logger_info { ($logger:expr $(, $arg:expr)* $(,)?) => { $crate::logger_log!($logger, $crate::log::log_kind::LogKind::Info $(, $arg)*) } }
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! info        { ($($arg:expr),* $(,)?)               => { $crate::global_log!($crate::log::log_kind::LogKind::Info $(, $arg)*) } }

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! logger_info {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! logger_debug { ($logger:expr $(, $arg:expr)* $(,)?) => { $crate::logger_log!($logger, $crate::log::log_kind::LogKind::Debug $(, $arg)*) } }
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! debug        { ($($arg:expr),* $(,)?)               => { $crate::global_log!($crate::log::log_kind::LogKind::Debug $(, $arg)*) } }

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! logger_debug {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(all(test, feature = "log-debug"))]
mod tests {
    use crate::log::{log_flags::LogFlags, logger::Logger, memory_sink::MemorySink};
    use std::sync::Arc;

    #[test]
    fn instance_macros_join_arguments() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(sink.clone(), "");
        logger.set_flags(LogFlags::NONE);

        let user = "ana";
        crate::logger_info!(logger, "user", user, "has", 3, "sessions");
        crate::logger_debug!(&logger, format!("{}ms", 25));
        crate::logger_warn!(logger);

        assert_eq!(
            sink.lines(),
            vec![
                "\x1b[0;37m[info] user ana has 3 sessions\x1b[0m",
                "\x1b[0;36m[debug] 25ms\x1b[0m",
                "\x1b[0;33m[warning] \x1b[0m",
            ]
        );
    }

    #[test]
    fn instance_macros_attribute_call_site() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(sink.clone(), "");
        logger.set_flags(LogFlags::SHORT_FILE);

        let line = line!() + 1;
        crate::logger_error!(logger, "here");

        assert!(sink.contents().starts_with(&format!("log_macros.rs:{line}: ")));
    }
}
