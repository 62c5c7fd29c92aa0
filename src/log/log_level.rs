use std::fmt;

use crate::log::log_kind::LogKind;

/// Cumulative severity threshold.
///
/// Every named level is the previous (more severe) level plus one more kind,
/// so the masks grow monotonically with verbosity:
/// `NONE ⊂ FATAL ⊂ ERROR ⊂ WARN ⊂ INFO ⊂ DEBUG == ALL`.
///
/// A kind is enabled under a level iff its bit is contained in the mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LogLevel(u8);

impl LogLevel {
    /// Nothing is logged.
    pub const NONE: LogLevel = LogLevel(0);
    /// Only fatal lines.
    pub const FATAL: LogLevel = LogLevel(Self::NONE.0 | LogKind::Fatal.bits());
    /// Fatal and error lines.
    pub const ERROR: LogLevel = LogLevel(Self::FATAL.0 | LogKind::Error.bits());
    /// Fatal, error and warning lines.
    pub const WARN: LogLevel = LogLevel(Self::ERROR.0 | LogKind::Warn.bits());
    /// Everything except debug lines.
    pub const INFO: LogLevel = LogLevel(Self::WARN.0 | LogKind::Info.bits());
    /// Every kind.
    pub const DEBUG: LogLevel = LogLevel(Self::INFO.0 | LogKind::Debug.bits());
    pub const ALL: LogLevel = Self::DEBUG;

    /// Maps a level name to its cumulative level.
    ///
    /// Names are case-sensitive. Anything unrecognized, including the empty
    /// string, yields [`LogLevel::ALL`] so that a bad configuration never
    /// silences logging.
    pub fn parse(name: &str) -> LogLevel {
        match name {
            "fatal" => LogLevel::FATAL,
            "error" => LogLevel::ERROR,
            "warn" => LogLevel::WARN,
            "info" => LogLevel::INFO,
            "debug" => LogLevel::DEBUG,
            _ => LogLevel::ALL,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a level from a raw mask. Bits outside the known kinds are kept.
    #[inline]
    pub const fn from_bits(bits: u8) -> LogLevel {
        LogLevel(bits)
    }

    /// `true` when lines of `kind` pass this threshold.
    #[inline]
    pub const fn enables(self, kind: LogKind) -> bool {
        self.0 | kind.bits() == self.0
    }

    /// Canonical name of a named level, `None` for ad-hoc masks.
    pub const fn name(self) -> Option<&'static str> {
        match self {
            LogLevel::NONE => Some("none"),
            LogLevel::FATAL => Some("fatal"),
            LogLevel::ERROR => Some("error"),
            LogLevel::WARN => Some("warn"),
            LogLevel::INFO => Some("info"),
            LogLevel::DEBUG => Some("debug"),
            _ => None,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::ALL
    }
}

impl From<&str> for LogLevel {
    fn from(name: &str) -> Self {
        LogLevel::parse(name)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#04x}", self.0),
        }
    }
}
