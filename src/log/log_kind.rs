use std::fmt;

/// ANSI color used for kinds without a dedicated color.
pub const NEUTRAL_COLOR: &str = "0;37";

/// A single log importance category.
///
/// Each kind owns exactly one bit, so kinds can be combined into a
/// [`LogLevel`](crate::log::log_level::LogLevel) mask.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// Unrecoverable condition; the process exits after the line is written.
    Fatal = 0x01,
    /// Error events that might still allow the application to continue running.
    Error = 0x02,
    /// Potentially harmful situations.
    Warn = 0x04,
    /// Coarse-grained progress messages.
    Info = 0x08,
    /// Fine-grained events that are mostly useful while debugging.
    Debug = 0x10,
}

impl LogKind {
    /// All kinds, most severe first.
    pub const ALL: [LogKind; 5] = [
        LogKind::Fatal,
        LogKind::Error,
        LogKind::Warn,
        LogKind::Info,
        LogKind::Debug,
    ];

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the kind owning exactly `bits`, if any.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0x01 => Some(LogKind::Fatal),
            0x02 => Some(LogKind::Error),
            0x04 => Some(LogKind::Warn),
            0x08 => Some(LogKind::Info),
            0x10 => Some(LogKind::Debug),
            _ => None,
        }
    }

    /// Maps a kind name (`"info"`, `"warn"`, ...) to its kind. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fatal" => Some(LogKind::Fatal),
            "error" => Some(LogKind::Error),
            "warn" => Some(LogKind::Warn),
            "info" => Some(LogKind::Info),
            "debug" => Some(LogKind::Debug),
            _ => None,
        }
    }

    /// Label and ANSI color code rendered in front of every line of this kind.
    #[inline]
    pub const fn label_and_color(self) -> (&'static str, &'static str) {
        label_and_color(self.bits())
    }
}

/// Total mapping from raw kind bits to `(label, color)`.
///
/// Bits that do not name exactly one kind map to `("unknown", NEUTRAL_COLOR)`.
pub const fn label_and_color(bits: u8) -> (&'static str, &'static str) {
    match LogKind::from_bits(bits) {
        Some(LogKind::Fatal) => ("fatal", "0;31"),
        Some(LogKind::Error) => ("error", "0;31"),
        Some(LogKind::Warn) => ("warning", "0;33"),
        Some(LogKind::Info) => ("info", NEUTRAL_COLOR),
        Some(LogKind::Debug) => ("debug", "0;36"),
        None => ("unknown", NEUTRAL_COLOR),
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_and_color().0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_distinct_and_non_zero() {
        let mut seen = 0u8;
        for kind in LogKind::ALL {
            assert_ne!(kind.bits(), 0);
            assert_eq!(seen & kind.bits(), 0, "{kind:?} shares a bit");
            assert_eq!(kind.bits().count_ones(), 1);
            seen |= kind.bits();
        }
    }

    #[test]
    fn from_bits_inverts_bits() {
        for kind in LogKind::ALL {
            assert_eq!(LogKind::from_bits(kind.bits()), Some(kind));
        }
        assert_eq!(LogKind::from_bits(0), None);
        assert_eq!(LogKind::from_bits(0x03), None);
        assert_eq!(LogKind::from_bits(0x80), None);
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(LogKind::Fatal.label_and_color(), ("fatal", "0;31"));
        assert_eq!(LogKind::Error.label_and_color(), ("error", "0;31"));
        assert_eq!(LogKind::Warn.label_and_color(), ("warning", "0;33"));
        assert_eq!(LogKind::Info.label_and_color(), ("info", "0;37"));
        assert_eq!(LogKind::Debug.label_and_color(), ("debug", "0;36"));
    }

    #[test]
    fn unknown_bits_get_neutral_label() {
        assert_eq!(label_and_color(0x20), ("unknown", NEUTRAL_COLOR));
        assert_eq!(label_and_color(0), ("unknown", NEUTRAL_COLOR));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(LogKind::from_name("warn"), Some(LogKind::Warn));
        assert_eq!(LogKind::from_name("WARN"), None);
        assert_eq!(LogKind::from_name(""), None);
    }
}
