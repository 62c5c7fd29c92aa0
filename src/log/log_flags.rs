use std::ops::{BitOr, BitOrAssign};

use crate::log_error::LogError;

/// Header fields a [`LineWriter`](crate::log::line_writer::LineWriter) puts
/// in front of each line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct LogFlags(u8);

impl LogFlags {
    pub const NONE: LogFlags = LogFlags(0);
    /// `2009/01/23`
    pub const DATE: LogFlags = LogFlags(0x01);
    /// `01:23:23`
    pub const TIME: LogFlags = LogFlags(0x02);
    /// `01:23:23.123123`, implies TIME.
    pub const MICROSECONDS: LogFlags = LogFlags(0x04);
    /// Full source path and line: `/a/b/c/main.rs:23`
    pub const LONG_FILE: LogFlags = LogFlags(0x08);
    /// Final path element and line: `main.rs:23`. Overrides LONG_FILE.
    pub const SHORT_FILE: LogFlags = LogFlags(0x10);
    /// Initial values for a new logger.
    pub const STD: LogFlags = LogFlags(Self::DATE.0 | Self::TIME.0);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> LogFlags {
        LogFlags(bits)
    }

    #[inline]
    pub const fn contains(self, other: LogFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parses a comma separated list such as `"date,time,shortfile"`.
    ///
    /// `std` expands to `date,time`; `none` or an empty list yields no flags.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnknownFlag`] on the first unrecognized name.
    pub fn parse(list: &str) -> Result<LogFlags, LogError> {
        let mut flags = LogFlags::NONE;
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            flags |= match name {
                "date" => LogFlags::DATE,
                "time" => LogFlags::TIME,
                "microseconds" => LogFlags::MICROSECONDS,
                "longfile" => LogFlags::LONG_FILE,
                "shortfile" => LogFlags::SHORT_FILE,
                "std" => LogFlags::STD,
                "none" => LogFlags::NONE,
                other => return Err(LogError::UnknownFlag(other.to_owned())),
            };
        }
        Ok(flags)
    }
}

impl BitOr for LogFlags {
    type Output = LogFlags;

    fn bitor(self, rhs: LogFlags) -> LogFlags {
        LogFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LogFlags {
    fn bitor_assign(&mut self, rhs: LogFlags) {
        self.0 |= rhs.0;
    }
}
