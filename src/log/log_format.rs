use std::fmt::{self, Write};

use crate::log::log_kind::{self, LogKind};

const ESC: &str = "\x1b[";
/// Escape that resets all terminal attributes.
pub const RESET: &str = "\x1b[0m";

/// Renders one colorized log line:
/// `ESC[<color>m[<label>] <arg> <arg> ...ESC[0m\n`.
///
/// Arguments are rendered with `Display` and joined with single spaces.
pub fn format_line(kind: LogKind, args: &[&dyn fmt::Display]) -> String {
    format_line_bits(kind.bits(), args)
}

/// Same as [`format_line`] for raw kind bits; unknown bits get the
/// `unknown` label.
pub fn format_line_bits(bits: u8, args: &[&dyn fmt::Display]) -> String {
    let (label, color) = log_kind::label_and_color(bits);
    let mut line = String::with_capacity(32 + 16 * args.len());
    line.push_str(ESC);
    line.push_str(color);
    line.push_str("m[");
    line.push_str(label);
    line.push_str("] ");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(line, "{arg}");
    }
    line.push_str(RESET);
    line.push('\n');
    line
}
