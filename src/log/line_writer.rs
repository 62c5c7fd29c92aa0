use std::{
    io,
    panic::Location,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::log::{log_flags::LogFlags, log_sink::LogSink};

/// Writes one line per call to a sink, prefixed with the configured
/// prefix, timestamp and source position.
///
/// # Line layout
///
/// `<prefix><date> <time>.<micros> <file>:<line>: <message>`
///
/// Each header field only appears when its flag is set. Timestamps are UTC.
#[derive(Clone)]
pub struct LineWriter {
    sink: Arc<dyn LogSink>,
    prefix: String,
    flags: LogFlags,
}

impl LineWriter {
    pub fn new(sink: Arc<dyn LogSink>, prefix: impl Into<String>, flags: LogFlags) -> Self {
        Self {
            sink,
            prefix: prefix.into(),
            flags,
        }
    }

    /// A writer for `sink` with this writer's prefix and flags.
    #[must_use]
    pub fn with_sink(&self, sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            prefix: self.prefix.clone(),
            flags: self.flags,
        }
    }

    #[must_use]
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    #[must_use]
    pub fn flags(&self) -> LogFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: LogFlags) {
        self.flags = flags;
    }

    /// Writes `msg` as one line attributed to `location`.
    ///
    /// The whole line goes to the sink in a single `write` call.
    ///
    /// # Errors
    ///
    /// Returns the sink's error, or `WriteZero` if the sink accepted fewer
    /// bytes than the line holds.
    pub fn output(&self, location: &Location<'_>, msg: &str) -> io::Result<()> {
        let line = self.render(SystemTime::now(), location, msg);
        let written = self.sink.write(line.as_bytes())?;
        if written < line.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {written} of {} bytes", line.len()),
            ));
        }
        Ok(())
    }

    fn render(&self, now: SystemTime, location: &Location<'_>, msg: &str) -> String {
        let mut line = String::with_capacity(self.prefix.len() + 48 + msg.len());
        line.push_str(&self.prefix);
        self.push_header(&mut line, now, location);
        line.push_str(msg);
        if !msg.ends_with('\n') {
            line.push('\n');
        }
        line
    }

    fn push_header(&self, line: &mut String, now: SystemTime, location: &Location<'_>) {
        let flags = self.flags;
        if flags.contains(LogFlags::DATE)
            || flags.contains(LogFlags::TIME)
            || flags.contains(LogFlags::MICROSECONDS)
        {
            let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
            let secs = since_epoch.as_secs();
            let tm = unix_to_utc(secs);

            if flags.contains(LogFlags::DATE) {
                match tm {
                    Ok(tm) => line.push_str(&format!(
                        "{:04}/{:02}/{:02} ",
                        tm.year, tm.mon, tm.day
                    )),
                    Err(_) => line.push_str(&format!("unix_{secs} ")), // year out of range
                }
            }
            if flags.contains(LogFlags::TIME) || flags.contains(LogFlags::MICROSECONDS) {
                let (hour, min, sec) = tm.map_or((0, 0, 0), |tm| (tm.hour, tm.min, tm.sec));
                line.push_str(&format!("{hour:02}:{min:02}:{sec:02}"));
                if flags.contains(LogFlags::MICROSECONDS) {
                    line.push_str(&format!(".{:06}", since_epoch.subsec_micros()));
                }
                line.push(' ');
            }
        }

        if flags.contains(LogFlags::SHORT_FILE) || flags.contains(LogFlags::LONG_FILE) {
            let file = location.file();
            let file = if flags.contains(LogFlags::SHORT_FILE) {
                file.rsplit(['/', '\\']).next().unwrap_or(file)
            } else {
                file
            };
            line.push_str(&format!("{file}:{}: ", location.line()));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SimpleUtc {
    year: i32,
    mon: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
}

#[derive(Clone, Copy, Debug)]
enum UtcConvError {
    Year,
    Month,
    Day,
}

/// Minimal UTC conversion (civil time, no leap seconds).
///
/// # Errors
///
/// Returns a [`UtcConvError`] if a calculated component does not fit its
/// integer type.
#[allow(clippy::many_single_char_names)]
fn unix_to_utc(mut s: u64) -> Result<SimpleUtc, UtcConvError> {
    let sec = (s % 60) as u32;
    s /= 60;
    let min = (s % 60) as u32;
    s /= 60;
    let hour = (s % 24) as u32;
    s /= 24;

    // Days since 0000-03-01; i128 holds any u64 day count.
    let z: i128 = i128::from(s) + 719_468;

    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = mp + if mp < 10 { 3 } else { -9 }; // [1, 12]

    let year_i = y + i128::from(m <= 2);

    let year = i32::try_from(year_i).map_err(|_| UtcConvError::Year)?;
    let mon = u32::try_from(m).map_err(|_| UtcConvError::Month)?;
    let day = u32::try_from(d).map_err(|_| UtcConvError::Day)?;

    Ok(SimpleUtc {
        year,
        mon,
        day,
        hour,
        min,
        sec,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::memory_sink::MemorySink;
    use std::time::Duration;

    struct ShortSink;

    impl LogSink for ShortSink {
        fn write(&self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len() / 2)
        }
    }

    // 2009-11-10 23:00:00.000123 UTC
    fn fixed_time() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_257_894_000) + Duration::from_micros(123)
    }

    fn writer(flags: LogFlags, prefix: &str) -> LineWriter {
        LineWriter::new(Arc::new(MemorySink::new()), prefix, flags)
    }

    #[test]
    fn unix_to_utc_known_dates() {
        let tm = unix_to_utc(0).unwrap();
        assert_eq!((tm.year, tm.mon, tm.day), (1970, 1, 1));

        let tm = unix_to_utc(1_257_894_000).unwrap();
        assert_eq!(
            tm,
            SimpleUtc {
                year: 2009,
                mon: 11,
                day: 10,
                hour: 23,
                min: 0,
                sec: 0
            }
        );

        // Leap day.
        let tm = unix_to_utc(951_782_400).unwrap();
        assert_eq!((tm.year, tm.mon, tm.day), (2000, 2, 29));
    }

    #[test]
    fn std_flags_render_date_and_time() {
        let w = writer(LogFlags::STD, "");
        let line = w.render(fixed_time(), Location::caller(), "hello");
        assert_eq!(line, "2009/11/10 23:00:00 hello\n");
    }

    #[test]
    fn microseconds_and_prefix() {
        let w = writer(LogFlags::TIME | LogFlags::MICROSECONDS, "app: ");
        let line = w.render(fixed_time(), Location::caller(), "x\n");
        assert_eq!(line, "app: 23:00:00.000123 x\n");
    }

    #[test]
    fn short_file_overrides_long_file() {
        let w = writer(LogFlags::SHORT_FILE | LogFlags::LONG_FILE, "");
        let here = Location::caller();
        let line = w.render(fixed_time(), here, "m");
        assert_eq!(line, format!("line_writer.rs:{}: m\n", here.line()));
    }

    #[test]
    fn long_file_keeps_full_path() {
        let w = writer(LogFlags::LONG_FILE, "");
        let here = Location::caller();
        let line = w.render(fixed_time(), here, "m");
        assert_eq!(line, format!("{}:{}: m\n", here.file(), here.line()));
    }

    #[test]
    fn output_writes_exactly_once() {
        let sink = Arc::new(MemorySink::new());
        let w = LineWriter::new(sink.clone(), "", LogFlags::NONE);
        w.output(Location::caller(), "a line").unwrap();
        assert_eq!(sink.writes(), 1);
        assert_eq!(sink.contents(), "a line\n");
    }

    #[test]
    fn short_write_is_an_error() {
        let w = LineWriter::new(Arc::new(ShortSink), "", LogFlags::NONE);
        let err = w.output(Location::caller(), "0123456789").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn with_sink_keeps_prefix_and_flags() {
        let w = writer(LogFlags::SHORT_FILE, "p ");
        let other = w.with_sink(Arc::new(MemorySink::new()));
        assert_eq!(other.prefix(), "p ");
        assert_eq!(other.flags(), LogFlags::SHORT_FILE);
    }
}
