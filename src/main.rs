//! `levelog` reads `<kind> <words...>` lines from stdin and logs them
//! through the process-wide logger.
//!
//! An optional config file path configures the logger (`[Logging]`) and
//! attaches file sinks (`[Sinks]`, one `path = level` line per file).

use std::{
    env,
    fs::OpenOptions,
    io::{self, BufRead, BufWriter},
    process,
    sync::Arc,
};

use levelog::{Config, LogError, LogKind, LogSink, WriterSink};

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = match args.len() {
        1 => Config::empty(),
        2 => Config::load(&args[1]).unwrap_or_else(|e| {
            eprintln!("Error loading config: {e}. Using empty config.");
            Config::empty()
        }),
        _ => {
            eprintln!("Usage:");
            eprintln!("  {}            # log stdin lines to stdout", args[0]);
            eprintln!("  {} [CONFIG]   # e.g. levelog.conf", args[0]);
            process::exit(2);
        }
    };

    if let Err(e) = configure(&config) {
        eprintln!("Invalid logging configuration: {e}");
        process::exit(2);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        pump_line(&line);
    }
}

fn configure(config: &Config) -> Result<(), LogError> {
    levelog::global::logger().configure(config)?;

    for (path, level) in config.section("Sinks") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::SinkOpen {
                path: path.to_owned(),
                source,
            })?;
        let sink: Arc<dyn LogSink> = Arc::new(WriterSink::new(BufWriter::new(file)));
        levelog::add_sink(sink, level);
    }
    Ok(())
}

fn pump_line(line: &str) {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else { return };

    match LogKind::from_name(first) {
        Some(kind) => {
            let rest: Vec<&str> = words.collect();
            let args: Vec<&dyn std::fmt::Display> =
                rest.iter().map(|w| w as &dyn std::fmt::Display).collect();
            levelog::global::logger().log(kind, &args);
        }
        None => levelog::info(&[&line]),
    }
}
