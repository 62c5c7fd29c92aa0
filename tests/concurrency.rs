#![allow(clippy::unwrap_used, clippy::expect_used)]

use levelog::{LogFlags, LogSink, Logger, MemorySink, NoopLogSink};
use std::{
    io,
    sync::{Arc, Barrier},
    thread,
};

const ADDERS: usize = 8;
const CHATTERS: usize = 4;
const CHATTER_CALLS: usize = 200;

struct Failing;

impl LogSink for Failing {
    fn write(&self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("closed"))
    }
}

#[test]
fn concurrent_adds_and_logs_keep_every_sink() {
    let primary = Arc::new(MemorySink::new());
    let logger = Arc::new(Logger::new(primary.clone(), ""));
    logger.set_flags(LogFlags::NONE);
    let barrier = Arc::new(Barrier::new(ADDERS + CHATTERS));

    let mut handles = Vec::new();
    for i in 0..ADDERS {
        let logger = Arc::clone(&logger);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let sink = Arc::new(MemorySink::new());
            let token = logger.add_sink(sink.clone(), "info");
            logger.error(&[&"adder", &i]);
            (token, sink)
        }));
    }

    let mut chatters = Vec::new();
    for i in 0..CHATTERS {
        let logger = Arc::clone(&logger);
        let barrier = Arc::clone(&barrier);
        chatters.push(thread::spawn(move || {
            barrier.wait();
            for n in 0..CHATTER_CALLS {
                logger.info(&[&"chatter", &i, &n]);
            }
        }));
    }

    let added: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for h in chatters {
        h.join().unwrap();
    }

    assert_eq!(logger.sink_count(), ADDERS);
    for (token, sink) in &added {
        assert!(logger.has_sink(token));
        // At least the adder's own error line reached its sink.
        assert!(sink.writes() >= 1);
        assert!(sink.lines().iter().all(|l| l.ends_with("\x1b[0m")));
    }
    assert_eq!(primary.lines().len(), ADDERS + CHATTERS * CHATTER_CALLS);
}

#[test]
fn concurrent_removal_and_eviction_do_not_conflict() {
    let logger = Arc::new(Logger::new(Arc::new(NoopLogSink), ""));
    let survivors: Vec<_> = (0..4)
        .map(|_| logger.add_sink(Arc::new(MemorySink::new()), "debug"))
        .collect();
    let doomed: Vec<_> = (0..16)
        .map(|_| logger.add_sink(Arc::new(Failing), "debug"))
        .collect();

    let mut handles = Vec::new();
    for chunk in doomed.chunks(4) {
        let logger = Arc::clone(&logger);
        let chunk = chunk.to_vec();
        handles.push(thread::spawn(move || {
            for token in &chunk {
                logger.info(&[&"tick"]);
                logger.remove_sink(token);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(logger.sink_count(), survivors.len());
    for token in &survivors {
        assert!(logger.has_sink(token));
    }
}

#[test]
fn set_writer_during_logging_loses_no_lines() {
    let first = Arc::new(MemorySink::new());
    let second = Arc::new(MemorySink::new());
    let logger = Arc::new(Logger::new(first.clone(), ""));

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for n in 0..500 {
                logger.info(&[&n]);
            }
        })
    };
    logger.set_writer(second.clone());
    writer.join().unwrap();

    assert_eq!(first.writes() + second.writes(), 500);
}
