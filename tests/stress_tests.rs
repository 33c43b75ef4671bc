//! Stress tests for concurrent use of a shared logger
//!
//! These tests verify:
//! - Every record is written as one intact line under contention
//! - One-shot failure reports stay one-shot across threads
//! - Reconfiguration while logging never tears a record

use leveled_logger::prelude::*;
use parking_lot::Mutex;
use serde_json::Value;
use std::io::{self, Write};
use std::sync::{Arc, Barrier};
use std::thread;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("worker {0} failed")]
struct WorkerError(usize);

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

fn json_logger(buf: &SharedBuffer) -> Arc<Logger> {
    Arc::new(
        Logger::builder()
            .formatter(OutputFormat::Json)
            .output(buf.clone())
            .build(),
    )
}

fn run_workers<F>(logger: &Arc<Logger>, work: F)
where
    F: Fn(&Logger, usize, usize) + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            let work = Arc::clone(&work);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    work(&logger, t, i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

#[test]
fn test_concurrent_lines_are_intact() {
    let buf = SharedBuffer::default();
    let logger = json_logger(&buf);

    run_workers(&logger, |logger, t, i| {
        if i % 10 == 0 {
            logger.error(&WorkerError(t));
        } else {
            logger.info(&[&"thread ", &t, &" message ", &i]);
        }
    });

    let lines = buf.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in &lines {
        let record: Value = serde_json::from_str(line).expect("intact JSON line");
        assert!(record.get("level").is_some());
    }
    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().dropped_count(), 0);
}

#[test]
fn test_metadata_conflict_reported_once_across_threads() {
    let buf = SharedBuffer::default();
    let logger = json_logger(&buf);
    logger.set_metadata(Metadata::new().with_field("message", "clash"));
    logger.set_flatten_metadata(true);
    logger.set_capture_trace(false);

    run_workers(&logger, |logger, t, i| {
        logger.info(&[&t, &"-", &i]);
    });

    let reports = buf
        .lines()
        .iter()
        .filter(|line| line.contains("the key of metadata conflicted"))
        .count();
    assert_eq!(reports, 1);
    assert_eq!(logger.metrics().self_reports(), 1);
}

#[test]
fn test_format_failure_reported_once_across_threads() {
    let buf = SharedBuffer::default();
    let logger = json_logger(&buf);
    logger.set_formatter(|record: &Record| -> leveled_logger::Result<String> {
        if record.contains_key("message") {
            Err(LoggerError::formatter("stress", "refused"))
        } else {
            OutputFormat::Json.format(record)
        }
    });

    run_workers(&logger, |logger, _, i| {
        logger.info(&[&i]);
    });

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("FormatterError"));
    assert_eq!(logger.metrics().self_reports(), 1);
    assert_eq!(
        logger.metrics().dropped_count(),
        (THREADS * PER_THREAD) as u64
    );
}

#[test]
fn test_reconfigure_while_logging() {
    let buf = SharedBuffer::default();
    let logger = json_logger(&buf);

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..PER_THREAD {
                logger.set_metadata(Metadata::new().with_field("round", i as u64));
                logger.set_flatten_metadata(i % 2 == 0);
                logger.set_timestamp_format(if i % 3 == 0 {
                    TimestampFormat::UnixMillis
                } else {
                    TimestampFormat::Rfc3339
                });
            }
        })
    };

    run_workers(&logger, |logger, _, i| {
        logger.debug(&[&"tick ", &i]);
    });
    writer.join().expect("reconfiguring thread panicked");

    let lines = buf.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);
    for line in &lines {
        let record: Value = serde_json::from_str(line).expect("intact JSON line");
        assert_eq!(record["level"], "DEBUG");
        assert!(record.get("round").is_some() || record.get("meta").is_some());
    }
}
