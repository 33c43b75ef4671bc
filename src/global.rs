//! Process-wide default logger
//!
//! The free functions in this module forward to a single lazily created
//! [`Logger`] with the default configuration. Setters change that instance in
//! place, so they are visible to every thread.

use crate::core::{Appender, Formatter, LogLevel, Logger, Metadata, TimestampFormat};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::sync::OnceLock;

static DEFAULT: OnceLock<Logger> = OnceLock::new();

/// The default logger, created on first use.
pub fn default_logger() -> &'static Logger {
    DEFAULT.get_or_init(Logger::new)
}

pub fn set_min_level(level: LogLevel) {
    default_logger().set_min_level(level);
}

pub fn set_formatter<F: Formatter + 'static>(formatter: F) {
    default_logger().set_formatter(formatter);
}

pub fn set_metadata(metadata: impl Into<Option<Metadata>>) {
    default_logger().set_metadata(metadata);
}

pub fn set_output<W: Write + Send + 'static>(writer: W) {
    default_logger().set_output(writer);
}

pub fn set_appender<A: Appender + 'static>(appender: A) {
    default_logger().set_appender(appender);
}

pub fn set_flatten_metadata(flatten: bool) {
    default_logger().set_flatten_metadata(flatten);
}

pub fn set_clock<F>(clock: F)
where
    F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
{
    default_logger().set_clock(clock);
}

pub fn set_capture_trace(capture: bool) {
    default_logger().set_capture_trace(capture);
}

pub fn set_timestamp_format(format: TimestampFormat) {
    default_logger().set_timestamp_format(format);
}

#[inline(never)]
pub fn debug(values: &[&dyn Display]) {
    default_logger().debug(values);
}

#[inline(never)]
pub fn info(values: &[&dyn Display]) {
    default_logger().info(values);
}

#[inline(never)]
pub fn warn(values: &[&dyn Display]) {
    default_logger().warn(values);
}

#[inline(never)]
pub fn warn_error(err: &(dyn Error + 'static), values: &[&dyn Display]) {
    default_logger().warn_error(err, values);
}

#[inline(never)]
pub fn error(err: &(dyn Error + 'static)) {
    default_logger().error(err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{fixed_clock, OutputFormat};
    use crate::test_util::SharedBuffer;
    use chrono::TimeZone;
    use parking_lot::{const_mutex, Mutex};
    use serde_json::{json, Value};

    // The default logger is shared by every test in this module.
    static SERIAL: Mutex<()> = const_mutex(());

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    fn capture_default() -> SharedBuffer {
        let buf = SharedBuffer::new();
        set_output(buf.clone());
        set_formatter(OutputFormat::Json);
        set_min_level(LogLevel::Debug);
        set_metadata(Metadata::new());
        set_flatten_metadata(false);
        set_capture_trace(true);
        set_timestamp_format(TimestampFormat::Rfc3339);
        let at = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).single().unwrap();
        let clock = fixed_clock(at);
        set_clock(move || clock());
        buf
    }

    fn records(buf: &SharedBuffer) -> Vec<Value> {
        buf.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_default_logger_is_shared() {
        let _guard = SERIAL.lock();
        assert!(std::ptr::eq(default_logger(), default_logger()));
    }

    #[test]
    fn test_facade_levels() {
        let _guard = SERIAL.lock();
        let buf = capture_default();

        debug(&[&"debug"]);
        info(&[&"info"]);
        warn(&[&"warn"]);
        warn_error(&DiskFull, &[&" on /var"]);
        error(&DiskFull);

        let records = records(&buf);
        assert_eq!(records.len(), 5);
        assert_eq!(records[0]["message"], json!("debug"));
        assert_eq!(records[0]["time"], json!("0001-01-01T00:00:00Z"));
        assert_eq!(records[1]["level"], json!("INFO"));
        assert_eq!(records[2]["level"], json!("WARN"));
        assert_eq!(records[3]["message"], json!("disk full on /var"));
        assert_eq!(records[4]["error"], json!("DiskFull: disk full"));
        assert!(records[4]["trace"].as_array().is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn test_facade_setters_apply_to_default() {
        let _guard = SERIAL.lock();
        let buf = capture_default();

        set_min_level(LogLevel::Warn);
        set_metadata(Metadata::new().with_field("service", "book"));
        set_flatten_metadata(true);
        set_capture_trace(false);

        info(&[&"hidden"]);
        warn(&[&"shown"]);

        let records = records(&buf);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["service"], json!("book"));
        assert!(records[0].get("trace").is_none());
        assert_eq!(default_logger().min_level(), LogLevel::Warn);

        capture_default();
    }
}
