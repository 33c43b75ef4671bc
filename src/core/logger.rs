//! Main logger implementation

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    formatter::Formatter,
    log_level::LogLevel,
    metadata::Metadata,
    metrics::LoggerMetrics,
    option::{LoggerBuilder, LoggerConfig, LoggerOption},
    stack_trace::StackTrace,
    timestamp::{Clock, TimestampFormat},
    traced_error::{own_trace, root_cause},
    Record,
};
use crate::appenders::WriterAppender;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::error::Error;
use std::fmt::{self, Display, Write as _};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const MESSAGE_KEY: &str = "message";
pub const ERROR_KEY: &str = "error";
pub const TRACE_KEY: &str = "trace";

/// Frames between `StackTrace::capture` and the caller of a level method:
/// `trace_for`, the record builder and the public level method.
const PIPELINE_FRAMES: usize = 3;

/// A leveled, structured logger.
///
/// Every call runs synchronously: level gate, record assembly, metadata
/// merge, formatting and one line written to the appender. Logging never
/// returns an error to the caller. A metadata key collision or a formatter
/// failure is reported once as an Error-level record; both conditions set a
/// sticky flag that stays set for the lifetime of the logger, which is what
/// stops the self-report from recursing.
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .formatter(OutputFormat::Json)
///     .output(Vec::new())
///     .build();
///
/// logger.debug(&[&"hidden"]);
/// logger.info(&[&"user ", &42, &" signed in"]);
/// assert_eq!(logger.metrics().total_logged(), 1);
/// ```
pub struct Logger {
    min_level: RwLock<LogLevel>,
    formatter: RwLock<Arc<dyn Formatter>>,
    appender: Mutex<Box<dyn Appender>>,
    metadata: RwLock<Option<Metadata>>,
    flatten_metadata: AtomicBool,
    capture_trace: AtomicBool,
    clock: RwLock<Clock>,
    timestamp_format: RwLock<TimestampFormat>,
    /// Once set, flattening is skipped and metadata is nested instead.
    merge_failed: AtomicBool,
    /// Once set, formatter failures are dropped without a report.
    format_failed: AtomicBool,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with the default configuration: Debug level, pretty JSON,
    /// stdout, empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    /// Apply `options` in order to the default configuration.
    #[must_use]
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        let config = options
            .into_iter()
            .fold(LoggerConfig::default(), |config, option| option.apply(config));
        Self::from_config(config)
    }

    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            min_level: RwLock::new(config.min_level),
            formatter: RwLock::new(config.formatter),
            appender: Mutex::new(config.appender),
            metadata: RwLock::new(config.metadata),
            flatten_metadata: AtomicBool::new(config.flatten_metadata),
            capture_trace: AtomicBool::new(config.capture_trace),
            clock: RwLock::new(config.clock),
            timestamp_format: RwLock::new(config.timestamp_format),
            merge_failed: AtomicBool::new(false),
            format_failed: AtomicBool::new(false),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        *self.formatter.write() = Arc::new(formatter);
    }

    /// Replace the metadata; `None` removes it from subsequent records.
    pub fn set_metadata(&self, metadata: impl Into<Option<Metadata>>) {
        *self.metadata.write() = metadata.into();
    }

    pub fn set_output<W: Write + Send + 'static>(&self, writer: W) {
        self.set_appender(WriterAppender::new(writer));
    }

    pub fn set_appender<A: Appender + 'static>(&self, appender: A) {
        let previous = std::mem::replace(&mut *self.appender.lock(), Box::new(appender));
        drop(previous);
    }

    pub fn set_flatten_metadata(&self, flatten: bool) {
        self.flatten_metadata.store(flatten, Ordering::Release);
    }

    pub fn set_clock<F>(&self, clock: F)
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        *self.clock.write() = Arc::new(clock);
    }

    pub fn set_capture_trace(&self, capture: bool) {
        self.capture_trace.store(capture, Ordering::Release);
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        *self.timestamp_format.write() = format;
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level.read().clone()
    }

    pub fn metadata(&self) -> Option<Metadata> {
        self.metadata.read().clone()
    }

    pub fn flatten_metadata(&self) -> bool {
        self.flatten_metadata.load(Ordering::Acquire)
    }

    pub fn capture_trace(&self) -> bool {
        self.capture_trace.load(Ordering::Acquire)
    }

    pub fn formatter_name(&self) -> String {
        self.formatter.read().name().to_string()
    }

    pub fn appender_name(&self) -> String {
        self.appender.lock().name().to_string()
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamp_format.read().clone()
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    /// True if a record at `level` passes the minimum level.
    pub fn enabled(&self, level: &LogLevel) -> bool {
        !level.less_than(&self.min_level.read())
    }

    /// Log the concatenation of `values` at Debug level.
    ///
    /// Nothing is written when `values` is empty.
    #[inline(never)]
    pub fn debug(&self, values: &[&dyn Display]) {
        if !self.enabled(&LogLevel::Debug) || values.is_empty() {
            return;
        }
        self.message_record(LogLevel::Debug, values);
    }

    /// Log the concatenation of `values` at Info level.
    ///
    /// Nothing is written when `values` is empty.
    #[inline(never)]
    pub fn info(&self, values: &[&dyn Display]) {
        if !self.enabled(&LogLevel::Info) || values.is_empty() {
            return;
        }
        self.message_record(LogLevel::Info, values);
    }

    /// Log the concatenation of `values` at Warn level with a stack trace of
    /// the call site.
    #[inline(never)]
    pub fn warn(&self, values: &[&dyn Display]) {
        if !self.enabled(&LogLevel::Warn) || values.is_empty() {
            return;
        }
        self.warn_record(concat(values), None);
    }

    /// Log `err` followed by `values` at Warn level.
    ///
    /// The message is the error's display form with the values appended.
    /// A [`TracedError`](super::TracedError) contributes its own stack
    /// trace; any other error gets the trace of the call site.
    #[inline(never)]
    pub fn warn_error(&self, err: &(dyn Error + 'static), values: &[&dyn Display]) {
        if !self.enabled(&LogLevel::Warn) {
            return;
        }
        let mut message = err.to_string();
        message.push_str(&concat(values));
        self.warn_record(message, own_trace(err));
    }

    /// Log the root cause of `err` at Error level.
    ///
    /// The `error` field reads `"<type>: <message>"` for the innermost error
    /// of the `source` chain. The trace is the one carried by `err` when it
    /// is a [`TracedError`](super::TracedError), otherwise the call site's.
    #[inline(never)]
    pub fn error(&self, err: &(dyn Error + 'static)) {
        if !self.enabled(&LogLevel::Error) {
            return;
        }
        self.error_record(err);
    }

    /// Like [`error`](Self::error); `None` logs nothing.
    #[inline(never)]
    pub fn error_opt(&self, err: Option<&(dyn Error + 'static)>) {
        if let Some(err) = err {
            if self.enabled(&LogLevel::Error) {
                self.error_record(err);
            }
        }
    }

    fn message_record(&self, level: LogLevel, values: &[&dyn Display]) {
        let mut record = self.new_record(level);
        record.insert(MESSAGE_KEY.to_string(), Value::String(concat(values)));
        self.emit(record);
    }

    #[inline(never)]
    fn warn_record(&self, message: String, own: Option<&StackTrace>) {
        let mut record = self.new_record(LogLevel::Warn);
        if let Some(trace) = self.trace_for(own) {
            record.insert(TRACE_KEY.to_string(), trace.to_json_value());
        }
        record.insert(MESSAGE_KEY.to_string(), Value::String(message));
        self.emit(record);
    }

    #[inline(never)]
    fn error_record(&self, err: &(dyn Error + 'static)) {
        let mut record = self.new_record(LogLevel::Error);
        if let Some(trace) = self.trace_for(own_trace(err)) {
            record.insert(TRACE_KEY.to_string(), trace.to_json_value());
        }
        let (root, type_name) = root_cause(err);
        record.insert(
            ERROR_KEY.to_string(),
            Value::String(format!("{}: {}", type_name, root)),
        );
        self.emit(record);
    }

    #[inline(never)]
    fn trace_for(&self, own: Option<&StackTrace>) -> Option<StackTrace> {
        if !self.capture_trace() {
            return None;
        }
        match own {
            Some(trace) => Some(trace.clone()),
            None => Some(StackTrace::capture(PIPELINE_FRAMES)),
        }
    }

    fn new_record(&self, level: LogLevel) -> Record {
        let clock = Arc::clone(&self.clock.read());
        let now = clock();

        let mut record = Record::new();
        record.insert(LEVEL_KEY.to_string(), Value::String(level.to_string()));
        record.insert(
            TIME_KEY.to_string(),
            self.timestamp_format.read().to_json_value(&now),
        );
        record
    }

    /// Merge metadata, format and write one record.
    fn emit(&self, mut record: Record) {
        let metadata = self.metadata.read().clone();

        if self.flatten_metadata() && !self.merge_failed.load(Ordering::Acquire) {
            if let Some(metadata) = metadata {
                if let Err(err) = metadata.flatten_into(&mut record) {
                    self.metrics.record_dropped();
                    if !self.merge_failed.swap(true, Ordering::AcqRel) {
                        self.report_failure(&err);
                    }
                    return;
                }
            }
        } else if let Some(metadata) = metadata {
            metadata.nest_into(&mut record);
        }

        let formatter = Arc::clone(&self.formatter.read());
        let line = match formatter.format(&record) {
            Ok(line) => line,
            Err(err) => {
                self.metrics.record_dropped();
                if !self.format_failed.swap(true, Ordering::AcqRel) {
                    self.report_failure(&err);
                }
                return;
            }
        };

        self.write_line(&line);
    }

    fn report_failure(&self, err: &LoggerError) {
        self.metrics.record_self_report();
        self.error(err);
    }

    /// Write with per-call panic isolation so a misbehaving appender cannot
    /// unwind into the caller.
    fn write_line(&self, line: &str) {
        let mut appender = self.appender.lock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(line)?;
            appender.flush()
        }));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(e)) => {
                self.metrics.record_write_error();
                self.metrics.record_dropped();
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
            }
            Err(panic_info) => {
                self.metrics.record_write_error();
                self.metrics.record_dropped();
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    appender.name(),
                    panic_msg
                );
            }
        }
    }
}

fn concat(values: &[&dyn Display]) -> String {
    let mut message = String::new();
    for value in values {
        // Writing into a String cannot fail.
        let _ = write!(message, "{}", value);
    }
    message
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &*self.min_level.read())
            .field("formatter", &self.formatter_name())
            .field("metadata", &*self.metadata.read())
            .field("flatten_metadata", &self.flatten_metadata())
            .field("capture_trace", &self.capture_trace())
            .field("merge_failed", &self.merge_failed.load(Ordering::Relaxed))
            .field("format_failed", &self.format_failed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
