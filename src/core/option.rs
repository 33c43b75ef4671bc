//! Logger configuration
//!
//! A logger is configured by applying an ordered list of [`LoggerOption`]s
//! to a fresh [`LoggerConfig::default`]. Each option sets exactly one field;
//! when two options touch the same field the last one wins.

use super::{
    appender::Appender,
    formatter::{Formatter, OutputFormat},
    log_level::LogLevel,
    logger::Logger,
    metadata::Metadata,
    timestamp::{system_clock, Clock, TimestampFormat},
};
use crate::appenders::{ConsoleAppender, WriterAppender};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Plain configuration a [`Logger`] is built from.
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub formatter: Arc<dyn Formatter>,
    pub appender: Box<dyn Appender>,
    pub metadata: Option<Metadata>,
    pub flatten_metadata: bool,
    pub clock: Clock,
    pub capture_trace: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            formatter: Arc::new(OutputFormat::JsonPretty),
            appender: Box::new(ConsoleAppender::new()),
            metadata: Some(Metadata::new()),
            flatten_metadata: false,
            clock: system_clock(),
            capture_trace: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("min_level", &self.min_level)
            .field("formatter", &self.formatter.name())
            .field("appender", &self.appender.name())
            .field("metadata", &self.metadata)
            .field("flatten_metadata", &self.flatten_metadata)
            .field("capture_trace", &self.capture_trace)
            .field("timestamp_format", &self.timestamp_format)
            .finish()
    }
}

/// A deferred change to one field of a [`LoggerConfig`].
pub enum LoggerOption {
    /// Minimum level a record needs to be emitted
    MinLevel(LogLevel),
    Formatter(Arc<dyn Formatter>),
    /// Replaces the metadata; `None` removes it
    Metadata(Option<Metadata>),
    /// Byte destination, wrapped so every record ends with a newline
    Output(Box<dyn Write + Send>),
    /// Line sink used as is
    Appender(Box<dyn Appender>),
    FlattenMetadata(bool),
    Clock(Clock),
    CaptureTrace(bool),
    TimestampFormat(TimestampFormat),
}

impl LoggerOption {
    /// Apply this option to `config`.
    pub fn apply(self, mut config: LoggerConfig) -> LoggerConfig {
        match self {
            LoggerOption::MinLevel(level) => config.min_level = level,
            LoggerOption::Formatter(formatter) => config.formatter = formatter,
            LoggerOption::Metadata(metadata) => config.metadata = metadata,
            LoggerOption::Output(writer) => {
                config.appender = Box::new(WriterAppender::new(writer))
            }
            LoggerOption::Appender(appender) => config.appender = appender,
            LoggerOption::FlattenMetadata(flatten) => config.flatten_metadata = flatten,
            LoggerOption::Clock(clock) => config.clock = clock,
            LoggerOption::CaptureTrace(capture) => config.capture_trace = capture,
            LoggerOption::TimestampFormat(format) => config.timestamp_format = format,
        }
        config
    }

    pub fn min_level(level: LogLevel) -> Self {
        LoggerOption::MinLevel(level)
    }

    pub fn formatter<F: Formatter + 'static>(formatter: F) -> Self {
        LoggerOption::Formatter(Arc::new(formatter))
    }

    pub fn metadata(metadata: impl Into<Option<Metadata>>) -> Self {
        LoggerOption::Metadata(metadata.into())
    }

    pub fn output<W: Write + Send + 'static>(writer: W) -> Self {
        LoggerOption::Output(Box::new(writer))
    }

    pub fn appender<A: Appender + 'static>(appender: A) -> Self {
        LoggerOption::Appender(Box::new(appender))
    }

    pub fn flatten_metadata(flatten: bool) -> Self {
        LoggerOption::FlattenMetadata(flatten)
    }

    pub fn clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        LoggerOption::Clock(Arc::new(clock))
    }

    pub fn capture_trace(capture: bool) -> Self {
        LoggerOption::CaptureTrace(capture)
    }

    pub fn timestamp_format(format: TimestampFormat) -> Self {
        LoggerOption::TimestampFormat(format)
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerOption::MinLevel(level) => f.debug_tuple("MinLevel").field(level).finish(),
            LoggerOption::Formatter(formatter) => {
                f.debug_tuple("Formatter").field(&formatter.name()).finish()
            }
            LoggerOption::Metadata(metadata) => f.debug_tuple("Metadata").field(metadata).finish(),
            LoggerOption::Output(_) => f.write_str("Output"),
            LoggerOption::Appender(appender) => {
                f.debug_tuple("Appender").field(&appender.name()).finish()
            }
            LoggerOption::FlattenMetadata(flatten) => {
                f.debug_tuple("FlattenMetadata").field(flatten).finish()
            }
            LoggerOption::Clock(_) => f.write_str("Clock"),
            LoggerOption::CaptureTrace(capture) => {
                f.debug_tuple("CaptureTrace").field(capture).finish()
            }
            LoggerOption::TimestampFormat(format) => {
                f.debug_tuple("TimestampFormat").field(format).finish()
            }
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Each method records one [`LoggerOption`]; `build` applies them in call
/// order.
///
/// # Example
/// ```
/// use leveled_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .formatter(OutputFormat::Json)
///     .metadata(Metadata::new().with_field("service", "book"))
///     .output(Vec::new())
///     .build();
/// assert_eq!(logger.min_level(), LogLevel::Info);
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    options: Vec<LoggerOption>,
}

impl LoggerBuilder {
    /// Create a new builder with no options
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
        }
    }

    /// Append an arbitrary option
    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(self, level: LogLevel) -> Self {
        self.option(LoggerOption::min_level(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(self, formatter: F) -> Self {
        self.option(LoggerOption::formatter(formatter))
    }

    #[must_use = "builder methods return a new value"]
    pub fn metadata(self, metadata: impl Into<Option<Metadata>>) -> Self {
        self.option(LoggerOption::metadata(metadata))
    }

    /// Write lines to any `io::Write` destination
    #[must_use = "builder methods return a new value"]
    pub fn output<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.option(LoggerOption::output(writer))
    }

    /// Write lines through an appender without wrapping it
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(self, appender: A) -> Self {
        self.option(LoggerOption::appender(appender))
    }

    #[must_use = "builder methods return a new value"]
    pub fn flatten_metadata(self, flatten: bool) -> Self {
        self.option(LoggerOption::flatten_metadata(flatten))
    }

    /// Replace the wall clock, e.g. with a fixed time in tests
    #[must_use = "builder methods return a new value"]
    pub fn clock<F>(self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.option(LoggerOption::clock(clock))
    }

    /// Enable or disable stack trace capture for warnings and errors
    #[must_use = "builder methods return a new value"]
    pub fn capture_trace(self, capture: bool) -> Self {
        self.option(LoggerOption::capture_trace(capture))
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(self, format: TimestampFormat) -> Self {
        self.option(LoggerOption::timestamp_format(format))
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger::with_options(self.options)
    }
}
