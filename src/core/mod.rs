//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metadata;
pub mod metrics;
pub mod nop_logger;
pub mod option;
pub mod stack_trace;
pub mod timestamp;
pub mod traced_error;

/// One log event: a JSON object keyed by field name, kept in sorted key order.
pub type Record = serde_json::Map<String, serde_json::Value>;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, OutputFormat};
pub use log_level::LogLevel;
pub use logger::{Logger, ERROR_KEY, LEVEL_KEY, MESSAGE_KEY, TIME_KEY, TRACE_KEY};
pub use metadata::{Metadata, META_KEY};
pub use metrics::LoggerMetrics;
pub use nop_logger::{LeveledLog, NopLogger};
pub use option::{LoggerBuilder, LoggerConfig, LoggerOption};
pub use stack_trace::{Frame, StackTrace, MAX_DEPTH};
pub use timestamp::{fixed_clock, system_clock, Clock, TimestampFormat};
pub use traced_error::{own_trace, root_cause, TracedError};
