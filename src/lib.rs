//! # Leveled Logger
//!
//! A leveled, structured logger that writes one formatted record per call.
//!
//! ## Features
//!
//! - **Levels**: Debug, Info, Warn and Error gated by a minimum level
//! - **Structured Records**: JSON (compact or pretty) or logfmt output with
//!   sorted keys
//! - **Metadata**: Contextual fields nested under `meta` or flattened into
//!   every record
//! - **Stack Traces**: Warnings and errors carry the call site's trace, or
//!   the trace recorded by a [`TracedError`]
//! - **Self-Reporting**: Metadata conflicts and formatter failures are logged
//!   once as errors, never returned to the caller
//!
//! ## Example
//!
//! ```
//! use leveled_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Info)
//!     .formatter(OutputFormat::Json)
//!     .metadata(Metadata::new().with_field("request_id", "943ad105"))
//!     .output(Vec::new())
//!     .build();
//!
//! logger.info(&[&"listening on port ", &8080]);
//! logger.error(&std::io::Error::new(std::io::ErrorKind::Other, "connection reset"));
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

#[cfg(test)]
mod test_util;

pub mod prelude {
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::appenders::{ConsoleAppender, WriterAppender};
    pub use crate::core::{
        Appender, Formatter, LeveledLog, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, LoggerOption, Metadata, NopLogger, OutputFormat, Record,
        Result, StackTrace, TimestampFormat, TracedError,
    };
}

#[cfg(feature = "file")]
pub use appenders::FileAppender;
pub use appenders::{ConsoleAppender, WriterAppender};
pub use core::{
    fixed_clock, own_trace, root_cause, system_clock, Appender, Clock, Formatter, Frame,
    LeveledLog, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    LoggerOption, Metadata, NopLogger, OutputFormat, Record, Result, StackTrace,
    TimestampFormat, TracedError,
};
pub use global::default_logger;
