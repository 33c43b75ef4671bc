//! Logging macros for ergonomic message formatting.
//!
//! These macros take `format!` arguments and hand them to the matching level
//! method as a single value. The string is only built when the level passes.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::prelude::*;
//! use leveled_logger::info;
//!
//! let logger = Logger::builder().output(Vec::new()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().output(Vec::new()).build();
/// use leveled_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr) => {
        $logger.debug(&[])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(&[&::std::format_args!($($arg)+)])
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().output(Vec::new()).build();
/// use leveled_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr) => {
        $logger.info(&[])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(&[&::std::format_args!($($arg)+)])
    };
}

/// Log a warning with a stack trace of the call site.
///
/// # Examples
///
/// ```
/// # use leveled_logger::prelude::*;
/// # let logger = Logger::builder().output(Vec::new()).build();
/// use leveled_logger::warn;
/// warn!(logger, "Deprecated API used");
/// warn!(logger, "Memory usage: {}%", 85);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr) => {
        $logger.warn(&[])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(&[&::std::format_args!($($arg)+)])
    };
}
