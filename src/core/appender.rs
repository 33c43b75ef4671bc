//! Appender trait for log output destinations

use super::error::Result;

/// A line sink.
///
/// `append` receives one formatted record without a trailing newline.
pub trait Appender: Send {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
