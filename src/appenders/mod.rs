//! Appender implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod writer;

pub use console::ConsoleAppender;
#[cfg(feature = "file")]
pub use file::FileAppender;
pub use writer::WriterAppender;

pub use crate::core::Appender;
