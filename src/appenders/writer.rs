//! Line writer over any `io::Write`

use crate::core::{Appender, Result};
use std::io::Write;

/// Wraps a byte destination and terminates every appended line with `\n`.
///
/// ```
/// use leveled_logger::{Appender, WriterAppender};
///
/// let mut appender = WriterAppender::new(Vec::new());
/// appender.append("hello").unwrap();
/// assert_eq!(appender.get_ref(), b"hello\n");
/// ```
pub struct WriterAppender<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&mut self, line: &str) -> Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        self.writer.write_all(&buf)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}
