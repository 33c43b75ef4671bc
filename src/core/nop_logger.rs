//! The leveled logging capability and a logger that discards everything

use super::logger::Logger;
use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;

/// Level methods shared by [`Logger`] and [`NopLogger`].
///
/// Code that only needs to emit records should take `&dyn LeveledLog` so a
/// [`NopLogger`] can be passed where output is unwanted.
pub trait LeveledLog: Send + Sync {
    fn debug(&self, values: &[&dyn Display]);
    fn info(&self, values: &[&dyn Display]);
    fn warn(&self, values: &[&dyn Display]);
    fn warn_error(&self, err: &(dyn Error + 'static), values: &[&dyn Display]);
    fn error(&self, err: &(dyn Error + 'static));
}

impl LeveledLog for Logger {
    #[inline(never)]
    fn debug(&self, values: &[&dyn Display]) {
        Logger::debug(self, values)
    }

    #[inline(never)]
    fn info(&self, values: &[&dyn Display]) {
        Logger::info(self, values)
    }

    #[inline(never)]
    fn warn(&self, values: &[&dyn Display]) {
        Logger::warn(self, values)
    }

    #[inline(never)]
    fn warn_error(&self, err: &(dyn Error + 'static), values: &[&dyn Display]) {
        Logger::warn_error(self, err, values)
    }

    #[inline(never)]
    fn error(&self, err: &(dyn Error + 'static)) {
        Logger::error(self, err)
    }
}

impl<T: LeveledLog + ?Sized> LeveledLog for Arc<T> {
    fn debug(&self, values: &[&dyn Display]) {
        (**self).debug(values)
    }

    fn info(&self, values: &[&dyn Display]) {
        (**self).info(values)
    }

    fn warn(&self, values: &[&dyn Display]) {
        (**self).warn(values)
    }

    fn warn_error(&self, err: &(dyn Error + 'static), values: &[&dyn Display]) {
        (**self).warn_error(err, values)
    }

    fn error(&self, err: &(dyn Error + 'static)) {
        (**self).error(err)
    }
}

/// A logger whose every operation is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NopLogger;

impl NopLogger {
    pub fn new() -> Self {
        NopLogger
    }
}

impl LeveledLog for NopLogger {
    fn debug(&self, _values: &[&dyn Display]) {}

    fn info(&self, _values: &[&dyn Display]) {}

    fn warn(&self, _values: &[&dyn Display]) {}

    fn warn_error(&self, _err: &(dyn Error + 'static), _values: &[&dyn Display]) {}

    fn error(&self, _err: &(dyn Error + 'static)) {}
}
