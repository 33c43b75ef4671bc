//! Errors that remember where they were created

use super::stack_trace::StackTrace;
use std::error::Error;
use std::fmt;

/// An error wrapper carrying the stack trace captured when it was created.
///
/// When a `TracedError` is logged, the logger uses this trace instead of
/// capturing one at the logging call, and reports the wrapped error's type
/// name.
///
/// ```
/// use leveled_logger::TracedError;
///
/// fn parse(input: &str) -> Result<i32, TracedError> {
///     input.parse::<i32>().map_err(TracedError::new)
/// }
///
/// let err = parse("x").unwrap_err();
/// assert!(!err.stack_trace().is_empty());
/// assert_eq!(err.type_name(), "ParseIntError");
/// ```
pub struct TracedError {
    inner: Box<dyn Error + Send + Sync + 'static>,
    type_name: &'static str,
    trace: StackTrace,
}

impl TracedError {
    /// Wrap `err`, capturing the stack of the caller.
    #[inline(never)]
    pub fn new<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(err),
            type_name: short_type_name(std::any::type_name::<E>()),
            trace: StackTrace::capture(1),
        }
    }

    /// Create a traced error from a plain message.
    #[inline(never)]
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            inner: Box::new(Message(message.into())),
            type_name: "Message",
            trace: StackTrace::capture(1),
        }
    }

    pub fn stack_trace(&self) -> &StackTrace {
        &self.trace
    }

    /// Unqualified type name of the wrapped error.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Debug for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedError")
            .field("type_name", &self.type_name)
            .field("inner", &self.inner)
            .field("frames", &self.trace.len())
            .finish()
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.inner)
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for Message {}

/// The trace carried by `err`, if it is a [`TracedError`].
pub fn own_trace<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a StackTrace> {
    err.downcast_ref::<TracedError>().map(TracedError::stack_trace)
}

/// Innermost cause of `err` and its display type name.
///
/// Follows `Error::source` to the end of the chain. Common std errors are
/// named directly. Otherwise the type name is taken from the `TracedError`
/// that wrapped the root when there is one, and from the leading identifier
/// of the root's `Debug` output as a last resort.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> (&'a (dyn Error + 'static), String) {
    let mut current = err;
    let mut traced_name = None;
    loop {
        if let Some(traced) = current.downcast_ref::<TracedError>() {
            traced_name = Some(traced.type_name());
            current = traced.inner();
            continue;
        }
        match current.source() {
            Some(next) => {
                traced_name = None;
                current = next;
            }
            None => {
                let name = match (std_type_name(current), traced_name) {
                    (Some(name), _) | (None, Some(name)) => name.to_string(),
                    (None, None) => debug_type_name(current),
                };
                return (current, name);
            }
        }
    }
}

/// Std errors whose `Debug` output does not start with their type name.
fn std_type_name(err: &(dyn Error + 'static)) -> Option<&'static str> {
    if err.is::<std::io::Error>() {
        Some("io::Error")
    } else if err.is::<std::fmt::Error>() {
        Some("fmt::Error")
    } else if err.is::<std::str::Utf8Error>() {
        Some("Utf8Error")
    } else if err.is::<std::string::FromUtf8Error>() {
        Some("FromUtf8Error")
    } else if err.is::<std::num::ParseIntError>() {
        Some("ParseIntError")
    } else if err.is::<std::num::ParseFloatError>() {
        Some("ParseFloatError")
    } else {
        None
    }
}

fn debug_type_name(err: &dyn Error) -> String {
    let debug = format!("{:?}", err);
    let name: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    if name.is_empty() {
        "Error".to_string()
    } else {
        name
    }
}

/// Strip module paths from a type name, keeping generic arguments intact.
fn short_type_name(full: &'static str) -> &'static str {
    let head_end = full.find('<').unwrap_or(full.len());
    let start = full[..head_end].rfind("::").map_or(0, |pos| pos + 2);
    &full[start..]
}
