//! Call-stack capture for warning and error records
//!
//! A [`StackTrace`] only records return addresses when it is captured.
//! Symbol names and source locations are resolved when a frame is rendered.

use serde_json::Value;
use std::ffi::c_void;
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum number of frames kept in a trace.
pub const MAX_DEPTH: usize = 32;

/// Frames walked while looking for the capture point.
const WALK_LIMIT: usize = 128;

/// A single return address on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    ip: usize,
}

#[derive(Debug, Default)]
struct ResolvedFrame {
    name: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl Frame {
    /// Address used for symbol lookup; a return address points one past the call.
    fn pc(&self) -> usize {
        self.ip.saturating_sub(1)
    }

    fn resolve(&self) -> ResolvedFrame {
        let mut resolved: Option<ResolvedFrame> = None;
        backtrace::resolve(self.pc() as *mut c_void, |symbol| {
            if resolved.is_none() {
                resolved = Some(ResolvedFrame {
                    name: symbol.name().map(|name| format!("{:#}", name)),
                    file: symbol.filename().map(Path::to_path_buf),
                    line: symbol.lineno(),
                });
            }
        });
        resolved.unwrap_or_default()
    }

    /// Name of the function for this frame, if known.
    pub fn name(&self) -> Option<String> {
        self.resolve().name
    }

    /// Source file containing the function, if known.
    pub fn file(&self) -> Option<PathBuf> {
        self.resolve().file
    }

    /// Source line of the call, if known.
    pub fn line(&self) -> Option<u32> {
        self.resolve().line
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = self.resolve();
        match (resolved.name, resolved.file) {
            (None, _) => f.write_str("unknown"),
            (Some(name), Some(file)) => {
                write!(f, "{} {}:{}", name, file.display(), resolved.line.unwrap_or(0))
            }
            (Some(name), None) => f.write_str(&name),
        }
    }
}

/// Point-in-time snapshot of the calling thread's stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: Vec<Frame>,
}

impl StackTrace {
    /// Capture the stack of the caller.
    ///
    /// Frames belonging to the capture itself are dropped, then `skip` more
    /// frames are dropped so that callers inside the logger can hide
    /// themselves. At most [`MAX_DEPTH`] frames are kept. If the capture
    /// point cannot be located on the walked stack every frame is kept.
    #[inline(never)]
    pub fn capture(skip: usize) -> Self {
        let anchor = StackTrace::capture as fn(usize) -> StackTrace as usize;

        let mut walked: Vec<(usize, usize)> = Vec::with_capacity(MAX_DEPTH);
        backtrace::trace(|frame| {
            walked.push((frame.ip() as usize, frame.symbol_address() as usize));
            walked.len() < WALK_LIMIT
        });

        let start = walked
            .iter()
            .position(|&(_, symbol)| symbol == anchor)
            .map_or(0, |pos| pos + 1 + skip);

        let frames = walked
            .into_iter()
            .skip(start)
            .take(MAX_DEPTH)
            .map(|(ip, _)| Frame { ip })
            .collect();

        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Resolve every frame to its display string.
    pub fn to_strings(&self) -> Vec<String> {
        self.frames.iter().map(ToString::to_string).collect()
    }

    /// The trace as a record value: an array of frame strings.
    pub fn to_json_value(&self) -> Value {
        Value::Array(self.to_strings().into_iter().map(Value::String).collect())
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, frame) in self.frames.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", frame)?;
        }
        Ok(())
    }
}
