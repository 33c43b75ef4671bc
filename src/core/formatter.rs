//! Record formatters
//!
//! A formatter turns a [`Record`] into the single string written to the
//! appender. Built-in formats:
//! - Json: compact JSON object
//! - JsonPretty: JSON object indented with two spaces (default)
//! - Logfmt: key=value pairs
//!
//! Any `Fn(&Record) -> Result<String>` is a formatter as well.

use super::error::{LoggerError, Result};
use super::Record;
use serde_json::Value;

pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record) -> Result<String>;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Formatter for F
where
    F: Fn(&Record) -> Result<String> + Send + Sync,
{
    fn format(&self, record: &Record) -> Result<String> {
        self(record)
    }
}

/// Built-in output formats. Keys are always emitted in sorted order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON
    ///
    /// Example: `{"level":"INFO","message":"Request processed","time":"2025-01-08T10:30:45Z"}`
    Json,

    /// Indented JSON (default)
    #[default]
    JsonPretty,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `level=INFO message="Request processed" time=2025-01-08T10:30:45Z`
    Logfmt,
}

impl Formatter for OutputFormat {
    fn format(&self, record: &Record) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(record)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Logfmt => format_logfmt(record),
        }
    }

    fn name(&self) -> &str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::JsonPretty => "json-pretty",
            OutputFormat::Logfmt => "logfmt",
        }
    }
}

fn format_logfmt(record: &Record) -> Result<String> {
    let mut parts = Vec::with_capacity(record.len());
    for (key, value) in record {
        let key = escape_logfmt_key(key);
        if key.is_empty() {
            return Err(LoggerError::formatter("logfmt", "empty key after escaping"));
        }
        let formatted = match value {
            Value::String(s) => escape_logfmt_value(s),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            nested => quote_logfmt_value(&serde_json::to_string(nested)?),
        };
        parts.push(format!("{}={}", key, formatted));
    }
    Ok(parts.join(" "))
}

/// Escape a logfmt key (remove spaces and special chars)
fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

/// Escape a logfmt value (quote if it contains spaces, quotes, `=` or line breaks)
fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=', '\n', '\r', '\t']) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!(
        "\"{}\"",
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    )
}
