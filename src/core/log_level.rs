//! Log level definitions

use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Known levels are ordered `Debug < Info < Warn < Error`. A `Custom` level
/// always has the highest priority, so a logger whose minimum level is a
/// custom symbol suppresses every known level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warn,
    Error,
    Custom(String),
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Custom(name) => name,
        }
    }

    /// Numeric priority; greater is more severe.
    pub fn priority(&self) -> u32 {
        match self {
            LogLevel::Debug => 1,
            LogLevel::Info => 2,
            LogLevel::Warn => 3,
            LogLevel::Error => 4,
            LogLevel::Custom(_) => u32::MAX,
        }
    }

    /// Returns true if this level's priority is strictly lower than `other`'s.
    pub fn less_than(&self, other: &LogLevel) -> bool {
        self.priority() < other.priority()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" | "WARNING" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Custom(s.to_string()),
        })
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels_ordered() {
        assert!(LogLevel::Debug.less_than(&LogLevel::Info));
        assert!(LogLevel::Info.less_than(&LogLevel::Warn));
        assert!(LogLevel::Warn.less_than(&LogLevel::Error));
        assert!(!LogLevel::Error.less_than(&LogLevel::Error));
        assert!(!LogLevel::Error.less_than(&LogLevel::Debug));
    }

    #[test]
    fn test_custom_level_sorts_above_known() {
        let extreme = LogLevel::Custom("EXTREME".to_string());
        assert!(LogLevel::Error.less_than(&extreme));
        assert!(!extreme.less_than(&LogLevel::Error));
        assert_ne!(extreme, LogLevel::Error);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!(
            "notice".parse::<LogLevel>().unwrap(),
            LogLevel::Custom("notice".to_string())
        );
    }

    #[test]
    fn test_serialize_as_symbol() {
        assert_eq!(serde_json::to_string(&LogLevel::Info).unwrap(), "\"INFO\"");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }
}
