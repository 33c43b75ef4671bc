//! Property-based tests for leveled_logger using proptest

use leveled_logger::prelude::*;
use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::Value;
use std::io::{self, Write};
use std::sync::Arc;

fn builtin_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug)]
struct Failure(String);

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Failure {}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Parsing the canonical name of a level yields the same level
    #[test]
    fn test_log_level_str_roundtrip(level in builtin_level()) {
        let parsed: LogLevel = level.as_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Parsing ignores case
    #[test]
    fn test_log_level_parse_case_insensitive(level in builtin_level(), upper in any::<bool>()) {
        let name = if upper {
            level.as_str().to_uppercase()
        } else {
            level.as_str().to_lowercase()
        };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// less_than agrees with priority order
    #[test]
    fn test_log_level_ordering(a in builtin_level(), b in builtin_level()) {
        prop_assert_eq!(a.less_than(&b), a.priority() < b.priority());
        prop_assert!(!(a.less_than(&b) && b.less_than(&a)));
        prop_assert!(!a.less_than(&a));
    }

    /// Unknown names become custom levels above every built-in level
    #[test]
    fn test_custom_level_above_builtin(name in "[A-Z]{3,12}", level in builtin_level()) {
        prop_assume!(!["DEBUG", "INFO", "WARN", "WARNING", "ERROR"].contains(&name.as_str()));
        let custom: LogLevel = name.parse().unwrap();
        prop_assert_eq!(custom.to_string(), name);
        prop_assert!(level.less_than(&custom));
    }
}

// ============================================================================
// Logger Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A record is written exactly when its level is not below the minimum
    #[test]
    fn test_min_level_gating(min in builtin_level(), level in builtin_level()) {
        let buf = SharedBuffer::default();
        let logger = Logger::builder()
            .min_level(min.clone())
            .formatter(OutputFormat::Json)
            .capture_trace(false)
            .output(buf.clone())
            .build();

        match level {
            LogLevel::Debug => logger.debug(&[&"m"]),
            LogLevel::Info => logger.info(&[&"m"]),
            LogLevel::Warn => logger.warn(&[&"m"]),
            _ => logger.error(&Failure("m".to_string())),
        }

        let expected = if level.less_than(&min) { 0 } else { 1 };
        prop_assert_eq!(buf.lines().len(), expected);
    }

    /// The message is the concatenation of every value's display form
    #[test]
    fn test_message_is_concatenation(parts in prop::collection::vec(".{0,12}", 1..6)) {
        let buf = SharedBuffer::default();
        let logger = Logger::builder()
            .formatter(OutputFormat::Json)
            .output(buf.clone())
            .build();

        let values: Vec<&dyn std::fmt::Display> =
            parts.iter().map(|p| p as &dyn std::fmt::Display).collect();
        logger.info(&values);

        let lines = buf.lines();
        prop_assert_eq!(lines.len(), 1);
        let record: Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(record["message"].as_str().unwrap(), parts.concat());
    }

    /// Flattening never overwrites a record field: either all metadata keys
    /// land at the top level or the conflict is reported
    #[test]
    fn test_flatten_never_overwrites(key in "[a-z]{1,8}", value in "[a-z0-9]{0,8}") {
        let buf = SharedBuffer::default();
        let logger = Logger::builder()
            .formatter(OutputFormat::Json)
            .metadata(Metadata::new().with_field(key.clone(), value.clone()))
            .flatten_metadata(true)
            .capture_trace(false)
            .output(buf.clone())
            .build();

        logger.info(&[&"payload"]);

        let lines = buf.lines();
        prop_assert_eq!(lines.len(), 1);
        let record: Value = serde_json::from_str(&lines[0]).unwrap();
        if ["level", "time", "message"].contains(&key.as_str()) {
            prop_assert_eq!(record["level"].as_str(), Some("ERROR"));
            prop_assert_eq!(record["meta"][&key].as_str(), Some(value.as_str()));
        } else {
            prop_assert_eq!(record["message"].as_str(), Some("payload"));
            prop_assert_eq!(record[&key].as_str(), Some(value.as_str()));
        }
    }
}
