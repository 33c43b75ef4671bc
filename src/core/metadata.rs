//! Contextual metadata attached to every record of a logger
//!
//! Metadata typically carries request ids, user ids, instance ids and other
//! fields used to search logs in a query service. It is either nested under
//! the `meta` key of a record or flattened into the record's top level.

use super::error::{LoggerError, Result};
use super::Record;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Key under which nested metadata is attached.
pub const META_KEY: &str = "meta";

/// Ordered string → JSON value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: Map<String, Value>,
}

impl Metadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Build metadata from any value serializing to a JSON object.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(LoggerError::other(format!(
                "metadata must serialize to an object, got {}",
                other
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Attach the metadata to `record` under [`META_KEY`].
    pub fn nest_into(&self, record: &mut Record) {
        record.insert(META_KEY.to_string(), Value::Object(self.fields.clone()));
    }

    /// Merge every field into the top level of `record`.
    ///
    /// Fails without touching `record` if any key is already present.
    pub fn flatten_into(&self, record: &mut Record) -> Result<()> {
        if let Some(key) = self.fields.keys().find(|key| record.contains_key(key.as_str())) {
            return Err(LoggerError::metadata_conflict(key.clone()));
        }
        for (key, value) in &self.fields {
            record.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .fields
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(" ");
        f.write_str(&pairs)
    }
}
