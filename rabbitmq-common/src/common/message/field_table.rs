// Copyright 2023 The RabbitMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use cheetah_string::CheetahString;
use rabbitmq_error::RabbitMQError;
use rabbitmq_error::RabbitMQResult;
use serde::de;
use serde::de::MapAccess;
use serde::de::SeqAccess;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use tracing::debug;

/// A single application header value.
///
/// The wire-level field table is dynamically typed; this enum closes the value
/// space to the shapes the client actually exchanges. Values serialize as bare
/// data and deserialize by their self-described shape: a sequence always
/// decodes as [`FieldValue::Array`], and [`FieldValue::Bytes`] is only
/// produced from native byte input, so byte values reload as integer arrays
/// from formats without a byte type (JSON among them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    String(CheetahString),
    Bytes(Bytes),
    Table(FieldTable),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns the variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::String(_) => "string",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Table(_) => "table",
            FieldValue::Array(_) => "array",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<i16> for FieldValue {
    fn from(value: i16) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u16> for FieldValue {
    fn from(value: u16) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(CheetahString::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(CheetahString::from(value))
    }
}

impl From<CheetahString> for FieldValue {
    fn from(value: CheetahString) -> Self {
        FieldValue::String(value)
    }
}

impl From<Bytes> for FieldValue {
    fn from(value: Bytes) -> Self {
        FieldValue::Bytes(value)
    }
}

impl From<FieldTable> for FieldValue {
    fn from(value: FieldTable) -> Self {
        FieldValue::Table(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::Array(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(value) => write!(f, "{}", value),
            FieldValue::Int(value) => write!(f, "{}", value),
            FieldValue::String(value) => write!(f, "{}", value),
            FieldValue::Bytes(value) => write!(f, "{} bytes", value.len()),
            FieldValue::Table(value) => write!(f, "{}", value),
            FieldValue::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldValueVisitor;

        impl<'de> Visitor<'de> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean, integer, string, byte buffer, sequence or table")
            }

            fn visit_bool<E>(self, value: bool) -> Result<FieldValue, E>
            where
                E: de::Error,
            {
                Ok(FieldValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<FieldValue, E>
            where
                E: de::Error,
            {
                Ok(FieldValue::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<FieldValue, E>
            where
                E: de::Error,
            {
                i64::try_from(value).map(FieldValue::Int).map_err(|_| {
                    E::custom(format!("integer {} overflows the header value range", value))
                })
            }

            fn visit_str<E>(self, value: &str) -> Result<FieldValue, E>
            where
                E: de::Error,
            {
                Ok(FieldValue::String(CheetahString::from(value)))
            }

            fn visit_string<E>(self, value: String) -> Result<FieldValue, E>
            where
                E: de::Error,
            {
                Ok(FieldValue::String(CheetahString::from(value)))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<FieldValue, E>
            where
                E: de::Error,
            {
                Ok(FieldValue::Bytes(Bytes::copy_from_slice(value)))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<FieldValue, E>
            where
                E: de::Error,
            {
                Ok(FieldValue::Bytes(Bytes::from(value)))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<FieldValue, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element()? {
                    values.push(value);
                }
                Ok(FieldValue::Array(values))
            }

            fn visit_map<A>(self, mut map: A) -> Result<FieldValue, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut inner = HashMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry()? {
                    inner.insert(key, value);
                }
                Ok(FieldValue::Table(FieldTable::from_map(inner)))
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// The application header table of the basic class.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTable {
    inner: HashMap<CheetahString, FieldValue>,
}

impl FieldTable {
    /// Creates a new empty header table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a header value by key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.inner.get(key)
    }

    /// Inserts a header entry, returning the value it displaced.
    ///
    /// Duplicate keys resolve last-write-wins.
    pub fn insert(
        &mut self,
        key: impl Into<CheetahString>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.inner.insert(key.into(), value.into())
    }

    /// Removes a header entry.
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.inner.remove(key)
    }

    /// Returns true if the table contains the key.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns the number of header entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if there are no header entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over the header entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&CheetahString, &FieldValue)> {
        self.inner.iter()
    }

    /// Copies every entry of `other` into this table.
    ///
    /// Existing keys are overwritten (last-write-wins); entries only present
    /// in this table are kept.
    pub fn merge_from(&mut self, other: &FieldTable) {
        for (key, value) in other.iter() {
            if self.inner.insert(key.clone(), value.clone()).is_some() {
                debug!("header merge displaced existing entry for key {}", key);
            }
        }
    }

    /// Reads a header as a string, failing when the entry has another shape.
    pub fn get_str(&self, key: &str) -> RabbitMQResult<Option<&str>> {
        match self.inner.get(key) {
            None => Ok(None),
            Some(FieldValue::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(RabbitMQError::invalid_header_value(
                key,
                format!("expected string, found {}", other.kind()),
            )),
        }
    }

    /// Reads a header as an integer, failing when the entry has another shape.
    pub fn get_i64(&self, key: &str) -> RabbitMQResult<Option<i64>> {
        match self.inner.get(key) {
            None => Ok(None),
            Some(FieldValue::Int(value)) => Ok(Some(*value)),
            Some(other) => Err(RabbitMQError::invalid_header_value(
                key,
                format!("expected int, found {}", other.kind()),
            )),
        }
    }

    /// Reads a header as a boolean, failing when the entry has another shape.
    pub fn get_bool(&self, key: &str) -> RabbitMQResult<Option<bool>> {
        match self.inner.get(key) {
            None => Ok(None),
            Some(FieldValue::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(RabbitMQError::invalid_header_value(
                key,
                format!("expected bool, found {}", other.kind()),
            )),
        }
    }

    /// Returns all entries as a map.
    #[inline]
    pub fn as_map(&self) -> &HashMap<CheetahString, FieldValue> {
        &self.inner
    }

    /// Returns all entries as a mutable map.
    #[inline]
    pub fn as_map_mut(&mut self) -> &mut HashMap<CheetahString, FieldValue> {
        &mut self.inner
    }

    /// Creates a FieldTable from a HashMap.
    #[inline]
    pub fn from_map(map: HashMap<CheetahString, FieldValue>) -> Self {
        Self { inner: map }
    }
}

impl fmt::Display for FieldTable {
    /// Renders the table as `[key=value, ...]` with keys in sorted order so
    /// the output is stable across runs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.inner.iter().collect();
        entries.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        write!(f, "[")?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_empty() {
        let table = FieldTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn insert_and_get_round_trip() {
        let mut table = FieldTable::new();
        assert_eq!(table.insert("retry-count", 3), None);
        assert_eq!(table.get("retry-count"), Some(&FieldValue::Int(3)));
        assert!(table.contains_key("retry-count"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_duplicate_key_is_last_write_wins() {
        let mut table = FieldTable::new();
        table.insert("x", "first");
        let displaced = table.insert("x", "second");
        assert_eq!(displaced, Some(FieldValue::from("first")));
        assert_eq!(table.get_str("x").unwrap(), Some("second"));
    }

    #[test]
    fn merge_from_adds_and_overwrites() {
        let mut target = FieldTable::new();
        target.insert("kept", "old");
        target.insert("overwritten", "old");

        let mut source = FieldTable::new();
        source.insert("overwritten", "new");
        source.insert("added", true);

        target.merge_from(&source);

        assert_eq!(target.len(), 3);
        assert_eq!(target.get_str("kept").unwrap(), Some("old"));
        assert_eq!(target.get_str("overwritten").unwrap(), Some("new"));
        assert_eq!(target.get_bool("added").unwrap(), Some(true));
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn typed_getter_rejects_mismatched_shape() {
        let mut table = FieldTable::new();
        table.insert("flag", true);
        let err = table.get_str("flag").unwrap_err();
        assert!(matches!(err, RabbitMQError::InvalidHeaderValue { .. }));
        assert!(err.to_string().contains("flag"));
        assert!(err.to_string().contains("bool"));
    }

    #[test]
    fn typed_getter_on_missing_key_is_none() {
        let table = FieldTable::new();
        assert_eq!(table.get_str("missing").unwrap(), None);
        assert_eq!(table.get_i64("missing").unwrap(), None);
        assert_eq!(table.get_bool("missing").unwrap(), None);
    }

    #[test]
    fn display_renders_sorted_bracketed_entries() {
        let mut table = FieldTable::new();
        table.insert("b", 2);
        table.insert("a", "one");
        assert_eq!(table.to_string(), "[a=one, b=2]");
    }

    #[test]
    fn display_renders_nested_values() {
        let mut inner = FieldTable::new();
        inner.insert("depth", 2);
        let mut table = FieldTable::new();
        table.insert("nested", inner);
        table.insert("list", vec![FieldValue::from(1), FieldValue::from(true)]);
        table.insert("blob", Bytes::from_static(b"abc"));
        assert_eq!(
            table.to_string(),
            "[blob=3 bytes, list=[1, true], nested=[depth=2]]"
        );
    }

    #[test]
    fn field_value_kind_names_variants() {
        assert_eq!(FieldValue::from(true).kind(), "bool");
        assert_eq!(FieldValue::from(1).kind(), "int");
        assert_eq!(FieldValue::from("s").kind(), "string");
        assert_eq!(FieldValue::from(Bytes::new()).kind(), "bytes");
        assert_eq!(FieldValue::from(FieldTable::new()).kind(), "table");
        assert_eq!(FieldValue::from(Vec::new()).kind(), "array");
    }

    #[test]
    fn serde_round_trips_scalar_values() {
        let mut table = FieldTable::new();
        table.insert("retry", 5);
        table.insert("source", "gateway");
        table.insert("redelivered", false);

        let json = serde_json::to_string(&table).unwrap();
        let back: FieldTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn serde_round_trips_nested_table() {
        let mut inner = FieldTable::new();
        inner.insert("code", 404);
        let mut table = FieldTable::new();
        table.insert("death", inner.clone());

        let json = serde_json::to_string(&table).unwrap();
        let back: FieldTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("death"), Some(&FieldValue::Table(inner)));
    }

    #[test]
    fn serde_round_trips_array_values() {
        let mut table = FieldTable::new();
        table.insert(
            "x-death-counts",
            vec![FieldValue::from(1), FieldValue::from(2)],
        );
        table.insert("x-visited", Vec::new());

        let json = serde_json::to_string(&table).unwrap();
        let back: FieldTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn sequences_decode_as_arrays_not_bytes() {
        let value: FieldValue = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(
            value,
            FieldValue::Array(vec![FieldValue::Int(1), FieldValue::Int(2)])
        );

        let value: FieldValue = serde_json::from_str("[]").unwrap();
        assert_eq!(value, FieldValue::Array(Vec::new()));
    }

    #[test]
    fn byte_values_reload_as_integer_arrays_from_json() {
        let bytes = FieldValue::from(Bytes::from_static(b"\x01\x02"));
        let json = serde_json::to_string(&bytes).unwrap();
        assert_eq!(json, "[1,2]");

        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back,
            FieldValue::Array(vec![FieldValue::Int(1), FieldValue::Int(2)])
        );
    }

    #[test]
    fn map_accessors_round_trip_the_inner_entries() {
        let mut table = FieldTable::new();
        table.insert("x-retry", 1);

        let mut rebuilt = FieldTable::from_map(table.as_map().clone());
        assert_eq!(rebuilt, table);

        rebuilt
            .as_map_mut()
            .insert(CheetahString::from("x-dead"), FieldValue::from(true));
        assert_eq!(rebuilt.len(), 2);
        assert_eq!(rebuilt.get_bool("x-dead").unwrap(), Some(true));
    }
}
