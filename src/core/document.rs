//! Ordered dynamic JSON document with typed accessors.
//!
//! A [`Document`] maps string keys to [`Value`]s in insertion order and never
//! stores an explicit `null`: writing `null` removes the key. Typed getters
//! cast or coerce the stored value and report incompatibilities as
//! [`ErrorKind::TypeMismatch`] instead of panicking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use super::convert::{self, DocumentType, JsonType, value_type_name};
use super::error::{Error, ErrorKind};
use super::number;
use crate::json::codec;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Document {
    map: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document holding a single entry; empty when `value` is `null`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut doc = Self::new();
        doc.append(key, value);
        doc
    }

    /// Copies `map`, dropping `null` entries.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut doc = Self::new();
        doc.append_all(map);
        doc
    }

    /// Parses JSON text whose top level is an object.
    pub fn parse(text: &str) -> Result<Self, Error> {
        codec::parse(text).map(Self::from_map)
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.put(key, value);
        self
    }

    pub fn append_all<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.put(key, value);
        }
        self
    }

    /// Sets `key` and returns the previous value. `null` removes the key.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value: Value = value.into();
        match value {
            Value::Null => self.remove(&key),
            value => self.map.insert(key, value),
        }
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn contains_value(&self, value: &Value) -> bool {
        self.map.values().any(|stored| stored == value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.map.values()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.map.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.map
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.map
    }

    /// Raw stored value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Stored value cast to `T`, or `None` when absent.
    pub fn get_as<T: JsonType>(&self, key: &str) -> Result<Option<T>, Error> {
        self.get(key)
            .map(|value| convert::cast(key, value))
            .transpose()
    }

    /// Stored value cast to `T`, or `default` when absent.
    ///
    /// A present value of an incompatible type is an error even though a
    /// default was supplied.
    pub fn get_or<T: JsonType>(&self, key: &str, default: T) -> Result<T, Error> {
        if default.is_null() {
            return Err(Error::new(ErrorKind::InvalidArgument)
                .with_message("default value can not be null")
                .with_key(key));
        }
        Ok(self.get_as(key)?.unwrap_or(default))
    }

    fn number(&self, key: &str) -> Result<Option<Number>, Error> {
        self.get(key)
            .map(|value| number::coerce(key, value))
            .transpose()
    }

    pub fn get_i32(&self, key: &str) -> Result<Option<i32>, Error> {
        self.number(key)?
            .map(|num| number::to_i32(key, &num))
            .transpose()
    }

    pub fn get_i32_or(&self, key: &str, default: i32) -> Result<i32, Error> {
        Ok(self.get_i32(key)?.unwrap_or(default))
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, Error> {
        self.number(key)?
            .map(|num| number::to_i64(key, &num))
            .transpose()
    }

    pub fn get_i64_or(&self, key: &str, default: i64) -> Result<i64, Error> {
        Ok(self.get_i64(key)?.unwrap_or(default))
    }

    /// Like the other numeric getters, but `"Infinity"`/`"NaN"` strings yield
    /// non-finite floats.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, Error> {
        self.get(key)
            .map(|value| number::coerce_f64(key, value))
            .transpose()
    }

    pub fn get_f64_or(&self, key: &str, default: f64) -> Result<f64, Error> {
        Ok(self.get_f64(key)?.unwrap_or(default))
    }

    /// Coerced number as a serde_json `Number` (backed by i64, u64 or f64;
    /// decimal strings lose precision beyond f64).
    pub fn get_decimal(&self, key: &str) -> Result<Option<Number>, Error> {
        self.number(key)
    }

    pub fn get_decimal_or(&self, key: &str, default: Number) -> Result<Number, Error> {
        Ok(self.number(key)?.unwrap_or(default))
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, Error> {
        self.get_as(key)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, Error> {
        self.get_or(key, default)
    }

    /// String form of any stored value: strings verbatim, everything else as
    /// compact JSON.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    pub fn get_string_or(&self, key: &str, default: impl Into<String>) -> String {
        self.get_string(key).unwrap_or_else(|| default.into())
    }

    /// Stored list with every element cast to `T`. A single non-array value
    /// is treated as a one-element list.
    pub fn get_list<T: JsonType>(&self, key: &str) -> Result<Option<Vec<T>>, Error> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        list_items(value)
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                T::from_json(item).ok_or_else(|| {
                    Error::new(ErrorKind::TypeMismatch)
                        .with_message(format!(
                            "list element {idx} ({}) cannot be cast to {}",
                            value_type_name(item),
                            T::NAME
                        ))
                        .with_key(key)
                })
            })
            .collect::<Result<Vec<T>, Error>>()
            .map(Some)
    }

    pub fn get_list_or<T: JsonType>(&self, key: &str, default: Vec<T>) -> Result<Vec<T>, Error> {
        Ok(self.get_list(key)?.unwrap_or(default))
    }

    /// Untyped list access with the default given as a JSON value, which must
    /// be an array.
    pub fn get_list_value_or(&self, key: &str, default: Value) -> Result<Vec<Value>, Error> {
        let default = match default {
            Value::Array(items) => items,
            Value::Null => {
                return Err(Error::new(ErrorKind::InvalidArgument)
                    .with_message("default value can not be null")
                    .with_key(key));
            }
            other => {
                return Err(Error::new(ErrorKind::InvalidArgument)
                    .with_message(format!(
                        "default list must be an array, got {}",
                        value_type_name(&other)
                    ))
                    .with_key(key));
            }
        };
        self.get_list_or(key, default)
    }

    /// Nested object materialized as `T`, or `None` when absent.
    pub fn get_object<T: DocumentType>(&self, key: &str) -> Result<Option<T>, Error> {
        self.get_object_with(key, T::construct)
    }

    pub fn get_object_with<T, F>(&self, key: &str, factory: F) -> Result<Option<T>, Error>
    where
        T: DocumentType,
        F: FnOnce() -> Result<T, Error>,
    {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        tracing::debug!(key, type_name = T::TYPE_NAME, "materializing nested document");
        convert::materialize(key, T::TYPE_NAME, value, factory).map(Some)
    }

    /// One freshly constructed `T` per element of the stored list of
    /// objects. An absent key yields an empty list.
    pub fn get_documents<T: DocumentType>(&self, key: &str) -> Result<Vec<T>, Error> {
        self.get_documents_with(key, T::construct)
    }

    pub fn get_documents_with<T, F>(&self, key: &str, mut factory: F) -> Result<Vec<T>, Error>
    where
        T: DocumentType,
        F: FnMut() -> Result<T, Error>,
    {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        list_items(value)
            .iter()
            .map(|item| convert::materialize(key, T::TYPE_NAME, item, &mut factory))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, Error> {
        codec::serialize(&self.map)
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        codec::serialize_pretty(&self.map)
    }
}

fn list_items(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        single => std::slice::from_ref(single),
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl TryFrom<Value> for Document {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(Error::new(ErrorKind::TypeMismatch).with_message(format!(
                "{} cannot be cast to document",
                value_type_name(&other)
            ))),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.map)
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Document {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        self.append_all(entries);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut doc = Self::new();
        doc.append_all(entries);
        doc
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
