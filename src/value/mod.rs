pub mod parts;
pub mod scalar;

pub use parts::*;
pub use scalar::*;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A value as it travels through a form: either a plain scalar or a composite
/// carried by a date, time or date-time group.
///
/// Composites are recognised by their structure, never by the field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    DateTime(DateTimeParts),
    Date(DateParts),
    Time(TimeParts),
    Scalar(Value),
}

impl FormValue {
    pub fn is_composite(&self) -> bool {
        !matches!(self, FormValue::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FormValue::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Scalar(Value::Null)
    }
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        FormValue::Scalar(value)
    }
}

impl From<DateParts> for FormValue {
    fn from(parts: DateParts) -> Self {
        FormValue::Date(parts)
    }
}

impl From<TimeParts> for FormValue {
    fn from(parts: TimeParts) -> Self {
        FormValue::Time(parts)
    }
}

impl From<DateTimeParts> for FormValue {
    fn from(parts: DateTimeParts) -> Self {
        FormValue::DateTime(parts)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Scalar(value.into())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Scalar(value.into())
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Scalar(value.into())
    }
}

impl From<i32> for FormValue {
    fn from(value: i32) -> Self {
        FormValue::Scalar(value.into())
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Scalar(value.into())
    }
}

/// The values of one submitted form, keyed by field name, in submission order.
///
/// Serialized as a JSON object whose keys keep that order in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostedValues {
    entries: Vec<(String, FormValue)>,
}

impl PostedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any earlier value for the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<FormValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for PostedValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut posted = PostedValues::new();
        for (name, value) in iter {
            posted.insert(name, value);
        }
        posted
    }
}

impl Serialize for PostedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct PostedValuesVisitor;

impl<'de> Visitor<'de> for PostedValuesVisitor {
    type Value = PostedValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of submitted field values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut posted = PostedValues::new();
        while let Some((name, value)) = access.next_entry::<String, FormValue>()? {
            posted.insert(name, value);
        }
        Ok(posted)
    }
}

impl<'de> Deserialize<'de> for PostedValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PostedValuesVisitor)
    }
}
