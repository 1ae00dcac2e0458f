//! Records and field metadata shared by every adapter

use std::borrow::Cow;

use serde_json::{Map, Value};

/// One unit of data flowing through a pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Field name to value mapping, in source order
    Fields(Map<String, Value>),
    /// Positional values with no field names
    Values(Vec<Value>),
    /// A bare JSON element that is neither an array nor an object
    Scalar(Value),
}

impl Record {
    /// Build a record from an element of a JSON document
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Record::Fields(map),
            Value::Array(values) => Record::Values(values),
            other => Record::Scalar(other),
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            Record::Fields(map) => Value::Object(map),
            Record::Values(values) => Value::Array(values),
            Record::Scalar(value) => value,
        }
    }

    /// Short name of the record's shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Fields(_) => "a field map",
            Record::Values(_) => "a value list",
            Record::Scalar(_) => "a scalar",
        }
    }

    /// Look up a field by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Record::Fields(map) => map.get(field),
            _ => None,
        }
    }

    /// Look up a field by name, returning it only if it holds text
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Look up a positional value
    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Record::Values(values) => values.get(index),
            _ => None,
        }
    }

    /// Set a field, returning false when the record has no field names
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> bool {
        match self {
            Record::Fields(map) => {
                map.insert(field.into(), value.into());
                true
            }
            _ => false,
        }
    }

    /// Builder-style variant of [`Record::set`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove a field, keeping the order of the others
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        match self {
            Record::Fields(map) => map.shift_remove(field),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            Record::Fields(map) => Some(map),
            _ => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut Map<String, Value>> {
        match self {
            Record::Fields(map) => Some(map),
            _ => None,
        }
    }

    pub fn values(&self) -> Option<&[Value]> {
        match self {
            Record::Values(values) => Some(values),
            _ => None,
        }
    }

    pub fn values_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Record::Values(values) => Some(values),
            _ => None,
        }
    }

    /// Swap two positional values; out of range indices leave the record unchanged
    pub fn swap(&mut self, a: usize, b: usize) {
        if let Record::Values(values) = self {
            if a < values.len() && b < values.len() {
                values.swap(a, b);
            }
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record::Fields(map)
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Record::Values(values)
    }
}

/// Render a value as a single CSV cell
pub fn cell_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        nested => Cow::Owned(nested.to_string()),
    }
}

/// Ordered field names discovered by a reader when it opens its source.
///
/// Only readers construct this; once returned from `open` it is never
/// modified, so a writer always sees the complete list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMetadata {
    names: Vec<String>,
}

impl FieldMetadata {
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Metadata for shapes that carry no field names
    pub(crate) fn anonymous() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}
