//! # Generic Record Wrapper
//!
//! [`Record`] turns a plain mapping into a reflectable object whose entries
//! are readable fields. It is how fixtures are written declaratively, and it
//! is the shape nested JSON objects take after [`Record::from_json`].

use std::sync::Arc;

use crate::error::CoreError;
use crate::kind::RecordType;
use crate::reflect::{FieldMap, Reflect};
use crate::value::Value;

/// A reflectable object backed by a field map.
#[derive(Debug, Clone)]
pub struct Record {
    record_type: RecordType,
    fields: FieldMap,
}

impl Record {
    /// Build a record of the generic kind.
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::with_type(RecordType::generic(), entries)
    }

    /// Build a record of an explicit kind, so that the kind's class
    /// attributes apply to it.
    pub fn with_type<K, V>(record_type: RecordType, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            record_type,
            fields: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build a record from a JSON object. Nested objects, including those
    /// inside arrays, become records of the generic kind.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotAnObject` if `json` is not an object, and
    /// `CoreError::IntegerOutOfRange` for integers that do not fit `i64`.
    pub fn from_json(json: serde_json::Value) -> Result<Self, CoreError> {
        match json {
            serde_json::Value::Object(map) => Self::from_json_map(map),
            other => Err(CoreError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Parse JSON text and build a record from it.
    ///
    /// # Errors
    ///
    /// As [`Record::from_json`], plus `CoreError::Json` for malformed text.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        Self::from_json(serde_json::from_str(text)?)
    }

    pub(crate) fn from_json_map(
        map: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, CoreError> {
        let mut fields = FieldMap::new();
        for (key, value) in map {
            fields.insert(key, Value::from_json(value)?);
        }
        Ok(Self {
            record_type: RecordType::generic(),
            fields,
        })
    }

    /// Insert or replace a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Number of fields, reserved names included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wrap into a shareable [`Value::Object`].
    pub fn into_value(self) -> Value {
        Value::Object(Arc::new(self))
    }
}

impl Reflect for Record {
    fn record_type(&self) -> RecordType {
        self.record_type.clone()
    }

    fn fields(&self) -> FieldMap {
        self.fields.clone()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Build a generic [`Record`] from `name => value` pairs.
///
/// ```
/// use objverify_core::{record, Reflect};
///
/// let person = record! {
///     "name" => "John Smith",
///     "age" => 23,
///     "stats" => record! { "DOB" => "1/12/22" },
/// };
/// assert_eq!(person.fields().len(), 3);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new(::std::iter::empty::<(::std::string::String, $crate::Value)>())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut record = $crate::record!();
            $(
                record.set($key, $value);
            )+
            record
        }
    };
}
