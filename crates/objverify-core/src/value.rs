//! # Value Model
//!
//! Values are the atomic data found in instance fields and class attributes.
//! The set is closed: scalars (`Null`, `Bool`, `Int`, `Float`, `Str`),
//! ordered lists, callables, and reflectable objects.
//!
//! `Value::kind()` is the runtime "type of" used by exact-kind matching.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::CoreError;
use crate::kind::Kind;
use crate::record::Record;
use crate::reflect::Reflect;

/// A runtime value that can be held by a field or class attribute.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent / null value.
    Null,
    /// Boolean value. Never treated as an integer.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string. Length is measured in characters.
    Str(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// A callable (function or method).
    Callable(Callable),
    /// A reflectable object with its own fields and kind.
    Object(Arc<dyn Reflect>),
}

impl Value {
    /// Returns the exact runtime kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Callable(_) => Kind::Callable,
            Value::Object(obj) => Kind::Record(obj.record_type()),
        }
    }

    /// Returns the numeric payload for `Int` and `Float` values only.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    /// Get as string slice if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list slice if this is a `List` value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the object if this is an `Object` value.
    pub fn as_object(&self) -> Option<&dyn Reflect> {
        match self {
            Value::Object(obj) => Some(obj.as_ref()),
            _ => None,
        }
    }

    /// Length of a sized value: characters for strings, items for lists.
    ///
    /// Returns `None` for values without a length.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Convert a JSON value.
    ///
    /// Objects become [`Record`]s of the generic kind, recursively, and
    /// object elements inside arrays are wrapped the same way.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::IntegerOutOfRange` for integers above `i64::MAX`.
    pub fn from_json(json: serde_json::Value) -> Result<Self, CoreError> {
        use serde_json::Value as Json;

        Ok(match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if n.is_u64() {
                    return Err(CoreError::IntegerOutOfRange(n.to_string()));
                } else {
                    // Every remaining JSON number is representable as f64.
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Json::Object(map) => Record::from_json_map(map)?.into_value(),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(fl) => write!(f, "{fl}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Callable(c) => write!(f, "<callable {}>", c.name()),
            Value::Object(obj) => write!(f, "<{} object>", obj.record_type().name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        r.into_value()
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// A numeric quantity used for range bounds and range checks.
///
/// Comparison is exact across kinds: an integer is never rounded to the
/// nearest `f64` before being compared with a float. NaN is unordered, so
/// it is neither below nor above any bound.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// Integer quantity.
    Int(i64),
    /// Floating-point quantity.
    Float(f64),
}

impl Number {
    /// Lossy conversion to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// 2^63, the first float above every `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

fn cmp_int_float(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_END {
        return Some(Ordering::Less);
    }
    if float < -I64_END {
        return Some(Ordering::Greater);
    }
    // In range, so the floor converts to i64 without loss.
    let floor = float.floor();
    Some(match int.cmp(&(floor as i64)) {
        Ordering::Equal if float > floor => Ordering::Less,
        ordering => ordering,
    })
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(fl) => write!(f, "{fl}"),
        }
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Number::Int(i64::from(i))
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Number::Int(i)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

// ---------------------------------------------------------------------------
// Callables
// ---------------------------------------------------------------------------

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A named callable value, such as a method stored on a record kind.
///
/// Validation only ever inspects its kind; the body exists so that fixtures
/// can carry real behavior.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<CallableFn>,
}

impl Callable {
    /// Wrap a function under a name.
    pub fn new(
        name: impl Into<Arc<str>>,
        func: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The callable's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("name", &self.name).finish()
    }
}
