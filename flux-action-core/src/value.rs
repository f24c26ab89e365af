//! Dynamic values passed through action creators
//!
//! Action creators accept any number of positional arguments and forward them
//! untouched to the payload and meta transforms. [`Value`] is the owned,
//! dynamically typed representation of one such argument. It mirrors the JSON
//! data model with one extra variant, [`Value::Error`], which marks a value as
//! a failure.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, Serializer};
use serde_json::Number;

/// A failure value carried as an action argument or payload
///
/// Passing an `ErrorValue` as the sole argument to an action creator flags
/// the resulting record with `error: true`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorValue {
    name: String,
    message: String,
}

impl ErrorValue {
    /// Create a generic error with name `"Error"`
    pub fn new(message: impl Into<String>) -> Self {
        Self::named("Error", message)
    }

    /// Create an error with an explicit name (e.g. `"TimeoutError"`)
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Capture any `std::error::Error` as an error value
    ///
    /// The name is the error's type name without its module path.
    ///
    /// ```
    /// use flux_action_core::value::ErrorValue;
    ///
    /// let err = "x".parse::<i32>().unwrap_err();
    /// let value = ErrorValue::from_error(&err);
    /// assert_eq!(value.name(), "ParseIntError");
    /// assert_eq!(value.message(), "invalid digit found in string");
    /// ```
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self {
            name: short_type_name::<E>().to_string(),
            message: err.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for ErrorValue {}

// "core::num::error::ParseIntError" -> "ParseIntError"
// "dyn core::error::Error + core::marker::Send" -> "Error"
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let full = full.strip_prefix("dyn ").unwrap_or(full);
    let base = full.split(|c: char| c == '<' || c == ' ').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// An action argument, payload or meta value
///
/// `Null` stands in for both `null` and "no value": the default identity
/// transform yields `Null` when called without arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Error(ErrorValue),
}

impl Value {
    /// Build an object from key/value pairs
    ///
    /// ```
    /// use flux_action_core::Value;
    ///
    /// let meta = Value::object([("id", Value::from("1")), ("v", Value::from("0.3.0"))]);
    /// assert_eq!(meta.get("v").and_then(Value::as_str), Some("0.3.0"));
    /// ```
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wrap a `std::error::Error` as [`Value::Error`]
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Value::Error(ErrorValue::from_error(err))
    }

    /// Whether this value carries the error capability
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key on an object value; `None` for any other variant
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Render as plain JSON
    ///
    /// Errors become `{"$error": {"name": ..., "message": ...}}` objects so
    /// that [`Value::from_tagged_json`] can tell them apart from ordinary
    /// objects. This is also the form produced by `Serialize`. The `$error`
    /// key is reserved: a plain object of that exact shape reads back as an
    /// error.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Value::Error(err) => serde_json::json!({
                (ERROR_TAG): {
                    "name": err.name,
                    "message": err.message,
                }
            }),
        }
    }

    /// Read JSON produced by [`Value::to_json`], restoring tagged errors
    ///
    /// Unlike `From<serde_json::Value>`, an object that is exactly
    /// `{"$error": {"name": <string>, "message": <string>}}` becomes a
    /// [`Value::Error`], at any depth.
    ///
    /// ```
    /// use flux_action_core::{ErrorValue, Value};
    ///
    /// let original = Value::from(vec![Value::from(1), ErrorValue::new("bad").into()]);
    /// assert_eq!(Value::from_tagged_json(original.to_json()), original);
    /// ```
    pub fn from_tagged_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_tagged_json).collect())
            }
            serde_json::Value::Object(map) => match tagged_error(&map) {
                Some(err) => Value::Error(err),
                None => Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, Value::from_tagged_json(v)))
                        .collect(),
                ),
            },
            other => Value::from(other),
        }
    }
}

/// Key wrapping an error value in its JSON form
pub const ERROR_TAG: &str = "$error";

fn tagged_error(map: &serde_json::Map<String, serde_json::Value>) -> Option<ErrorValue> {
    if map.len() != 1 {
        return None;
    }
    let inner = map.get(ERROR_TAG)?.as_object()?;
    if inner.len() != 2 {
        return None;
    }
    let name = inner.get("name")?.as_str()?;
    let message = inner.get("message")?.as_str()?;
    Some(ErrorValue::named(name, message))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error(err) => fmt::Display::fmt(err, f),
            other => fmt::Display::fmt(&other.to_json(), f),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become `Null`
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
