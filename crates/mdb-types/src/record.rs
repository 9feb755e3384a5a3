//! JSON-backed records and absent-tolerant accessors.
//!
//! A [`Record`] is a JSON object. Nothing in the diff engine trusts the
//! shape of a record: every lookup goes through [`RecordExt`], which treats
//! a missing key, a `null`, and a value of the wrong type the same way
//! (`None`, or an empty collection).

use serde_json::Map;

use crate::error::{TypeError, TypeResult};
use crate::fields::CLIENT_GENERATED_MARKERS;

/// Any value that may appear in a record.
pub type Value = serde_json::Value;

/// A snapshot of an editorial entity: string keys to JSON values.
pub type Record = Map<String, Value>;

/// Truthiness in the sense used when pruning diffs: `null`, `false`, `0`,
/// the empty string, and empty arrays and objects carry no information.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy> Truthy for [T] {
    /// A collection is truthy when at least one element is.
    fn is_truthy(&self) -> bool {
        self.iter().any(Truthy::is_truthy)
    }
}

/// Duck-typed field access over records and record-shaped values.
pub trait RecordExt {
    /// The value stored under `key`, or `None` when absent or `null`.
    fn field(&self, key: &str) -> Option<&Value>;

    /// `key` as a string slice.
    fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// `key` as a float; integers are widened.
    fn f64_field(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(Value::as_f64)
    }

    /// `key` as a nested record.
    fn record_field(&self, key: &str) -> Option<&Record> {
        self.field(key).and_then(Value::as_object)
    }

    /// Walk nested records, e.g. `["contact", "title"]`.
    fn path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.field(first)?;
        for key in rest {
            current = current.field(key)?;
        }
        Some(current)
    }

    /// String at a nested path.
    fn path_str(&self, path: &[&str]) -> Option<&str> {
        self.path(path).and_then(Value::as_str)
    }

    /// The collection stored under `key`. Absent or non-array fields read as
    /// an empty collection.
    fn items(&self, key: &str) -> &[Value] {
        match self.field(key) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Whether `key` is present with a non-null value.
    fn has(&self, key: &str) -> bool {
        self.field(key).is_some()
    }
}

impl RecordExt for Record {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_null())
    }
}

impl RecordExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.field(key))
    }
}

/// Whether a value is a flat attribute (string, number or boolean) as
/// opposed to a nested record or collection.
pub fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Structural equality where numbers compare by value, so `1` and `1.0`
/// are the same. Arrays and objects compare element by element.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                x == y
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Borrow `value` as a record, failing with the caller's context otherwise.
pub fn as_record<'a>(value: &'a Value, context: &str) -> TypeResult<&'a Record> {
    value.as_object().ok_or_else(|| TypeError::NotARecord {
        context: context.to_string(),
        actual: kind_name(value).to_string(),
    })
}

/// Whether an identifier was invented by the REST client instead of being
/// assigned by the authority that owns it.
pub fn is_client_generated_id(res_id: &str) -> bool {
    CLIENT_GENERATED_MARKERS
        .iter()
        .any(|marker| res_id.contains(marker))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
