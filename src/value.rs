//! Dynamic, record-shaped state values.
//!
//! The lens algebra is generic over the state type, but the record-oriented
//! constructors ([`prop`](crate::prop), [`at`](crate::at),
//! [`path`](crate::path)) need a concrete dynamic value to focus into.
//! `Value` fills that role: an immutable tree whose containers sit behind
//! `Arc`, so cloning is cheap at every node and an updated record shares the
//! storage of each field it did not touch.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Field map backing [`Value::Record`].
pub type Fields = BTreeMap<String, Value>;

/// An immutable, structurally shared dynamic value.
///
/// # Examples
///
/// ```
/// use refract::Value;
///
/// let state = Value::record([
///     ("count", Value::Int(0)),
///     ("name", Value::from("a")),
/// ]);
///
/// assert!(state.is_record());
/// assert_eq!(state.get("count"), Some(&Value::Int(0)));
///
/// // Replacing one field shares the storage of every other field.
/// let next = state.with_field("count", Value::Int(1));
/// assert!(state.get("name").unwrap().ptr_eq(next.get("name").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Absent or unset. Reading a missing focus yields `Null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// Immutable string.
    String(Arc<str>),
    /// Ordered sequence of values.
    List(Arc<Vec<Value>>),
    /// Named fields, ordered by key.
    Record(Arc<Fields>),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Fields> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up a record field by name.
    ///
    /// Returns `None` when the field is absent or the value is not a record.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Looks up a list element by position.
    ///
    /// Returns `None` when the index is out of range or the value is not a
    /// list.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Value> {
        match self {
            Self::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Builds a record value from an iterator of field pairs.
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Record(Arc::new(
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Builds a list value from an iterator of values.
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::List(Arc::new(items.into_iter().collect()))
    }

    /// Returns a record with `name` bound to `value`, sharing every other
    /// field with `self`.
    ///
    /// Called on a non-record, the result is a record holding just this
    /// field.
    #[must_use]
    pub fn with_field(&self, name: impl Into<String>, value: Self) -> Self {
        let mut fields = match self {
            Self::Record(existing) => Fields::clone(existing),
            _ => Fields::new(),
        };
        fields.insert(name.into(), value);
        Self::Record(Arc::new(fields))
    }

    /// Returns a list with the element at `index` replaced by `value`,
    /// sharing every other element with `self`.
    ///
    /// Out-of-range indices pad the list with [`Value::Null`] up to `index`
    /// so the written value always reads back. Called on a non-list, the
    /// result is a fresh list.
    #[must_use]
    pub fn with_index(&self, index: usize, value: Self) -> Self {
        let mut items = match self {
            Self::List(existing) => Vec::clone(existing),
            _ => Vec::new(),
        };
        if index < items.len() {
            items[index] = value;
        } else {
            items.resize(index, Self::Null);
            items.push(value);
        }
        Self::List(Arc::new(items))
    }

    /// Reports whether two values share storage.
    ///
    /// Containers and strings compare by allocation identity, scalars by
    /// value. This is the observable behind structural sharing: a field an
    /// update did not touch is `ptr_eq` to its pre-update self, not merely
    /// equal to it.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => Arc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Arc::from(v.as_str()))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::String(Arc::from(s.as_str())),
            serde_json::Value::Array(items) => {
                Self::list(items.into_iter().map(Self::from))
            }
            serde_json::Value::Object(fields) => {
                Self::record(fields.into_iter().map(|(k, v)| (k, Self::from(v))))
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Int(i) => Self::from(*i),
            Value::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(Self::Null, Self::Number)
            }
            Value::String(s) => Self::String(s.to_string()),
            Value::List(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Record(fields) => Self::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variants() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Int(7).as_float(), Some(7.0));
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from("abc").as_int(), None);

        let list = Value::list([Value::Int(1), Value::Int(2)]);
        assert_eq!(list.as_list().map(<[Value]>::len), Some(2));
        assert_eq!(list.index(1), Some(&Value::Int(2)));
        assert_eq!(list.index(2), None);

        let rec = Value::record([("a", Value::Int(1))]);
        assert_eq!(rec.get("a"), Some(&Value::Int(1)));
        assert_eq!(rec.get("b"), None);
        assert_eq!(Value::Null.get("a"), None);
    }

    #[test]
    fn with_field_shares_untouched_fields() {
        let nested = Value::record([("x", Value::Int(1))]);
        let state = Value::record([
            ("keep", nested.clone()),
            ("count", Value::Int(0)),
        ]);

        let next = state.with_field("count", Value::Int(5));

        assert_eq!(next.get("count"), Some(&Value::Int(5)));
        assert_eq!(state.get("count"), Some(&Value::Int(0)));
        assert!(state.get("keep").unwrap().ptr_eq(next.get("keep").unwrap()));
    }

    #[test]
    fn with_field_on_non_record_yields_single_field_record() {
        let next = Value::Int(3).with_field("a", Value::Bool(true));
        assert_eq!(next, Value::record([("a", Value::Bool(true))]));
    }

    #[test]
    fn with_index_replaces_and_pads() {
        let list = Value::list([Value::Int(1), Value::Int(2)]);

        let replaced = list.with_index(0, Value::Int(9));
        assert_eq!(replaced.index(0), Some(&Value::Int(9)));
        assert_eq!(replaced.index(1), Some(&Value::Int(2)));

        let padded = list.with_index(4, Value::Int(9));
        assert_eq!(padded.as_list().map(<[Value]>::len), Some(5));
        assert_eq!(padded.index(2), Some(&Value::Null));
        assert_eq!(padded.index(4), Some(&Value::Int(9)));
    }

    #[test]
    fn ptr_eq_distinguishes_storage_from_equality() {
        let a = Value::record([("x", Value::Int(1))]);
        let b = Value::record([("x", Value::Int(1))]);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn serde_round_trip_preserves_structure() {
        let state = Value::record([
            ("flag", Value::Bool(true)),
            ("items", Value::list([Value::Int(1), Value::from("two")])),
            ("nested", Value::record([("f", Value::Float(1.5))])),
        ]);

        let json = serde_json::to_string(&state).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn json_conversions_round_trip() {
        let json = serde_json::json!({
            "count": 2,
            "name": "a",
            "items": [1, 2.5, null, {"k": true}],
        });

        let value = Value::from(json.clone());
        assert_eq!(value.get("count"), Some(&Value::Int(2)));
        assert_eq!(serde_json::Value::from(&value), json);
    }
}
