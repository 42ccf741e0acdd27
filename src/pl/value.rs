//! Values stored in a PL document's data tree
//!
//! Every key in the `data` section holds a [`Value`]. Scalars come either from literal
//! evaluation of the raw text (`key = 3`, `key = "text"`, `key = [1, 2]`) or from JSON
//! decoding (`key % {"a": 1}`). Intermediate segments of dotted keys are [`Mapping`]s.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A nested mapping from key to value. Ordered so that serialized output is stable.
pub type Mapping = BTreeMap<String, Value>;

/// A value in the data tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Mapping(Mapping),
}

/// Raised when append/prepend is applied to a pair of values that cannot be concatenated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatError {
    pub existing: &'static str,
    pub incoming: &'static str,
}

impl fmt::Display for ConcatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot concatenate {} with existing {}",
            self.incoming, self.existing
        )
    }
}

impl std::error::Error for ConcatError {}

impl Value {
    /// Human readable name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    /// Look up a dotted path (`"a.b.c"`) starting from this value.
    ///
    /// Returns `None` as soon as a segment is missing or traverses a non-mapping.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |current, segment| match current {
            Value::Mapping(m) => m.get(segment),
            _ => None,
        })
    }

    /// Replace `self` with `self + other`.
    ///
    /// Strings concatenate, lists extend. Anything else is refused and `self` is left untouched.
    pub fn append(&mut self, other: Value) -> Result<(), ConcatError> {
        match (self, other) {
            (Value::String(existing), Value::String(tail)) => {
                existing.push_str(&tail);
                Ok(())
            }
            (Value::List(existing), Value::List(tail)) => {
                existing.extend(tail);
                Ok(())
            }
            (existing, other) => Err(ConcatError {
                existing: existing.kind_name(),
                incoming: other.kind_name(),
            }),
        }
    }

    /// Replace `self` with `other + self`.
    pub fn prepend(&mut self, other: Value) -> Result<(), ConcatError> {
        match (self, other) {
            (Value::String(existing), Value::String(mut head)) => {
                head.push_str(existing);
                *existing = head;
                Ok(())
            }
            (Value::List(existing), Value::List(mut head)) => {
                head.append(existing);
                *existing = head;
                Ok(())
            }
            (existing, other) => Err(ConcatError {
                existing: existing.kind_name(),
                incoming: other.kind_name(),
            }),
        }
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

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX and every non-integer end up here
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Mapping(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_strings() {
        let mut value = Value::from("X");
        value.append(Value::from("Y")).unwrap();
        assert_eq!(value, Value::from("XY"));
    }

    #[test]
    fn test_prepend_strings() {
        let mut value = Value::from("X");
        value.prepend(Value::from("Y")).unwrap();
        assert_eq!(value, Value::from("YX"));
    }

    #[test]
    fn test_append_and_prepend_lists() {
        let mut value = Value::List(vec![Value::Integer(2)]);
        value.append(Value::List(vec![Value::Integer(3)])).unwrap();
        value.prepend(Value::List(vec![Value::Integer(1)])).unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
        );
    }

    #[test]
    fn test_mismatched_concat_is_refused() {
        let mut value = Value::from("abc");
        let err = value.append(Value::Integer(1)).unwrap_err();
        assert_eq!(err.existing, "string");
        assert_eq!(err.incoming, "integer");
        assert_eq!(value, Value::from("abc"));

        let mut value = Value::Integer(1);
        assert!(value.prepend(Value::Integer(2)).is_err());
    }

    #[test]
    fn test_get_path() {
        let mut inner = Mapping::new();
        inner.insert("c".into(), Value::Integer(1));
        let mut outer = Mapping::new();
        outer.insert("b".into(), Value::Mapping(inner));
        let root = Value::Mapping(outer);

        assert_eq!(root.get_path("b.c"), Some(&Value::Integer(1)));
        assert_eq!(root.get_path("b.x"), None);
        assert_eq!(root.get_path("b.c.d"), None);
    }

    #[test]
    fn test_from_json() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"a": 1, "b": [true, null, 1.5, "s"]}"#).unwrap();
        let value = Value::from(json);
        assert_eq!(value.get_path("a"), Some(&Value::Integer(1)));
        assert_eq!(
            value.get_path("b"),
            Some(&Value::List(vec![
                Value::Bool(true),
                Value::Null,
                Value::Float(1.5),
                Value::from("s"),
            ]))
        );
    }

    #[test]
    fn test_serializes_untagged() {
        let mut m = Mapping::new();
        m.insert("k".into(), Value::List(vec![Value::Integer(1), Value::Null]));
        let json = serde_json::to_string(&Value::Mapping(m)).unwrap();
        assert_eq!(json, r#"{"k":[1,null]}"#);
    }
}
