use std::collections::BTreeMap;

use crate::attribute::AttributeValue;
use crate::list::List;
use crate::map::Map;
use crate::set::{AnySet, Set, SetElement};

/// Generic string-keyed map as delivered by a driver.
pub type Object = BTreeMap<String, Value>;

/// Untyped document value.
///
/// One type covers both what a driver hands to `scan` and what containers
/// hold after resolution:
/// - Scalars: no dedicated container, carried as-is.
/// - `Floats`, `Strings`, `Blobs`: homogeneous slices as the driver delivers
///   them, candidates for set resolution.
/// - `Seq`, `Object`: raw generic collections, resolved into `List` / `Map`.
/// - `Set`, `List`, `Map`: resolved containers.
/// - `Attribute`: an already-encoded wire value, e.g. a structured document
///   placed inside a list.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Driver numbers always arrive as `Float`.
    Float(f64),
    String(String),
    Binary(Vec<u8>),

    Floats(Vec<f64>),
    Strings(Vec<String>),
    Blobs(Vec<Vec<u8>>),

    Seq(Vec<Value>),
    Object(Object),

    Set(AnySet),
    List(List),
    Map(Map),

    Attribute(AttributeValue),
}

impl Value {
    /// Shape name used in incompatibility errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::Floats(_) => "float slice",
            Value::Strings(_) => "string slice",
            Value::Blobs(_) => "binary slice",
            Value::Seq(_) => "sequence",
            Value::Object(_) => "object",
            Value::Set(s) => s.kind_name(),
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Attribute(_) => "attribute",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&AnySet> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::Floats(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::Strings(v)
    }
}

impl From<Vec<Vec<u8>>> for Value {
    fn from(v: Vec<Vec<u8>>) -> Self {
        Value::Blobs(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Value::List(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl From<AnySet> for Value {
    fn from(v: AnySet) -> Self {
        Value::Set(v)
    }
}

impl<T: SetElement> From<Set<T>> for Value {
    fn from(v: Set<T>) -> Self {
        Value::Set(T::into_any(v))
    }
}

impl From<AttributeValue> for Value {
    fn from(v: AttributeValue) -> Self {
        Value::Attribute(v)
    }
}

/// A JSON document read as an untyped driver value.
///
/// Numbers become `Float` (`Null` if no finite `f64` represents them),
/// arrays `Seq`, objects `Object`. JSON has no typed slices, so arrays
/// never resolve to sets on their own.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .or_else(|| n.to_string().parse().ok())
                .filter(|f: &f64| f.is_finite())
                .map_or(Value::Null, Value::Float),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
