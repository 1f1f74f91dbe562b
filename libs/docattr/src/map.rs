use std::ops::Deref;

use crate::attribute::{AttributeValue, DocumentKind};
use crate::convert::{ToAttributeValue, to_document_attribute};
use crate::error::{DocError, Result};
use crate::resolve::resolve_in_map;
use crate::scan::{DataType, Scan};
use crate::value::{Object, Value};

/// Document store map type: string keys, heterogeneous values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(Object);

impl Map {
    pub fn new() -> Self {
        Map(Object::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn into_inner(self) -> Object {
        self.0
    }

    /// Wire value narrowed to the map variant.
    pub fn value(&self) -> Result<AttributeValue> {
        to_document_attribute(self, DocumentKind::M)
    }
}

impl Deref for Map {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.0
    }
}

impl From<Object> for Map {
    fn from(entries: Object) -> Self {
        Map(entries)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Scan for Map {
    fn scan(&mut self, value: Value) -> Result<()> {
        if !self.0.is_empty() {
            return Err(DocError::AlreadyPopulated);
        }
        let entries = match value {
            Value::Object(entries) => entries,
            Value::Map(map) => map.into_inner(),
            other => {
                self.0 = Object::new();
                return Err(DocError::cast("object", other.kind_name()));
            }
        };
        self.0 = entries;
        if let Err(e) = resolve_in_map(&mut self.0) {
            tracing::debug!(error = %e, "nested resolution failed, map reset");
            self.0 = Object::new();
            return Err(e);
        }
        Ok(())
    }
}

impl ToAttributeValue for Map {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        let mut entries = std::collections::BTreeMap::new();
        for (k, v) in &self.0 {
            entries.insert(k.clone(), v.to_attribute_value()?);
        }
        Ok(AttributeValue::M(entries))
    }
}

impl DataType for Map {
    fn data_type(&self) -> &'static str {
        "M"
    }
}
