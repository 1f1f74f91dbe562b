use std::ops::Deref;

use crate::assign::{Assign, Document, decode_document};
use crate::attribute::{AttributeValue, DocumentKind};
use crate::convert::{ToAttributeValue, to_document_attribute};
use crate::error::{DocError, Result};
use crate::options::Options;
use crate::scan::{DataType, Scan};
use crate::value::Value;

/// List whose elements all decode into one document type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedList<T>(Vec<T>);

impl<T> TypedList<T> {
    pub fn new() -> Self {
        TypedList(Vec::new())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }
}

impl<T> Default for TypedList<T> {
    fn default() -> Self {
        TypedList::new()
    }
}

impl<T> Deref for TypedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for TypedList<T> {
    fn from(items: Vec<T>) -> Self {
        TypedList(items)
    }
}

impl<T> FromIterator<T> for TypedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TypedList(iter.into_iter().collect())
    }
}

impl<T: Document + Default> TypedList<T> {
    /// Scan with explicit assignment options.
    ///
    /// Every element must be an object (raw or resolved); each one is
    /// decoded into a fresh `T`. Any failure resets the receiver.
    pub fn scan_with(&mut self, value: Value, options: &Options) -> Result<()> {
        if !self.0.is_empty() {
            return Err(DocError::AlreadyPopulated);
        }
        let items = match value {
            Value::Seq(items) => items,
            Value::List(list) => list.into_vec(),
            other => return Err(DocError::cast("sequence", other.kind_name())),
        };
        self.0.reserve(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let decoded = match item {
                Value::Object(fields) => decode_document::<T>(fields, options),
                Value::Map(map) => decode_document::<T>(map.into_inner(), options),
                other => Err(DocError::cast("object", other.kind_name())),
            };
            match decoded {
                Ok(doc) => self.0.push(doc),
                Err(e) => {
                    tracing::debug!(index, error = %e, "typed list element failed, list reset");
                    self.0 = Vec::new();
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

impl<T: Document + Default> Scan for TypedList<T> {
    fn scan(&mut self, value: Value) -> Result<()> {
        self.scan_with(value, &Options::default())
    }
}

impl<T: Document + Default> Assign for TypedList<T> {
    fn assign(&mut self, value: Value, options: &Options) -> Result<()> {
        self.scan_with(value, options)
    }
}

impl<T: ToAttributeValue> ToAttributeValue for TypedList<T> {
    /// Every element must materialize as a wire map.
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        let items = self
            .0
            .iter()
            .map(|item| to_document_attribute(item, DocumentKind::M))
            .collect::<Result<Vec<_>>>()?;
        Ok(AttributeValue::L(items))
    }
}

impl<T: ToAttributeValue> TypedList<T> {
    pub fn value(&self) -> Result<AttributeValue> {
        to_document_attribute(self, DocumentKind::L)
    }
}

impl<T> DataType for TypedList<T> {
    fn data_type(&self) -> &'static str {
        "L"
    }
}
