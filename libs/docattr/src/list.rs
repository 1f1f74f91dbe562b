use std::ops::Deref;

use crate::attribute::{AttributeValue, DocumentKind};
use crate::convert::{ToAttributeValue, to_document_attribute};
use crate::error::{DocError, Result};
use crate::resolve::resolve_in_list;
use crate::scan::{DataType, Scan};
use crate::value::Value;

/// Document store list type: an ordered, heterogeneous sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List(Vec<Value>);

impl List {
    pub fn new() -> Self {
        List(Vec::new())
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }

    /// Wire value narrowed to the list variant.
    pub fn value(&self) -> Result<AttributeValue> {
        to_document_attribute(self, DocumentKind::L)
    }
}

impl Deref for List {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        List(items)
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List(iter.into_iter().collect())
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Scan for List {
    fn scan(&mut self, value: Value) -> Result<()> {
        if !self.0.is_empty() {
            return Err(DocError::AlreadyPopulated);
        }
        let items = match value {
            Value::Seq(items) => items,
            Value::List(list) => list.into_vec(),
            other => return Err(DocError::cast("sequence", other.kind_name())),
        };
        self.0 = items;
        if let Err(e) = resolve_in_list(&mut self.0) {
            tracing::debug!(error = %e, "nested resolution failed, list reset");
            self.0 = Vec::new();
            return Err(e);
        }
        Ok(())
    }
}

impl ToAttributeValue for List {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        let items = self
            .0
            .iter()
            .map(ToAttributeValue::to_attribute_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(AttributeValue::L(items))
    }
}

impl DataType for List {
    fn data_type(&self) -> &'static str {
        "L"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::map::Map;
    use crate::set::Set;
    use pretty_assertions::assert_eq;

    fn object(entries: &[(&str, Value)]) -> Value {
        Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn scan_empty_sequence() {
        let mut l = List::new();
        l.scan(Value::Seq(vec![])).unwrap();
        assert_eq!(l, List::new());
    }

    #[test]
    fn scan_keeps_scalars() {
        let mut l = List::new();
        l.scan(Value::Seq(vec![Value::Float(1.0), Value::from("2")]))
            .unwrap();
        assert_eq!(l, List::from(vec![Value::Float(1.0), Value::from("2")]));
    }

    #[test]
    fn scan_resolves_nested_map() {
        let mut l = List::new();
        l.scan(Value::Seq(vec![object(&[("a", Value::Float(1.0))])]))
            .unwrap();

        let mut expected = Map::new();
        expected.insert("a", Value::Float(1.0));
        assert_eq!(l, List::from(vec![Value::Map(expected)]));
    }

    #[test]
    fn populated_list_is_left_untouched() {
        let mut l = List::from(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let err = l.scan(Value::Seq(vec![Value::from(4)])).unwrap_err();
        assert_eq!(err, DocError::AlreadyPopulated);
        assert_eq!(
            l,
            List::from(vec![Value::from(1), Value::from(2), Value::from(3)])
        );
    }

    #[test]
    fn non_sequence_fails_to_cast() {
        let mut l = List::new();
        let err = l.scan(Value::from("non-slice")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cast);
        assert!(l.is_empty());
    }

    #[test]
    fn scan_accepts_a_resolved_list() {
        let resolved = List::from(vec![
            Value::from(Set::<i64>::from(vec![1])),
            Value::from("a"),
        ]);
        let mut l = List::new();
        l.scan(Value::List(resolved.clone())).unwrap();
        assert_eq!(l, resolved);

        let err = l.scan(Value::List(resolved)).unwrap_err();
        assert_eq!(err, DocError::AlreadyPopulated);
    }

    #[test]
    fn value_renders_scalars_and_sets() {
        let l = List::from(vec![
            Value::from(1),
            Value::from("2"),
            Value::from(Set::<String>::from(vec!["x".to_string()])),
        ]);
        assert_eq!(
            l.value().unwrap(),
            AttributeValue::L(vec![
                AttributeValue::N("1".into()),
                AttributeValue::S("2".into()),
                AttributeValue::Ss(vec!["x".into()]),
            ])
        );
        assert_eq!(l.data_type(), "L");
    }
}
