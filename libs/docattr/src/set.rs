//! Homogeneous primitive sets.
//!
//! `Set<T>` is generic over the four element kinds the wire format can carry
//! as a set. The element kinds form a closed family: `SetElement` is sealed,
//! and `AnySet` is the tagged union used wherever the kind is only known at
//! runtime (inside `List` / `Map`).

use std::fmt::Debug;
use std::ops::Deref;

use crate::attribute::{AttributeValue, DocumentKind};
use crate::convert::{ToAttributeValue, format_number, to_document_attribute};
use crate::error::{DocError, Result};
use crate::scan::{DataType, Scan};
use crate::value::Value;

mod sealed {
    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for Vec<u8> {}
}

/// Element kinds a `Set` supports: `String`, `i64`, `f64`, `Vec<u8>`.
pub trait SetElement: sealed::Sealed + Clone + PartialEq + Debug + Sized {
    /// Wire type descriptor: `"SS"`, `"NS"` or `"BS"`.
    const DATA_TYPE: &'static str;

    const DOCUMENT_KIND: DocumentKind;

    /// Whether a raw driver value can populate a set of this kind.
    fn is_compatible(value: &Value) -> bool;

    /// Validate and convert every element. Nothing is produced unless the
    /// whole input is acceptable. Already-resolved sets are accepted too.
    fn scan_elements(value: Value) -> Result<Vec<Self>>;

    fn to_attribute(items: &[Self]) -> Result<AttributeValue>;

    fn into_any(set: Set<Self>) -> AnySet;
}

/// `floor(v) == v`, restricted to values an `i64` can hold.
pub(crate) fn is_whole(v: f64) -> bool {
    v.is_finite() && v.floor() == v && v >= i64::MIN as f64 && v < i64::MAX as f64
}

impl SetElement for String {
    const DATA_TYPE: &'static str = "SS";
    const DOCUMENT_KIND: DocumentKind = DocumentKind::Ss;

    fn is_compatible(value: &Value) -> bool {
        matches!(value, Value::Strings(_))
    }

    fn scan_elements(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Strings(items) => Ok(items),
            Value::Set(AnySet::String(set)) => Ok(set.into_vec()),
            _ => Err(DocError::IncompatibleStringSlice),
        }
    }

    fn to_attribute(items: &[Self]) -> Result<AttributeValue> {
        Ok(AttributeValue::Ss(items.to_vec()))
    }

    fn into_any(set: Set<Self>) -> AnySet {
        AnySet::String(set)
    }
}

impl SetElement for i64 {
    const DATA_TYPE: &'static str = "NS";
    const DOCUMENT_KIND: DocumentKind = DocumentKind::Ns;

    fn is_compatible(value: &Value) -> bool {
        matches!(value, Value::Floats(items) if items.iter().all(|v| is_whole(*v)))
    }

    fn scan_elements(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Floats(items) if items.iter().all(|v| is_whole(*v)) => {
                Ok(items.into_iter().map(|v| v as i64).collect())
            }
            Value::Set(AnySet::Int(set)) => Ok(set.into_vec()),
            Value::Set(AnySet::Float(set)) if set.iter().all(|v| is_whole(*v)) => {
                Ok(set.iter().map(|v| *v as i64).collect())
            }
            _ => Err(DocError::IncompatibleIntSlice),
        }
    }

    fn to_attribute(items: &[Self]) -> Result<AttributeValue> {
        Ok(AttributeValue::Ns(items.iter().map(i64::to_string).collect()))
    }

    fn into_any(set: Set<Self>) -> AnySet {
        AnySet::Int(set)
    }
}

impl SetElement for f64 {
    const DATA_TYPE: &'static str = "NS";
    const DOCUMENT_KIND: DocumentKind = DocumentKind::Ns;

    fn is_compatible(value: &Value) -> bool {
        matches!(value, Value::Floats(_))
    }

    fn scan_elements(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Floats(items) => Ok(items),
            Value::Set(AnySet::Float(set)) => Ok(set.into_vec()),
            // Whole-number float slices resolve to int sets.
            Value::Set(AnySet::Int(set)) => Ok(set.iter().map(|v| *v as f64).collect()),
            _ => Err(DocError::IncompatibleFloatSlice),
        }
    }

    fn to_attribute(items: &[Self]) -> Result<AttributeValue> {
        let numbers = items
            .iter()
            .map(|v| format_number(*v))
            .collect::<Result<Vec<_>>>()?;
        Ok(AttributeValue::Ns(numbers))
    }

    fn into_any(set: Set<Self>) -> AnySet {
        AnySet::Float(set)
    }
}

impl SetElement for Vec<u8> {
    const DATA_TYPE: &'static str = "BS";
    const DOCUMENT_KIND: DocumentKind = DocumentKind::Bs;

    fn is_compatible(value: &Value) -> bool {
        matches!(value, Value::Blobs(_))
    }

    fn scan_elements(value: Value) -> Result<Vec<Self>> {
        match value {
            Value::Blobs(items) => Ok(items),
            Value::Set(AnySet::Binary(set)) => Ok(set.into_vec()),
            _ => Err(DocError::IncompatibleBinarySlice),
        }
    }

    fn to_attribute(items: &[Self]) -> Result<AttributeValue> {
        Ok(AttributeValue::Bs(items.to_vec()))
    }

    fn into_any(set: Set<Self>) -> AnySet {
        AnySet::Binary(set)
    }
}

/// Document store set type. Ordered in memory, an unordered bag on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Set<T>(Vec<T>);

impl<T: SetElement> Set<T> {
    pub fn new() -> Self {
        Set(Vec::new())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T: SetElement> Default for Set<T> {
    fn default() -> Self {
        Set::new()
    }
}

impl<T> Deref for Set<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: SetElement> From<Vec<T>> for Set<T> {
    fn from(items: Vec<T>) -> Self {
        Set(items)
    }
}

impl<T: SetElement> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Set(iter.into_iter().collect())
    }
}

impl<T: SetElement> Scan for Set<T> {
    /// A non-empty receiver is never touched. `Null` leaves it empty.
    /// Any element mismatch resets the receiver and reports the kind's
    /// incompatibility error.
    fn scan(&mut self, value: Value) -> Result<()> {
        if !self.0.is_empty() {
            return Err(DocError::AlreadyPopulated);
        }
        if value.is_null() {
            self.0 = Vec::new();
            return Ok(());
        }
        match T::scan_elements(value) {
            Ok(items) => {
                self.0 = items;
                Ok(())
            }
            Err(e) => {
                self.0 = Vec::new();
                Err(e)
            }
        }
    }
}

impl<T: SetElement> ToAttributeValue for Set<T> {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        T::to_attribute(&self.0)
    }
}

impl<T: SetElement> DataType for Set<T> {
    fn data_type(&self) -> &'static str {
        T::DATA_TYPE
    }
}

impl<T: SetElement> Set<T> {
    /// Wire value narrowed to this kind's set variant.
    pub fn value(&self) -> Result<AttributeValue> {
        to_document_attribute(self, T::DOCUMENT_KIND)
    }
}

/// A set whose element kind is known only at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AnySet {
    String(Set<String>),
    Int(Set<i64>),
    Float(Set<f64>),
    Binary(Set<Vec<u8>>),
}

impl AnySet {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnySet::String(_) => "string set",
            AnySet::Int(_) => "int set",
            AnySet::Float(_) => "float set",
            AnySet::Binary(_) => "binary set",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnySet::String(s) => s.len(),
            AnySet::Int(s) => s.len(),
            AnySet::Float(s) => s.len(),
            AnySet::Binary(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ToAttributeValue for AnySet {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        match self {
            AnySet::String(s) => s.to_attribute_value(),
            AnySet::Int(s) => s.to_attribute_value(),
            AnySet::Float(s) => s.to_attribute_value(),
            AnySet::Binary(s) => s.to_attribute_value(),
        }
    }
}

impl DataType for AnySet {
    fn data_type(&self) -> &'static str {
        match self {
            AnySet::String(s) => s.data_type(),
            AnySet::Int(s) => s.data_type(),
            AnySet::Float(s) => s.data_type(),
            AnySet::Binary(s) => s.data_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn scan_int_set_from_whole_floats() {
        let mut s = Set::<i64>::new();
        s.scan(Value::Floats(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(s.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn scan_int_set_rejects_fraction_without_partial_append() {
        let mut s = Set::<i64>::new();
        let err = s.scan(Value::Floats(vec![1.0, 2.5, 3.0])).unwrap_err();
        assert_eq!(err, DocError::IncompatibleIntSlice);
        assert!(s.is_empty());
    }

    #[test]
    fn scan_rejects_wrong_shape() {
        let mut s = Set::<String>::new();
        assert_eq!(
            s.scan(Value::Floats(vec![1.0])).unwrap_err(),
            DocError::IncompatibleStringSlice
        );
        let mut b = Set::<Vec<u8>>::new();
        assert_eq!(
            b.scan(Value::Strings(vec!["a".into()])).unwrap_err().kind(),
            ErrorKind::SetElementIncompatible(crate::error::SetElementKind::Binary)
        );
        let mut f = Set::<f64>::new();
        assert_eq!(
            f.scan(Value::String("x".into())).unwrap_err(),
            DocError::IncompatibleFloatSlice
        );
    }

    #[test]
    fn scan_null_leaves_empty() {
        let mut s = Set::<f64>::new();
        s.scan(Value::Null).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn populated_set_refuses_second_scan() {
        let mut s = Set::<String>::from(vec!["a".to_string()]);
        let err = s.scan(Value::Strings(vec!["b".into()])).unwrap_err();
        assert_eq!(err, DocError::AlreadyPopulated);
        assert_eq!(s.as_slice(), &["a".to_string()]);
    }

    #[test]
    fn scan_accepts_resolved_sets() {
        let mut floats = Set::<f64>::new();
        floats
            .scan(Value::from(Set::<i64>::from(vec![1, 2])))
            .unwrap();
        assert_eq!(floats.as_slice(), &[1.0, 2.0]);

        let mut strings = Set::<String>::new();
        strings
            .scan(Value::from(Set::<String>::from(vec!["a".to_string()])))
            .unwrap();
        assert_eq!(strings.as_slice(), &["a".to_string()]);

        let mut ints = Set::<i64>::new();
        let err = ints
            .scan(Value::from(Set::<f64>::from(vec![1.5])))
            .unwrap_err();
        assert_eq!(err, DocError::IncompatibleIntSlice);
        assert!(ints.is_empty());

        let mut populated = Set::<i64>::from(vec![9]);
        let err = populated
            .scan(Value::from(Set::<i64>::from(vec![1])))
            .unwrap_err();
        assert_eq!(err, DocError::AlreadyPopulated);
    }

    #[test]
    fn whole_number_bounds() {
        assert!(is_whole(-3.0));
        assert!(!is_whole(f64::NAN));
        assert!(!is_whole(f64::INFINITY));
        assert!(!is_whole(1e19));
    }

    #[test]
    fn value_and_data_type() {
        let ints = Set::<i64>::from(vec![1, 2]);
        assert_eq!(
            ints.value().unwrap(),
            AttributeValue::Ns(vec!["1".into(), "2".into()])
        );
        assert_eq!(ints.data_type(), "NS");

        let floats = Set::<f64>::from(vec![1.5, 3.0]);
        assert_eq!(
            floats.value().unwrap(),
            AttributeValue::Ns(vec!["1.5".into(), "3".into()])
        );

        let bins = Set::<Vec<u8>>::from(vec![b"x".to_vec()]);
        assert_eq!(bins.data_type(), "BS");
        assert_eq!(bins.value().unwrap(), AttributeValue::Bs(vec![b"x".to_vec()]));

        let strs = Set::<String>::new();
        assert_eq!(strs.data_type(), "SS");
        assert_eq!(strs.value().unwrap(), AttributeValue::Ss(vec![]));
    }

    #[test]
    fn non_finite_float_fails_to_convert() {
        let s = Set::<f64>::from(vec![f64::NAN]);
        assert_eq!(s.value().unwrap_err().kind(), ErrorKind::Marshal);
    }
}
