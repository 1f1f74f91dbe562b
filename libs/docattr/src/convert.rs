use std::collections::BTreeMap;

use crate::attribute::{AttributeValue, DocumentKind};
use crate::error::{DocError, Result};
use crate::value::Value;

/// Write-path conversion into the wire attribute tree.
///
/// Containers convert element-wise, derived documents field by field,
/// `Option` follows pointer semantics (`None` → `NULL`, `Some` converts
/// the pointee). Scalars are marshaled directly.
pub trait ToAttributeValue {
    fn to_attribute_value(&self) -> Result<AttributeValue>;
}

/// Convert and require the result to be the `kind` collection variant.
///
/// A mismatch is an error; there is no placeholder value to test against.
pub fn to_document_attribute<T: ToAttributeValue + ?Sized>(
    value: &T,
    kind: DocumentKind,
) -> Result<AttributeValue> {
    kind.expect(value.to_attribute_value()?)
}

/// Decimal text of a wire number. Non-finite values have no wire form.
pub(crate) fn format_number(v: f64) -> Result<String> {
    if !v.is_finite() {
        return Err(DocError::marshal(format!("number {v} is not representable")));
    }
    Ok(v.to_string())
}

impl ToAttributeValue for Value {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        match self {
            Value::Null => Ok(AttributeValue::null()),
            Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
            Value::Int(i) => Ok(AttributeValue::N(i.to_string())),
            Value::Float(f) => Ok(AttributeValue::N(format_number(*f)?)),
            Value::String(s) => Ok(AttributeValue::S(s.clone())),
            Value::Binary(b) => Ok(AttributeValue::B(b.clone())),
            // Raw slices convert the way the resolver would classify them.
            Value::Floats(items) => Ok(AttributeValue::Ns(
                items
                    .iter()
                    .map(|v| format_number(*v))
                    .collect::<Result<_>>()?,
            )),
            Value::Strings(items) => Ok(AttributeValue::Ss(items.clone())),
            Value::Blobs(items) => Ok(AttributeValue::Bs(items.clone())),
            Value::Seq(items) => Ok(AttributeValue::L(
                items
                    .iter()
                    .map(ToAttributeValue::to_attribute_value)
                    .collect::<Result<_>>()?,
            )),
            Value::Object(entries) => {
                let mut m = BTreeMap::new();
                for (k, v) in entries {
                    m.insert(k.clone(), v.to_attribute_value()?);
                }
                Ok(AttributeValue::M(m))
            }
            Value::Set(s) => s.to_attribute_value(),
            Value::List(l) => l.to_attribute_value(),
            Value::Map(m) => m.to_attribute_value(),
            Value::Attribute(av) => Ok(av.clone()),
        }
    }
}

impl ToAttributeValue for AttributeValue {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        Ok(self.clone())
    }
}

impl ToAttributeValue for str {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        Ok(AttributeValue::S(self.to_string()))
    }
}

impl ToAttributeValue for String {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        Ok(AttributeValue::S(self.clone()))
    }
}

impl ToAttributeValue for bool {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        Ok(AttributeValue::Bool(*self))
    }
}

impl ToAttributeValue for Vec<u8> {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        Ok(AttributeValue::B(self.clone()))
    }
}

impl ToAttributeValue for f64 {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        Ok(AttributeValue::N(format_number(*self)?))
    }
}

impl ToAttributeValue for f32 {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        if !self.is_finite() {
            return Err(DocError::marshal(format!("number {self} is not representable")));
        }
        Ok(AttributeValue::N(self.to_string()))
    }
}

macro_rules! integer_to_attribute {
    ($($t:ty),*) => {
        $(
            impl ToAttributeValue for $t {
                fn to_attribute_value(&self) -> Result<AttributeValue> {
                    Ok(AttributeValue::N(self.to_string()))
                }
            }
        )*
    };
}

integer_to_attribute!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: ToAttributeValue> ToAttributeValue for Option<T> {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        match self {
            None => Ok(AttributeValue::null()),
            Some(inner) => inner.to_attribute_value(),
        }
    }
}

impl<T: ToAttributeValue + ?Sized> ToAttributeValue for Box<T> {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        (**self).to_attribute_value()
    }
}

impl<T: ToAttributeValue + ?Sized> ToAttributeValue for &T {
    fn to_attribute_value(&self) -> Result<AttributeValue> {
        (**self).to_attribute_value()
    }
}
