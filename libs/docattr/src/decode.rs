//! Driver-side decoding of wire attributes into untyped values.
//!
//! Produces exactly what `scan` expects to receive: numbers as `Float`,
//! number sets as `Floats`, lists as `Seq`, maps as `Object`.

use crate::attribute::AttributeValue;
use crate::error::{DocError, Result};
use crate::value::{Object, Value};

pub fn from_attribute_value(value: AttributeValue) -> Result<Value> {
    Ok(match value {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => Value::Float(parse_number(&n)?),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::B(b) => Value::Binary(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Ss(items) => Value::Strings(items),
        AttributeValue::Ns(items) => Value::Floats(
            items
                .iter()
                .map(|n| parse_number(n))
                .collect::<Result<_>>()?,
        ),
        AttributeValue::Bs(items) => Value::Blobs(items),
        AttributeValue::L(items) => Value::Seq(
            items
                .into_iter()
                .map(from_attribute_value)
                .collect::<Result<_>>()?,
        ),
        AttributeValue::M(entries) => Value::Object(from_attribute_map(entries)?),
    })
}

/// Decode the top-level item map a driver returns for one row.
pub fn from_attribute_map(
    entries: std::collections::BTreeMap<String, AttributeValue>,
) -> Result<Object> {
    entries
        .into_iter()
        .map(|(k, v)| Ok((k, from_attribute_value(v)?)))
        .collect()
}

fn parse_number(text: &str) -> Result<f64> {
    let n = text.trim().parse::<f64>()?;
    if !n.is_finite() {
        return Err(DocError::marshal(format!("number {text:?} is not finite")));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn numbers_arrive_as_floats() {
        assert_eq!(
            from_attribute_value(AttributeValue::N("3".into())).unwrap(),
            Value::Float(3.0)
        );
        assert_eq!(
            from_attribute_value(AttributeValue::Ns(vec!["1".into(), "2.5".into()])).unwrap(),
            Value::Floats(vec![1.0, 2.5])
        );
    }

    #[test]
    fn collections_arrive_raw() {
        let av = AttributeValue::L(vec![
            AttributeValue::S("a".into()),
            AttributeValue::M(
                [("k".to_string(), AttributeValue::Bool(true))]
                    .into_iter()
                    .collect(),
            ),
        ]);
        let expected = Value::Seq(vec![
            Value::from("a"),
            Value::Object([("k".to_string(), Value::Bool(true))].into_iter().collect()),
        ]);
        assert_eq!(from_attribute_value(av).unwrap(), expected);
    }

    #[test]
    fn malformed_number_is_a_marshal_error() {
        let err = from_attribute_value(AttributeValue::N("1,5".into())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Marshal);
    }
}
