//! JSON attribute-value notation.
//!
//! The byte-level encoding of an `AttributeValue` tree, as a driver would
//! send it: `{"M":{"a":{"N":"1"}}}`. Binary payloads are base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::attribute::AttributeValue;
use crate::error::Result;

pub fn to_json(value: &AttributeValue) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

pub fn to_json_string(value: &AttributeValue) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn from_json_str(s: &str) -> Result<AttributeValue> {
    Ok(serde_json::from_str(s)?)
}

pub(crate) mod base64_bytes {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod base64_bytes_list {
    use super::*;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            seq.serialize_element(&STANDARD.encode(item))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .into_iter()
            .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn map_notation() {
        let av = AttributeValue::M(
            [
                ("a".to_string(), AttributeValue::N("1".into())),
                ("b".to_string(), AttributeValue::B(b"hi".to_vec())),
                ("c".to_string(), AttributeValue::null()),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(
            to_json(&av).unwrap(),
            json!({"M": {"a": {"N": "1"}, "b": {"B": "aGk="}, "c": {"NULL": true}}})
        );
    }

    #[test]
    fn parses_sets_and_lists() {
        let av = from_json_str(r#"{"L":[{"SS":["x"]},{"BS":["AQI="]},{"BOOL":false}]}"#).unwrap();
        assert_eq!(
            av,
            AttributeValue::L(vec![
                AttributeValue::Ss(vec!["x".into()]),
                AttributeValue::Bs(vec![vec![1, 2]]),
                AttributeValue::Bool(false),
            ])
        );
        assert_eq!(from_json_str(&to_json_string(&av).unwrap()).unwrap(), av);
    }

    #[test]
    fn bad_base64_is_an_error() {
        assert!(from_json_str(r#"{"B":"***"}"#).is_err());
    }
}
