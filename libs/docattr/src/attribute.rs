use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DocError, Result};
use crate::wire::{base64_bytes, base64_bytes_list};

/// Tagged wire value of the document store.
///
/// Serializes to the store's JSON attribute-value notation:
/// `{"S":"x"}`, `{"N":"1"}`, `{"BOOL":true}`, `{"NULL":true}`, `{"B":"<base64>"}`,
/// `{"SS":[..]}`, `{"NS":[..]}`, `{"BS":[..]}`, `{"L":[..]}`, `{"M":{..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    /// Number as decimal text.
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "B", with = "base64_bytes")]
    B(Vec<u8>),
    /// Always `true` on the wire.
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS", with = "base64_bytes_list")]
    Bs(Vec<Vec<u8>>),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "M")]
    M(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn null() -> Self {
        AttributeValue::Null(true)
    }

    /// Wire type descriptor (`"S"`, `"N"`, `"BOOL"`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::B(_) => "B",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
        }
    }

    pub fn document_kind(&self) -> Option<DocumentKind> {
        match self {
            AttributeValue::L(_) => Some(DocumentKind::L),
            AttributeValue::M(_) => Some(DocumentKind::M),
            AttributeValue::Ss(_) => Some(DocumentKind::Ss),
            AttributeValue::Ns(_) => Some(DocumentKind::Ns),
            AttributeValue::Bs(_) => Some(DocumentKind::Bs),
            _ => None,
        }
    }

    pub fn as_m(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        match self {
            AttributeValue::M(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_l(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::L(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null(_))
    }
}

/// Collection variants a conversion can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    L,
    M,
    Ss,
    Ns,
    Bs,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::L => "L",
            DocumentKind::M => "M",
            DocumentKind::Ss => "SS",
            DocumentKind::Ns => "NS",
            DocumentKind::Bs => "BS",
        }
    }

    /// Check that `value` is this variant, otherwise
    /// `DocumentAttributeIncompatible` naming both.
    pub fn expect(self, value: AttributeValue) -> Result<AttributeValue> {
        if value.document_kind() == Some(self) {
            Ok(value)
        } else {
            Err(DocError::DocumentAttributeIncompatible {
                expected: self.as_str(),
                actual: value.kind_name(),
            })
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
