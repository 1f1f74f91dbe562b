use std::fmt;

/// Category of a conversion error.
///
/// `DocError::kind()` looks through field context wrappers, so callers can
/// branch on the category without matching nested variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The receiving container was already populated.
    AlreadyPopulated,
    /// Top-level shape mismatch on scan.
    Cast,
    /// A set element did not match the set's element kind.
    SetElementIncompatible(SetElementKind),
    /// A decoded attribute had a different shape than the declared field.
    NestedAttributeIncompatible,
    /// A converted value did not materialize as the requested wire variant.
    DocumentAttributeIncompatible,
    /// The value cannot be represented on the wire.
    Marshal,
}

/// Element kind named by a set incompatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetElementKind {
    String,
    Int,
    Float,
    Binary,
}

impl fmt::Display for SetElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetElementKind::String => f.write_str("string"),
            SetElementKind::Int => f.write_str("int"),
            SetElementKind::Float => f.write_str("float"),
            SetElementKind::Binary => f.write_str("binary"),
        }
    }
}

/// Error returned by every scan, assign and conversion operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocError {
    #[error("collection already contains item")]
    AlreadyPopulated,

    #[error("failed to cast: expected {expected}, got {actual}")]
    Cast {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("value is incompatible with a string set")]
    IncompatibleStringSlice,

    #[error("value is incompatible with an int set")]
    IncompatibleIntSlice,

    #[error("value is incompatible with a float set")]
    IncompatibleFloatSlice,

    #[error("value is incompatible with a binary set")]
    IncompatibleBinarySlice,

    #[error("incompatible attribute: expected {expected}, got {actual}")]
    IncompatibleAttribute {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("document attribute is incompatible: expected {expected}, got {actual}")]
    DocumentAttributeIncompatible {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("marshal: {0}")]
    Marshal(String),

    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<DocError>,
    },
}

impl DocError {
    pub fn cast(expected: &'static str, actual: &'static str) -> Self {
        DocError::Cast { expected, actual }
    }

    pub fn incompatible(expected: &'static str, actual: &'static str) -> Self {
        DocError::IncompatibleAttribute { expected, actual }
    }

    pub fn marshal(msg: impl Into<String>) -> Self {
        DocError::Marshal(msg.into())
    }

    /// Wrap with the name of the struct field being processed.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        DocError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DocError::AlreadyPopulated => ErrorKind::AlreadyPopulated,
            DocError::Cast { .. } => ErrorKind::Cast,
            DocError::IncompatibleStringSlice => {
                ErrorKind::SetElementIncompatible(SetElementKind::String)
            }
            DocError::IncompatibleIntSlice => {
                ErrorKind::SetElementIncompatible(SetElementKind::Int)
            }
            DocError::IncompatibleFloatSlice => {
                ErrorKind::SetElementIncompatible(SetElementKind::Float)
            }
            DocError::IncompatibleBinarySlice => {
                ErrorKind::SetElementIncompatible(SetElementKind::Binary)
            }
            DocError::IncompatibleAttribute { .. } => ErrorKind::NestedAttributeIncompatible,
            DocError::DocumentAttributeIncompatible { .. } => {
                ErrorKind::DocumentAttributeIncompatible
            }
            DocError::Marshal(_) => ErrorKind::Marshal,
            DocError::Field { source, .. } => source.kind(),
        }
    }

    /// Innermost error, with field context stripped.
    pub fn root(&self) -> &DocError {
        match self {
            DocError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// Dotted path of the fields the error passed through, outermost first.
    pub fn field_path(&self) -> Option<String> {
        let mut parts = Vec::new();
        let mut current = self;
        while let DocError::Field { field, source } = current {
            parts.push(field.as_str());
            current = source.as_ref();
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("."))
        }
    }
}

pub type Result<T, E = DocError> = std::result::Result<T, E>;

impl From<std::num::ParseFloatError> for DocError {
    fn from(e: std::num::ParseFloatError) -> Self {
        DocError::marshal(e.to_string())
    }
}

impl From<serde_json::Error> for DocError {
    fn from(e: serde_json::Error) -> Self {
        DocError::marshal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_looks_through_field_context() {
        let err = DocError::incompatible("string", "bool")
            .in_field("name")
            .in_field("owner");
        assert_eq!(err.kind(), ErrorKind::NestedAttributeIncompatible);
        assert_eq!(err.field_path().as_deref(), Some("owner.name"));
        assert_eq!(err.root(), &DocError::incompatible("string", "bool"));
    }

    #[test]
    fn display_names_both_shapes() {
        let err = DocError::incompatible("int", "string");
        assert_eq!(
            err.to_string(),
            "incompatible attribute: expected int, got string"
        );
        assert!(DocError::AlreadyPopulated.field_path().is_none());
    }
}
