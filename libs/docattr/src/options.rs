use serde::{Deserialize, Serialize};

/// What to do when decoding into an `Option<T>` field fails after the
/// pointee has already been allocated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalFieldErrors {
    /// Report the error; the whole assignment fails.
    #[default]
    Propagate,
    /// Keep `Some(T::default())` and drop the error (logged at `warn`).
    Discard,
}

/// Assignment behavior switches.
///
/// Deserializable so an application can carry it in its own config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub optional_field_errors: OptionalFieldErrors,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient decoding of optional fields.
    pub fn discard_optional_errors() -> Self {
        Self {
            optional_field_errors: OptionalFieldErrors::Discard,
        }
    }
}
