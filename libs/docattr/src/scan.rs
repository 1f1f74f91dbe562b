use crate::error::Result;
use crate::value::Value;

/// Read-path population from a dynamic driver value.
///
/// A container may be populated at most once: scanning into a non-empty
/// receiver fails with `AlreadyPopulated` and leaves it untouched. On any
/// other failure the receiver is reset to empty. Containers also accept an
/// already-resolved value of their own kind.
///
/// Types outside this crate implement `Scan` to take over decoding of their
/// own fields; a field marked `#[document(scan)]` is handed to it directly.
pub trait Scan {
    fn scan(&mut self, value: Value) -> Result<()>;
}

/// Wire type descriptor of a container (`"SS"`, `"NS"`, `"BS"`, `"L"`, `"M"`).
pub trait DataType {
    fn data_type(&self) -> &'static str;
}
