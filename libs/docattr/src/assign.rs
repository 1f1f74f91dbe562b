//! Read-path assignment: populating typed fields from decoded values.
//!
//! `#[derive(Document)]` generates the per-field walk; this module supplies
//! the field-level `Assign` implementations it dispatches to.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::attribute::AttributeValue;
use crate::error::{DocError, Result};
use crate::list::List;
use crate::map::Map;
use crate::options::{OptionalFieldErrors, Options};
use crate::resolve::resolve_value;
use crate::scan::Scan;
use crate::set::{Set, SetElement};
use crate::value::{Object, Value};

/// Assign one decoded value to a field.
///
/// Scalars require the value to already have the matching dynamic shape.
/// Containers delegate to their `Scan` implementation.
pub trait Assign {
    fn assign(&mut self, value: Value, options: &Options) -> Result<()>;
}

/// A structured type with a static field-to-key table.
///
/// Implemented by `#[derive(Document)]`; hand-written implementations must
/// resolve keys through `naming::resolve_field_name` to stay consistent.
pub trait Document {
    /// Wire keys of the declared fields, in declaration order.
    fn field_names() -> Vec<Cow<'static, str>>
    where
        Self: Sized;

    fn to_attribute_map(&self) -> Result<BTreeMap<String, AttributeValue>>;

    /// Populate fields from a decoded map. Missing keys leave the field at
    /// its current value; the first failing field aborts.
    fn assign_fields(&mut self, fields: Object, options: &Options) -> Result<()>;
}

/// Assign a decoded value to a document: it must be an object (or an
/// already-resolved `Map`, whose container entries are taken as they are).
pub fn assign_document<D: Document + ?Sized>(
    target: &mut D,
    value: Value,
    options: &Options,
) -> Result<()> {
    match value {
        Value::Object(fields) => target.assign_fields(fields, options),
        Value::Map(map) => target.assign_fields(map.into_inner(), options),
        other => Err(DocError::incompatible("object", other.kind_name())),
    }
}

/// Build a fresh `D` from a decoded map.
pub fn decode_document<D: Document + Default>(fields: Object, options: &Options) -> Result<D> {
    let mut doc = D::default();
    doc.assign_fields(fields, options)?;
    Ok(doc)
}

impl Assign for String {
    fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
        match value {
            Value::String(s) => {
                *self = s;
                Ok(())
            }
            other => Err(DocError::incompatible("string", other.kind_name())),
        }
    }
}

impl Assign for bool {
    fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
        match value {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(DocError::incompatible("bool", other.kind_name())),
        }
    }
}

impl Assign for Vec<u8> {
    fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
        match value {
            Value::Binary(b) => {
                *self = b;
                Ok(())
            }
            other => Err(DocError::incompatible("binary", other.kind_name())),
        }
    }
}

// Wire numbers decode as floats; integer fields narrow on assignment.
// Fractions truncate, values outside the field's range are rejected.
macro_rules! assign_integer {
    ($($t:ty),*) => {
        $(
            impl Assign for $t {
                fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
                    let narrowed = match value {
                        Value::Float(f) if f.is_finite() => <$t>::try_from(f as i128).ok(),
                        Value::Float(_) => None,
                        Value::Int(i) => <$t>::try_from(i).ok(),
                        other => return Err(DocError::incompatible("int", other.kind_name())),
                    };
                    match narrowed {
                        Some(n) => {
                            *self = n;
                            Ok(())
                        }
                        None => Err(DocError::incompatible(
                            stringify!($t),
                            "out-of-range number",
                        )),
                    }
                }
            }
        )*
    };
}

assign_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! assign_float {
    ($($t:ty),*) => {
        $(
            impl Assign for $t {
                fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
                    match value {
                        Value::Float(f) => {
                            *self = f as $t;
                            Ok(())
                        }
                        Value::Int(i) => {
                            *self = i as $t;
                            Ok(())
                        }
                        other => Err(DocError::incompatible("float", other.kind_name())),
                    }
                }
            }
        )*
    };
}

assign_float!(f32, f64);

/// Pointer semantics: `Null` leaves the field untouched; anything else
/// allocates a default pointee and assigns into it.
impl<T: Assign + Default> Assign for Option<T> {
    fn assign(&mut self, value: Value, options: &Options) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        let mut inner = T::default();
        match inner.assign(value, options) {
            Ok(()) => {
                *self = Some(inner);
                Ok(())
            }
            Err(e) => match options.optional_field_errors {
                OptionalFieldErrors::Propagate => Err(e),
                OptionalFieldErrors::Discard => {
                    tracing::warn!(error = %e, "discarding optional field decode error");
                    *self = Some(T::default());
                    Ok(())
                }
            },
        }
    }
}

impl<T: Assign + ?Sized> Assign for Box<T> {
    fn assign(&mut self, value: Value, options: &Options) -> Result<()> {
        (**self).assign(value, options)
    }
}

/// Raw values are stored after nested resolution.
impl Assign for Value {
    fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
        *self = resolve_value(value)?;
        Ok(())
    }
}

impl<T: SetElement> Assign for Set<T> {
    fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
        self.scan(value)
    }
}

impl Assign for List {
    fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
        self.scan(value)
    }
}

impl Assign for Map {
    fn assign(&mut self, value: Value, _options: &Options) -> Result<()> {
        self.scan(value)
    }
}
