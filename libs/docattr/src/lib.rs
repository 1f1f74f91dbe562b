//! Conversion between typed Rust values and the schema-less attribute-value
//! model of a wide-column document store.
//!
//! Read path: a driver hands over an untyped [`Value`]; [`Scan`] populates a
//! [`Set`], [`List`], [`Map`] or [`TypedList`], resolving nested raw values
//! into the most specific container along the way.
//!
//! Write path: [`ToAttributeValue`] turns containers, scalars and
//! `#[derive(Document)]` structs into an [`AttributeValue`] tree.

// Lets the derive's `::docattr::` paths resolve inside this crate's own tests.
extern crate self as docattr;

pub mod assign;
pub mod attribute;
pub mod convert;
pub mod decode;
pub mod error;
pub mod list;
pub mod map;
pub mod naming;
pub mod options;
pub mod resolve;
pub mod scan;
pub mod set;
pub mod typed_list;
pub mod value;
pub mod wire;

pub use assign::{Assign, Document, assign_document, decode_document};
pub use attribute::{AttributeValue, DocumentKind};
pub use convert::{ToAttributeValue, to_document_attribute};
pub use docattr_derive::Document;
pub use error::{DocError, ErrorKind, Result, SetElementKind};
pub use list::List;
pub use map::Map;
pub use options::{OptionalFieldErrors, Options};
pub use scan::{DataType, Scan};
pub use set::{AnySet, Set, SetElement};
pub use typed_list::TypedList;
pub use value::{Object, Value};
