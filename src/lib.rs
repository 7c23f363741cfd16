//! # biform
//!
//! A dual-representation serialization engine: values built from a closed
//! set of structural shapes encode into either a **flat delimited token
//! stream** or a **hierarchical attributed XML tree**, and decode back to a
//! structurally equal value.
//!
//! ## The model
//!
//! A [`Value`] is a scalar (integer, float, boolean, or text), a pair, a
//! sequence, a set, a mapping, an owning single reference, an owning array,
//! or an externally-lengthed array view. Encoding is a single recursive
//! descent over that closed enum; decoding mirrors it token-for-token (or
//! node-for-node), directed by a declared [`Shape`]; neither wire form
//! tags values with their types.
//!
//! Two properties hold everywhere:
//!
//! - **Counts come first.** Every variable-length container records its
//!   element count before any element bodies, so decode pre-allocates.
//! - **Ownership is transparent.** Owning references encode as their
//!   pointee, with no tag; there is no representation for an absent
//!   reference, and attempting to encode one is a precondition violation.
//!
//! ## Quick Start
//!
//! ```rust
//! use biform::{from_flat_str, to_flat_string, Shape, ScalarKind, Value};
//!
//! let value = Value::seq(vec![Value::from(1), Value::from(2), Value::from(3)]);
//!
//! let flat = to_flat_string(&value).unwrap();
//! assert_eq!(flat, "3 1 2 3 ");
//!
//! let shape = Shape::seq(Shape::scalar(ScalarKind::Int));
//! let back = from_flat_str(&flat, &shape).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## The tree form
//!
//! ```rust
//! use biform::{from_xml_str, to_xml_string, Shape, ScalarKind, Value};
//!
//! let value = Value::map(vec![
//!     (Value::from("a"), Value::from(1)),
//!     (Value::from("b"), Value::from(2)),
//! ]);
//!
//! let xml = to_xml_string("table", &value).unwrap();
//! let shape = Shape::map(
//!     Shape::scalar(ScalarKind::Text),
//!     Shape::scalar(ScalarKind::Int),
//! );
//! let back = from_xml_str(&xml, "table", &shape).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Persistence
//!
//! [`Archive`] scopes a backing file: open-or-create on entry, explicit
//! save, and a [`with_archive`] combinator that guarantees a save attempt
//! on every exit path. See the [`store`] module.
//!
//! ## Format details
//!
//! The full grammar of both representations is documented in the
//! [`format`] module.

pub mod doc;
pub mod error;
pub mod flat;
pub mod format;
pub mod macros;
pub mod options;
pub mod shape;
pub mod store;
pub mod tree;
pub mod value;

pub use doc::Element;
pub use error::{Error, Result};
pub use flat::{Decoder, Encoder};
pub use options::{Delimiter, FlatOptions};
pub use shape::{ScalarKind, Shape, ShapeKind};
pub use store::{with_archive, Archive};
pub use value::{Scalar, Value};

use std::io;

/// Encodes a value as a flat token stream with default options.
///
/// # Examples
///
/// ```rust
/// use biform::{to_flat_string, Value};
///
/// let pair = Value::pair(Value::from(5), Value::from("hi"));
/// assert_eq!(to_flat_string(&pair).unwrap(), "5 hi ");
/// ```
///
/// # Errors
///
/// Returns an error for unencodable values (absent owning reference, view
/// length disagreement, text containing the delimiter).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_string(value: &Value) -> Result<String> {
    to_flat_string_with_options(value, &FlatOptions::default())
}

/// Encodes a value as a flat token stream with explicit options.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_string_with_options(value: &Value, options: &FlatOptions) -> Result<String> {
    let mut encoder = Encoder::new(options.clone());
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Encodes a value as a flat token stream into a writer.
///
/// # Errors
///
/// Returns an error if encoding fails or the writer rejects the bytes.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_flat_writer<W>(mut writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    let stream = to_flat_string(value)?;
    writer
        .write_all(stream.as_bytes())
        .map_err(|e| Error::io(e.to_string()))
}

/// Decodes one value of the declared shape from a flat token stream.
///
/// The whole input must be consumed; trailing non-delimiter input is
/// rejected.
///
/// # Examples
///
/// ```rust
/// use biform::{from_flat_str, Shape, ScalarKind, Value};
///
/// let shape = Shape::pair(
///     Shape::scalar(ScalarKind::Int),
///     Shape::scalar(ScalarKind::Text),
/// );
/// let pair = from_flat_str("5 hi ", &shape).unwrap();
/// assert_eq!(pair, Value::pair(Value::from(5), Value::from("hi")));
/// ```
///
/// # Errors
///
/// Returns an error when a token fails to parse, the stream is truncated,
/// trailing input remains, or the shape's preconditions are violated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_str(input: &str, shape: &Shape) -> Result<Value> {
    from_flat_str_with_options(input, shape, &FlatOptions::default())
}

/// Decodes one value of the declared shape with explicit options.
///
/// # Errors
///
/// Returns an error if the input does not decode under the declared shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_str_with_options(
    input: &str,
    shape: &Shape,
    options: &FlatOptions,
) -> Result<Value> {
    let mut decoder = Decoder::with_options(input, options.clone());
    let value = decoder.decode(shape)?;
    decoder.finish()?;
    Ok(value)
}

/// Decodes one value of the declared shape from a reader.
///
/// # Errors
///
/// Returns an error if reading fails or the input does not decode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_flat_reader<R>(mut reader: R, shape: &Shape) -> Result<Value>
where
    R: io::Read,
{
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(e.to_string()))?;
    from_flat_str(&input, shape)
}

/// Encodes a value as an XML document: a `serialization` root holding one
/// element with the given name.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_xml_string(name: &str, value: &Value) -> Result<String> {
    let mut root = Element::new(tree::ROOT_ELEMENT);
    tree::encode_into(&mut root, name, value)?;
    root.to_xml()
}

/// Decodes the named element of the declared shape from an XML document.
///
/// # Errors
///
/// Returns an error when the document does not parse, no element with that
/// name exists under the root, or the element does not decode under the
/// declared shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_xml_str(xml: &str, name: &str, shape: &Shape) -> Result<Value> {
    let root = Element::parse(xml)?;
    let node = root.child(name).ok_or_else(|| {
        Error::structure_mismatch(
            format!("an element named {:?} under the document root", name),
            format!("<{}> with no such child", root.name()),
        )
    })?;
    tree::decode_element(node, shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_seq_shape() -> Shape {
        Shape::seq(Shape::scalar(ScalarKind::Int))
    }

    #[test]
    fn flat_round_trip() {
        let value = Value::seq(vec![Value::from(1), Value::from(2), Value::from(3)]);
        let flat = to_flat_string(&value).unwrap();
        let back = from_flat_str(&flat, &int_seq_shape()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn tree_round_trip() {
        let value = Value::set(vec![Value::from("a"), Value::from("b")]);
        let xml = to_xml_string("letters", &value).unwrap();
        let shape = Shape::set(Shape::scalar(ScalarKind::Text));
        let back = from_xml_str(&xml, "letters", &shape).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn flat_rejects_trailing_input() {
        let err = from_flat_str("3 1 2 3 9 ", &int_seq_shape()).unwrap_err();
        assert!(matches!(err, Error::StructureMismatch { .. }));
    }

    #[test]
    fn writer_and_reader_round_trip() {
        let value = Value::seq(vec![Value::from(4), Value::from(5)]);
        let mut buffer = Vec::new();
        to_flat_writer(&mut buffer, &value).unwrap();
        let back = from_flat_reader(buffer.as_slice(), &int_seq_shape()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn missing_named_element_is_a_structure_mismatch() {
        let xml = to_xml_string("present", &Value::from(1)).unwrap();
        let shape = Shape::scalar(ScalarKind::Int);
        let err = from_xml_str(&xml, "absent", &shape).unwrap_err();
        assert!(matches!(err, Error::StructureMismatch { .. }));
    }
}
